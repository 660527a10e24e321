#![deny(unsafe_code)]
//! One-shot pencil-sketch image filter.
//!
//! A single-pass pipeline, independent of the agent simulation: grayscale,
//! invert, unweighted box blur, then a color-dodge composite of the
//! blurred-inverted image over the grayscale original. The dodge amplifies
//! the front layer's brightness inversely to the back layer's darkness,
//! which is what fabricates the pencil-line contrast.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::RgbaImage;
use mural_core::SketchError;
use std::io::Cursor;

/// Default box blur radius.
pub const DEFAULT_BLUR_RADIUS: usize = 10;

/// Replaces R/G/B with the pixel's luma (`0.299R + 0.587G + 0.114B`).
/// Alpha is untouched.
pub fn grayscale(img: &RgbaImage) -> RgbaImage {
    let mut out = img.clone();
    for px in out.pixels_mut() {
        let [r, g, b, _] = px.0;
        let luma = (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64).round() as u8;
        px.0[0] = luma;
        px.0[1] = luma;
        px.0[2] = luma;
    }
    out
}

/// Inverts R/G/B (`255 - v`). Alpha is untouched.
pub fn invert(img: &RgbaImage) -> RgbaImage {
    let mut out = img.clone();
    for px in out.pixels_mut() {
        px.0[0] = 255 - px.0[0];
        px.0[1] = 255 - px.0[1];
        px.0[2] = 255 - px.0[2];
    }
    out
}

/// Unweighted box blur over a `(2 * radius + 1)²` window per R/G/B channel.
///
/// The window is clamped to the image bounds; out-of-bounds samples are
/// excluded from both the sum and the count, so edges do not bleed toward
/// any fixed color. Alpha is copied from the source pixel. A radius of zero
/// is the identity.
pub fn box_blur(img: &RgbaImage, radius: usize) -> RgbaImage {
    if radius == 0 {
        return img.clone();
    }
    let (w, h) = (img.width() as i64, img.height() as i64);
    let r = radius as i64;
    let mut out = img.clone();
    for y in 0..h {
        for x in 0..w {
            let mut sum = [0u64; 3];
            let mut count = 0u64;
            for wy in (y - r).max(0)..=(y + r).min(h - 1) {
                for wx in (x - r).max(0)..=(x + r).min(w - 1) {
                    let px = img.get_pixel(wx as u32, wy as u32).0;
                    sum[0] += px[0] as u64;
                    sum[1] += px[1] as u64;
                    sum[2] += px[2] as u64;
                    count += 1;
                }
            }
            let dst = out.get_pixel_mut(x as u32, y as u32);
            for c in 0..3 {
                dst.0[c] = ((sum[c] as f64 / count as f64).round()) as u8;
            }
        }
    }
    out
}

/// Color-dodge composite of `front` over `back`, per R/G/B channel:
/// `255` where `back == 255`, otherwise `min(255, front * 255 / (255 - back))`.
/// Alpha is copied from `front`.
///
/// Returns `SketchError::BufferMismatch` if the two images differ in size.
pub fn color_dodge(front: &RgbaImage, back: &RgbaImage) -> Result<RgbaImage, SketchError> {
    if front.dimensions() != back.dimensions() {
        return Err(SketchError::BufferMismatch {
            expected: (back.width() as usize * back.height() as usize) * 4,
            got: (front.width() as usize * front.height() as usize) * 4,
        });
    }
    let mut out = front.clone();
    for (dst, b) in out.pixels_mut().zip(back.pixels()) {
        for c in 0..3 {
            dst.0[c] = if b.0[c] == 255 {
                255
            } else {
                let dodged = dst.0[c] as u32 * 255 / (255 - b.0[c]) as u32;
                dodged.min(255) as u8
            };
        }
    }
    Ok(out)
}

/// Runs the full sketch pipeline: grayscale, invert, blur, color dodge of
/// the blurred-inverted front over the grayscale back.
pub fn sketchify(img: &RgbaImage, radius: usize) -> RgbaImage {
    let gray = grayscale(img);
    let blurred = box_blur(&invert(&gray), radius);
    match color_dodge(&blurred, &gray) {
        Ok(out) => out,
        // Both layers derive from the same image, so sizes always match.
        Err(_) => gray,
    }
}

/// Decodes `bytes`, sketchifies, and re-encodes as PNG.
///
/// Fails with `SketchError::Decode` on malformed input; no partial output
/// is produced.
pub fn sketchify_bytes(bytes: &[u8], radius: usize) -> Result<Vec<u8>, SketchError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| SketchError::Decode(e.to_string()))?
        .to_rgba8();
    let out = sketchify(&img, radius);
    let mut buf = Cursor::new(Vec::new());
    out.write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| SketchError::Io(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Sketchifies a `data:image/...;base64,` payload, producing a PNG data URL.
pub fn sketchify_data_url(data_url: &str, radius: usize) -> Result<String, SketchError> {
    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| SketchError::Decode("missing data URL separator".into()))?;
    if !header.starts_with("data:image/") || !header.ends_with(";base64") {
        return Err(SketchError::Decode(format!(
            "not a base64 image data URL: {header}"
        )));
    }
    let bytes = BASE64
        .decode(payload)
        .map_err(|e| SketchError::Decode(e.to_string()))?;
    let png = sketchify_bytes(&bytes, radius)?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
}
