//! Image decode and conversion into the engine's source buffer.

use image::imageops::FilterType;
use image::RgbaImage;
use mural_core::{PixelBuffer, SketchError};

use crate::fit::Viewport;

/// Decodes encoded image bytes (PNG, JPEG) into RGBA.
///
/// Returns `SketchError::Decode` on malformed input; decode failures are
/// surfaced to the caller and never retried.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, SketchError> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| SketchError::Decode(e.to_string()))
}

/// Converts a decoded image into the engine's read-only source buffer.
pub fn to_pixel_buffer(img: &RgbaImage) -> Result<PixelBuffer, SketchError> {
    PixelBuffer::from_rgba(
        img.width() as usize,
        img.height() as usize,
        img.as_raw().clone(),
    )
}

/// Decodes `bytes`, fits the image into the `max_w` x `max_h` box, and
/// resizes it to the fitted dimensions (triangle filter).
///
/// Returns the scaled source buffer together with the viewport geometry.
pub fn load_source(
    bytes: &[u8],
    max_w: usize,
    max_h: usize,
) -> Result<(PixelBuffer, Viewport), SketchError> {
    let img = decode_rgba(bytes)?;
    let viewport = Viewport::fit(img.width() as usize, img.height() as usize, max_w, max_h)?;
    let scaled = image::imageops::resize(
        &img,
        viewport.width as u32,
        viewport.height as u32,
        FilterType::Triangle,
    );
    Ok((to_pixel_buffer(&scaled)?, viewport))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Encodes a solid-color image as PNG bytes.
    fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, image::Rgba(rgba));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn decode_rgba_round_trips_a_png() {
        let img = decode_rgba(&png_bytes(6, 4, [10, 20, 30, 255])).unwrap();
        assert_eq!((img.width(), img.height()), (6, 4));
        assert_eq!(img.get_pixel(3, 2).0, [10, 20, 30, 255]);
    }

    #[test]
    fn decode_rgba_rejects_garbage() {
        let result = decode_rgba(b"definitely not an image");
        assert!(matches!(result, Err(SketchError::Decode(_))));
    }

    #[test]
    fn decode_rgba_rejects_truncated_png() {
        let mut bytes = png_bytes(16, 16, [0, 0, 0, 255]);
        bytes.truncate(bytes.len() / 2);
        assert!(matches!(decode_rgba(&bytes), Err(SketchError::Decode(_))));
    }

    #[test]
    fn load_source_scales_into_the_box() {
        let bytes = png_bytes(200, 100, [40, 40, 40, 255]);
        let (buffer, viewport) = load_source(&bytes, 100, 100).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (100, 50));
        assert_eq!(viewport.scale, 0.5);
        // Solid gray survives the resample.
        assert_eq!(buffer.brightness(50.0, 25.0), 40.0);
    }

    #[test]
    fn load_source_propagates_decode_failure() {
        assert!(matches!(
            load_source(b"nope", 100, 100),
            Err(SketchError::Decode(_))
        ));
    }

    #[test]
    fn load_source_rejects_zero_box() {
        let bytes = png_bytes(10, 10, [0, 0, 0, 255]);
        assert!(matches!(
            load_source(&bytes, 0, 100),
            Err(SketchError::InvalidDimensions)
        ));
    }
}
