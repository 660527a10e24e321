//! Stroke-accumulating RGBA drawing surface.
//!
//! A `Raster` starts as opaque white paper and darkens as black strokes are
//! blended onto it. Each stroke carries its own [`Ink`] (alpha and line
//! width), so blending state never leaks from one stroke to the next.

use glam::DVec2;

use crate::error::SketchError;

/// Blending parameters for a single stroke.
#[derive(Debug, Clone, Copy)]
pub struct Ink {
    /// Stroke opacity in [0, 1].
    pub alpha: f64,
    /// Line width in pixels.
    pub width: f64,
}

/// A mutable RGBA8 surface that accumulates black pencil strokes.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Creates an opaque white surface.
    ///
    /// Returns `SketchError::InvalidDimensions` if either dimension is zero
    /// or the byte length overflows `usize`.
    pub fn blank(width: usize, height: usize) -> Result<Self, SketchError> {
        if width == 0 || height == 0 {
            return Err(SketchError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(SketchError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            data: vec![255; len],
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the row-major RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the raster, yielding the raw RGBA8 bytes.
    pub fn into_rgba(self) -> Vec<u8> {
        self.data
    }

    /// Returns the RGBA value at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Mean of all R/G/B samples, in [0, 255]. White paper reads 255.
    pub fn mean_luma(&self) -> f64 {
        let sum: f64 = self
            .data
            .chunks_exact(4)
            .map(|px| (px[0] as f64 + px[1] as f64 + px[2] as f64) / 3.0)
            .sum();
        sum / (self.width * self.height) as f64
    }

    /// Draws a black line segment from `from` to `to` with the given ink.
    ///
    /// Coverage is distance-based: a pixel is part of the stroke when its
    /// center lies within `width / 2` (at least half a pixel) of the segment.
    /// Each covered pixel is blended exactly once per call, source-over
    /// toward black at `ink.alpha`. Segments fully outside the surface are
    /// clipped away.
    pub fn stroke_line(&mut self, from: DVec2, to: DVec2, ink: Ink) {
        let alpha = ink.alpha.clamp(0.0, 1.0);
        if alpha == 0.0 {
            return;
        }
        let radius = (ink.width / 2.0).max(0.5);

        let min_x = (from.x.min(to.x) - radius).floor().max(0.0) as usize;
        let min_y = (from.y.min(to.y) - radius).floor().max(0.0) as usize;
        let max_xf = (from.x.max(to.x) + radius).ceil();
        let max_yf = (from.y.max(to.y) + radius).ceil();
        if max_xf < 0.0 || max_yf < 0.0 || min_x >= self.width || min_y >= self.height {
            return;
        }
        let max_x = (max_xf as usize).min(self.width - 1);
        let max_y = (max_yf as usize).min(self.height - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let center = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                if distance_to_segment(center, from, to) <= radius {
                    self.darken(x, y, alpha);
                }
            }
        }
    }

    /// Blends one pixel toward black at the given alpha.
    fn darken(&mut self, x: usize, y: usize, alpha: f64) {
        let idx = (y * self.width + x) * 4;
        for channel in &mut self.data[idx..idx + 3] {
            *channel = ((*channel as f64) * (1.0 - alpha)).round() as u8;
        }
    }
}

/// Distance from point `p` to the segment `a`-`b`.
fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
