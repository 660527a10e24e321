//! Read-only RGBA pixel buffer with brightness sampling.
//!
//! A `PixelBuffer` is the source image the agents read: brightness lookups at
//! arbitrary (fractional) coordinates, with everything outside the buffer
//! treated as blank white so out-of-bounds positions exert no attraction.

use crate::error::SketchError;

/// Brightness returned for any coordinate outside the buffer.
pub const BLANK: f64 = 255.0;

/// An immutable view over a rectangular grid of RGBA8 samples.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates an all-white opaque buffer.
    ///
    /// Returns `SketchError::InvalidDimensions` if either dimension is zero
    /// or `width * height * 4` overflows `usize`.
    pub fn blank(width: usize, height: usize) -> Result<Self, SketchError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![255; len],
        })
    }

    /// Creates a buffer from raw row-major RGBA8 bytes.
    ///
    /// Returns `SketchError::BufferMismatch` if `data.len()` is not
    /// `width * height * 4`.
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self, SketchError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(SketchError::BufferMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the underlying row-major RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mean of the R, G, B channels at `(x, y)`, in [0, 255].
    ///
    /// Coordinates are floored to integer pixel indices; anything outside
    /// `[0, width) x [0, height)` reads as [`BLANK`] (white, no attraction).
    /// Alpha is ignored. No interpolation.
    pub fn brightness(&self, x: f64, y: f64) -> f64 {
        let xi = x.floor();
        let yi = y.floor();
        if xi < 0.0 || yi < 0.0 {
            return BLANK;
        }
        let (xi, yi) = (xi as usize, yi as usize);
        if xi >= self.width || yi >= self.height {
            return BLANK;
        }
        let idx = (yi * self.width + xi) * 4;
        let r = self.data[idx] as f64;
        let g = self.data[idx + 1] as f64;
        let b = self.data[idx + 2] as f64;
        (r + g + b) / 3.0
    }

    /// Normalized darkness at `(x, y)`: `1 - brightness / 255`, in [0, 1].
    pub fn darkness(&self, x: f64, y: f64) -> f64 {
        1.0 - self.brightness(x, y) / 255.0
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize, SketchError> {
    if width == 0 || height == 0 {
        return Err(SketchError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or(SketchError::InvalidDimensions)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 buffer: top-left black, top-right mid-gray, bottom row white.
    fn sample_buffer() -> PixelBuffer {
        let data = vec![
            0, 0, 0, 255, // (0, 0)
            120, 120, 120, 255, // (1, 0)
            255, 255, 255, 255, // (0, 1)
            255, 255, 255, 255, // (1, 1)
        ];
        PixelBuffer::from_rgba(2, 2, data).unwrap()
    }

    #[test]
    fn blank_buffer_is_white_everywhere() {
        let buf = PixelBuffer::blank(3, 3).unwrap();
        assert_eq!(buf.brightness(1.0, 1.0), 255.0);
        assert_eq!(buf.data().len(), 3 * 3 * 4);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(PixelBuffer::blank(0, 5).is_err());
        assert!(PixelBuffer::blank(5, 0).is_err());
        assert!(PixelBuffer::from_rgba(0, 0, vec![]).is_err());
    }

    #[test]
    fn from_rgba_rejects_wrong_length() {
        let result = PixelBuffer::from_rgba(2, 2, vec![0; 15]);
        assert!(matches!(
            result,
            Err(SketchError::BufferMismatch {
                expected: 16,
                got: 15
            })
        ));
    }

    #[test]
    fn brightness_averages_rgb_channels() {
        let buf = sample_buffer();
        assert_eq!(buf.brightness(0.0, 0.0), 0.0);
        assert_eq!(buf.brightness(1.0, 0.0), 120.0);
        assert_eq!(buf.brightness(0.0, 1.0), 255.0);
    }

    #[test]
    fn brightness_ignores_alpha() {
        let data = vec![90, 90, 90, 0];
        let buf = PixelBuffer::from_rgba(1, 1, data).unwrap();
        assert_eq!(buf.brightness(0.0, 0.0), 90.0);
    }

    #[test]
    fn fractional_coordinates_floor_to_pixel() {
        let buf = sample_buffer();
        assert_eq!(buf.brightness(0.99, 0.99), 0.0);
        assert_eq!(buf.brightness(1.01, 0.5), 120.0);
    }

    #[test]
    fn out_of_bounds_reads_as_white() {
        let buf = sample_buffer();
        assert_eq!(buf.brightness(-0.1, 0.0), BLANK);
        assert_eq!(buf.brightness(0.0, -3.0), BLANK);
        assert_eq!(buf.brightness(2.0, 0.0), BLANK);
        assert_eq!(buf.brightness(0.0, 2.0), BLANK);
        assert_eq!(buf.brightness(1e9, 1e9), BLANK);
    }

    #[test]
    fn darkness_is_complement_of_brightness() {
        let buf = sample_buffer();
        assert_eq!(buf.darkness(0.0, 0.0), 1.0);
        assert_eq!(buf.darkness(0.0, 1.0), 0.0);
        assert!((buf.darkness(1.0, 0.0) - (1.0 - 120.0 / 255.0)).abs() < 1e-12);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn outside_coordinates_always_blank(
                w in 1_usize..32,
                h in 1_usize..32,
                x in -1e6_f64..1e6,
                y in -1e6_f64..1e6,
            ) {
                let buf = PixelBuffer::blank(w, h).unwrap();
                let inside = x >= 0.0 && y >= 0.0
                    && (x.floor() as usize) < w
                    && (y.floor() as usize) < h;
                if !inside {
                    prop_assert_eq!(buf.brightness(x, y), BLANK);
                }
            }

            #[test]
            fn brightness_always_in_range(
                w in 1_usize..16,
                h in 1_usize..16,
                bytes in prop::collection::vec(any::<u8>(), 1..=1024),
                x in -10.0_f64..26.0,
                y in -10.0_f64..26.0,
            ) {
                let len = w * h * 4;
                let data: Vec<u8> = bytes.iter().cycle().take(len).copied().collect();
                let buf = PixelBuffer::from_rgba(w, h, data).unwrap();
                let v = buf.brightness(x, y);
                prop_assert!((0.0..=255.0).contains(&v), "brightness = {v}");
            }
        }
    }
}
