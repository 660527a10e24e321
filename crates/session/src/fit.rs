//! Fit-to-box viewport geometry.
//!
//! Computes the uniform scale, scaled pixel dimensions, and centering padding
//! that place an image inside a maximum bounding box while preserving its
//! aspect ratio. The raster is sized to the scaled dimensions; the padding is
//! layout metadata for the host, never drawn pixels.

use mural_core::SketchError;

/// Geometry of an image fitted into a maximum bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Uniform scale applied to the natural image dimensions.
    pub scale: f64,
    /// Scaled width in pixels (>= 1).
    pub width: usize,
    /// Scaled height in pixels (>= 1).
    pub height: usize,
    /// Horizontal centering padding inside the box.
    pub pad_x: usize,
    /// Vertical centering padding inside the box.
    pub pad_y: usize,
}

impl Viewport {
    /// Fits an `img_w` x `img_h` image into a `max_w` x `max_h` box.
    ///
    /// `scale = min(max_w / img_w, max_h / img_h)`; scaled dimensions are
    /// rounded and clamped to at least 1x1 so extreme aspect ratios never
    /// produce a zero-area raster. Returns
    /// `SketchError::InvalidDimensions` if any input dimension is zero.
    pub fn fit(
        img_w: usize,
        img_h: usize,
        max_w: usize,
        max_h: usize,
    ) -> Result<Self, SketchError> {
        if img_w == 0 || img_h == 0 || max_w == 0 || max_h == 0 {
            return Err(SketchError::InvalidDimensions);
        }
        let scale = (max_w as f64 / img_w as f64).min(max_h as f64 / img_h as f64);
        let width = ((img_w as f64 * scale).round() as usize).max(1);
        let height = ((img_h as f64 * scale).round() as usize).max(1);
        Ok(Self {
            scale,
            width,
            height,
            pad_x: max_w.saturating_sub(width) / 2,
            pad_y: max_h.saturating_sub(height) / 2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_is_limited_by_width() {
        let vp = Viewport::fit(200, 100, 100, 100).unwrap();
        assert_eq!(vp.scale, 0.5);
        assert_eq!((vp.width, vp.height), (100, 50));
        assert_eq!((vp.pad_x, vp.pad_y), (0, 25));
    }

    #[test]
    fn tall_image_is_limited_by_height() {
        let vp = Viewport::fit(100, 400, 200, 100).unwrap();
        assert_eq!(vp.scale, 0.25);
        assert_eq!((vp.width, vp.height), (25, 100));
        assert_eq!((vp.pad_x, vp.pad_y), (87, 0));
    }

    #[test]
    fn exact_fit_has_no_padding() {
        let vp = Viewport::fit(300, 300, 300, 300).unwrap();
        assert_eq!(vp.scale, 1.0);
        assert_eq!((vp.width, vp.height), (300, 300));
        assert_eq!((vp.pad_x, vp.pad_y), (0, 0));
    }

    #[test]
    fn upscaling_fills_the_box() {
        let vp = Viewport::fit(50, 50, 200, 100).unwrap();
        assert_eq!(vp.scale, 2.0);
        assert_eq!((vp.width, vp.height), (100, 100));
        assert_eq!((vp.pad_x, vp.pad_y), (50, 0));
    }

    #[test]
    fn extreme_aspect_ratio_clamps_to_one_pixel() {
        let vp = Viewport::fit(10_000, 1, 100, 100).unwrap();
        assert_eq!(vp.width, 100);
        assert_eq!(vp.height, 1, "height must clamp to 1, not round to 0");
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(Viewport::fit(0, 100, 100, 100).is_err());
        assert!(Viewport::fit(100, 0, 100, 100).is_err());
        assert!(Viewport::fit(100, 100, 0, 100).is_err());
        assert!(Viewport::fit(100, 100, 100, 0).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fitted_dimensions_never_exceed_the_box(
                img_w in 1_usize..5000,
                img_h in 1_usize..5000,
                max_w in 1_usize..2000,
                max_h in 1_usize..2000,
            ) {
                let vp = Viewport::fit(img_w, img_h, max_w, max_h).unwrap();
                prop_assert!(vp.width <= max_w.max(1));
                prop_assert!(vp.height <= max_h.max(1));
                prop_assert!(vp.width >= 1 && vp.height >= 1);
                prop_assert!(vp.pad_x <= max_w / 2);
                prop_assert!(vp.pad_y <= max_h / 2);
            }

            #[test]
            fn aspect_ratio_is_roughly_preserved(
                img_w in 10_usize..5000,
                img_h in 10_usize..5000,
                max_w in 50_usize..2000,
                max_h in 50_usize..2000,
            ) {
                let vp = Viewport::fit(img_w, img_h, max_w, max_h).unwrap();
                // Rounding to whole pixels perturbs the ratio; only judge
                // fits large enough for that perturbation to be small.
                prop_assume!(vp.width >= 20 && vp.height >= 20);
                let natural = img_w as f64 / img_h as f64;
                let fitted = vp.width as f64 / vp.height as f64;
                prop_assert!(
                    (natural.ln() - fitted.ln()).abs() < 0.2,
                    "ratio drifted: {natural} vs {fitted}"
                );
            }
        }
    }
}
