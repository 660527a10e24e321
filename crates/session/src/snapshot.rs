//! PNG export of the stroke raster.

use mural_core::{Raster, SketchError};
use std::path::Path;

/// Writes the raster as a PNG image.
///
/// Returns `SketchError::InvalidDimensions` if the raster dimensions overflow
/// `u32`, or `SketchError::Io` on write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), SketchError> {
    let w = u32::try_from(raster.width()).map_err(|_| SketchError::InvalidDimensions)?;
    let h = u32::try_from(raster.height()).map_err(|_| SketchError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, raster.data().to_vec())
        .ok_or_else(|| SketchError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| SketchError::Io(e.to_string()))
}
