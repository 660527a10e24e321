//! Error types for the mural core.

use thiserror::Error;

/// Errors produced by sketch operations.
#[derive(Debug, Error)]
pub enum SketchError {
    /// Width or height was zero when creating a buffer or raster.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A pixel buffer's data length did not match `width * height * 4`.
    #[error("buffer size mismatch: expected {expected} bytes, got {got}")]
    BufferMismatch { expected: usize, got: usize },

    /// A source image failed to decode. Never retried.
    #[error("image decode failed: {0}")]
    Decode(String),

    /// An I/O failure while reading or writing image data.
    #[error("i/o error: {0}")]
    Io(String),
}
