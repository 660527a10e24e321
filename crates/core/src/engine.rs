//! The core `Engine` trait implemented by every stroke engine.
//!
//! The trait is object-safe so a session driver can hold `Box<dyn Engine>`
//! and batch `step()` calls without knowing the concrete algorithm.

use crate::error::SketchError;
use crate::raster::Raster;
use serde_json::Value;

/// Core trait for stroke-based sketch engines.
///
/// Each engine advances an internal simulation one tick at a time and
/// accumulates its output on a [`Raster`]. Implementations must be
/// deterministic for a fixed seed.
pub trait Engine {
    /// Advance the simulation by one tick: update agents and render their
    /// strokes onto the raster.
    fn step(&mut self) -> Result<(), SketchError>;

    /// The drawing surface the engine renders onto.
    fn raster(&self) -> &Raster;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and
    /// defaults.
    fn param_schema(&self) -> Value;
}
