#![deny(unsafe_code)]
//! Core types for the mural pencil-sketch simulation.
//!
//! Provides the `Engine` trait, `PixelBuffer` (brightness sampling over source
//! pixels), `Raster` (stroke-accumulating drawing surface), `WanderNoise`
//! (coherent noise for ambient wander), `Xorshift64` PRNG, error types, and
//! JSON parameter helpers.

pub mod engine;
pub mod error;
pub mod noise;
pub mod params;
pub mod pixel;
pub mod prng;
pub mod raster;

pub use engine::Engine;
pub use error::SketchError;
pub use noise::WanderNoise;
pub use pixel::PixelBuffer;
pub use prng::Xorshift64;
pub use raster::{Ink, Raster};
