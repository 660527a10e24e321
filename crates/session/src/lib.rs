#![deny(unsafe_code)]
//! Simulation driver for the mural pencil-sketch engine.
//!
//! Hosts hand this crate encoded image bytes and a maximum bounding box; it
//! decodes and scales the image, owns the engine, and exposes the
//! `Idle -> Loading -> Running <-> Paused -> Closed` session state machine
//! that the host drives once per animation frame. Also provides PNG snapshot
//! export of the stroke raster.

pub mod decode;
pub mod fit;
pub mod session;
pub mod snapshot;

pub use fit::Viewport;
pub use session::{SessionConfig, SessionError, SessionState, SketchSession};
