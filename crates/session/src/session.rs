//! The sketch session state machine.
//!
//! A `SketchSession` is driven by its host once per animation frame. Each
//! `frame()` call while running executes a configurable batch of engine steps
//! (amortizing scheduling overhead at the cost of batched visual updates).
//! Pausing skips the work but keeps `frame()` callable so resuming is cheap;
//! closing releases the engine and every buffer it owns.

use mural_core::{Engine, Raster, SketchError};
use mural_pencil::{PencilParams, PencilSketch};
use thiserror::Error;

use crate::decode::load_source;
use crate::fit::Viewport;

/// Default engine steps executed per frame.
const DEFAULT_BATCH: usize = 800;
/// Default maximum bounding box edge, device-independent pixels.
const DEFAULT_MAX_BOX: usize = 640;

/// Errors produced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The underlying sketch pipeline failed (decode, dimensions, i/o).
    #[error(transparent)]
    Sketch(#[from] SketchError),

    /// The session was closed; it cannot be driven or restarted.
    #[error("session is closed")]
    Closed,

    /// The requested operation is not legal in the current state.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

/// Lifecycle states of a sketch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No image loaded.
    Idle,
    /// Image decode in progress.
    Loading,
    /// Frames execute engine steps.
    Running,
    /// Frames are accepted but skipped; resume is cheap.
    Paused,
    /// Terminal: the engine and its buffers are released.
    Closed,
    /// Terminal: image decode failed.
    Error,
}

impl SessionState {
    fn name(self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Loading => "loading",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::Closed => "closed",
            SessionState::Error => "errored",
        }
    }
}

/// Configuration for a sketch session.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Maximum bounding box width for the fitted image.
    pub max_width: usize,
    /// Maximum bounding box height for the fitted image.
    pub max_height: usize,
    /// Engine steps per `frame()` call.
    pub batch: usize,
    /// PRNG seed for deterministic output.
    pub seed: u64,
    /// Engine parameters.
    pub pencil: PencilParams,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_BOX,
            max_height: DEFAULT_MAX_BOX,
            batch: DEFAULT_BATCH,
            seed: 42,
            pencil: PencilParams::default(),
        }
    }
}

/// A host-driven pencil-sketch session over one source image.
pub struct SketchSession {
    config: SessionConfig,
    state: SessionState,
    engine: Option<PencilSketch>,
    viewport: Option<Viewport>,
    frames: u64,
}

impl SketchSession {
    /// Creates an idle session.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: SessionState::Idle,
            engine: None,
            viewport: None,
            frames: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Geometry of the fitted image, once an image is loaded.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// The stroke raster, while an image is loaded.
    pub fn raster(&self) -> Option<&Raster> {
        self.engine.as_ref().map(Engine::raster)
    }

    /// The engine, while an image is loaded.
    pub fn engine(&self) -> Option<&PencilSketch> {
        self.engine.as_ref()
    }

    /// Frames accepted so far (paused frames included).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Loads `bytes`, fits it to the configured box, and starts running.
    ///
    /// Only legal from `Idle`. Decode or geometry failure moves the session
    /// to the terminal `Error` state and returns the failure — a bad image
    /// never leaves the session silently hanging in `Loading`.
    pub fn start(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        match self.state {
            SessionState::Idle => {}
            SessionState::Closed => return Err(SessionError::Closed),
            other => {
                return Err(SessionError::InvalidTransition {
                    action: "start",
                    state: other.name(),
                })
            }
        }
        self.state = SessionState::Loading;
        let loaded = load_source(bytes, self.config.max_width, self.config.max_height)
            .and_then(|(buffer, viewport)| {
                let engine = PencilSketch::new(buffer, self.config.seed, self.config.pencil)?;
                Ok((engine, viewport))
            });
        match loaded {
            Ok((engine, viewport)) => {
                self.engine = Some(engine);
                self.viewport = Some(viewport);
                self.state = SessionState::Running;
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Error;
                Err(e.into())
            }
        }
    }

    /// Executes one animation frame.
    ///
    /// While running, performs `batch` engine steps. While paused, does no
    /// work but still succeeds, so the host's frame chain keeps firing and
    /// `resume()` takes effect on the next frame. Fails once closed.
    pub fn frame(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Running => {
                let Some(engine) = self.engine.as_mut() else {
                    return Err(SessionError::InvalidTransition {
                        action: "frame",
                        state: "running without an engine",
                    });
                };
                for _ in 0..self.config.batch {
                    engine.step()?;
                }
                self.frames += 1;
                Ok(())
            }
            SessionState::Paused => {
                self.frames += 1;
                Ok(())
            }
            SessionState::Closed => Err(SessionError::Closed),
            other => Err(SessionError::InvalidTransition {
                action: "frame",
                state: other.name(),
            }),
        }
    }

    /// Suspends stepping without tearing down the frame chain.
    pub fn pause(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Running => {
                self.state = SessionState::Paused;
                Ok(())
            }
            SessionState::Closed => Err(SessionError::Closed),
            other => Err(SessionError::InvalidTransition {
                action: "pause",
                state: other.name(),
            }),
        }
    }

    /// Resumes stepping after a pause.
    pub fn resume(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Paused => {
                self.state = SessionState::Running;
                Ok(())
            }
            SessionState::Closed => Err(SessionError::Closed),
            other => Err(SessionError::InvalidTransition {
                action: "resume",
                state: other.name(),
            }),
        }
    }

    /// Closes the session, releasing the engine and all image buffers.
    /// Idempotent; a closed session cannot be restarted.
    pub fn close(&mut self) {
        self.state = SessionState::Closed;
        self.engine = None;
        self.viewport = None;
    }
}
