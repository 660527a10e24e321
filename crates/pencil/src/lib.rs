#![deny(unsafe_code)]
//! Pencil-sketch particle engine.
//!
//! A pool of autonomous agents reads local brightness from a source image,
//! accumulates attraction / wander / boundary forces, and strokes a white
//! raster with faint black lines — occasionally pooling into an ink drop at
//! high-attraction moments. Deterministic for a fixed seed.

pub mod agent;
pub mod renderer;

use mural_core::error::SketchError;
use mural_core::params::{param_f64, param_usize};
use mural_core::{Engine, PixelBuffer, Raster, WanderNoise, Xorshift64};
use serde_json::{json, Value};

use agent::Agent;

/// Default speed clamp in pixels per tick.
const DEFAULT_MAX_SPEED: f64 = 1.0;
/// Default side of the square sampling neighborhood, in pixels.
const DEFAULT_PERCEPTION_RADIUS: usize = 5;
/// Default width of the repulsive band along each canvas edge.
const DEFAULT_BOUNDARY_MARGIN: f64 = 60.0;
/// Default scale applied to the boundary push.
const DEFAULT_BOUNDARY_FORCE: f64 = 0.8;
/// Default spatial divisor for noise sampling.
const DEFAULT_NOISE_SCALE: f64 = 100.0;
/// Default wander force magnitude.
const DEFAULT_NOISE_INFLUENCE: f64 = 0.1;
/// Default per-stroke probability of an ink drop.
const DEFAULT_INK_DROP_CHANCE: f64 = 0.01;
/// Default ink drop opacity.
const DEFAULT_INK_DROP_ALPHA: f64 = 150.0 / 255.0;
/// Default pencil stroke opacity.
const DEFAULT_STROKE_ALPHA: f64 = 50.0 / 255.0;
/// Default pencil line width in pixels.
const DEFAULT_STROKE_WIDTH: f64 = 1.0;
/// Default strokes before a lifetime respawn.
const DEFAULT_MAX_STROKES: usize = 100;
/// Default brightness below which a respawn position is accepted.
const DEFAULT_DARK_THRESHOLD: f64 = 220.0;
/// Default respawn sampling budget.
const DEFAULT_RESPAWN_ATTEMPTS: usize = 100;
/// Default number of agents in the pool.
const DEFAULT_POOL_SIZE: usize = 1;
/// Default drift of the noise z parameter per tick.
const DEFAULT_NOISE_DRIFT: f64 = 5e-4;

/// Per-agent physics and rendering parameters.
#[derive(Debug, Clone, Copy)]
pub struct AgentParams {
    /// Velocity magnitude clamp, pixels per tick.
    pub max_speed: f64,
    /// Side of the square sampling neighborhood around the agent.
    pub perception_radius: usize,
    /// Width of the repulsive band along each canvas edge.
    pub boundary_margin: f64,
    /// Scale applied to the boundary push.
    pub boundary_force: f64,
    /// Spatial divisor for noise sampling.
    pub noise_scale: f64,
    /// Wander force magnitude (boosted 5x when otherwise directionless).
    pub noise_influence: f64,
    /// Per-stroke probability of an ink drop.
    pub ink_drop_chance: f64,
    /// Ink drop opacity in [0, 1].
    pub ink_drop_alpha: f64,
    /// Pencil stroke opacity in [0, 1].
    pub stroke_alpha: f64,
    /// Pencil line width in pixels.
    pub stroke_width: f64,
    /// Strokes before a lifetime respawn.
    pub max_strokes: usize,
    /// Brightness below which a respawn position is accepted.
    pub dark_threshold: f64,
    /// Respawn sampling budget before the fallback position is kept.
    pub respawn_attempts: usize,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            perception_radius: DEFAULT_PERCEPTION_RADIUS,
            boundary_margin: DEFAULT_BOUNDARY_MARGIN,
            boundary_force: DEFAULT_BOUNDARY_FORCE,
            noise_scale: DEFAULT_NOISE_SCALE,
            noise_influence: DEFAULT_NOISE_INFLUENCE,
            ink_drop_chance: DEFAULT_INK_DROP_CHANCE,
            ink_drop_alpha: DEFAULT_INK_DROP_ALPHA,
            stroke_alpha: DEFAULT_STROKE_ALPHA,
            stroke_width: DEFAULT_STROKE_WIDTH,
            max_strokes: DEFAULT_MAX_STROKES,
            dark_threshold: DEFAULT_DARK_THRESHOLD,
            respawn_attempts: DEFAULT_RESPAWN_ATTEMPTS,
        }
    }
}

/// Engine-level parameters: the agent tuning plus pool and noise drift.
#[derive(Debug, Clone, Copy)]
pub struct PencilParams {
    pub agent: AgentParams,
    /// Number of agents stepped per tick, in pool order. Minimum 1.
    pub pool_size: usize,
    /// Advance of the noise z parameter per tick.
    pub noise_drift: f64,
}

impl Default for PencilParams {
    fn default() -> Self {
        Self {
            agent: AgentParams::default(),
            pool_size: DEFAULT_POOL_SIZE,
            noise_drift: DEFAULT_NOISE_DRIFT,
        }
    }
}

impl PencilParams {
    /// Extracts parameters from a flat JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            agent: AgentParams {
                max_speed: param_f64(params, "max_speed", DEFAULT_MAX_SPEED),
                perception_radius: param_usize(
                    params,
                    "perception_radius",
                    DEFAULT_PERCEPTION_RADIUS,
                ),
                boundary_margin: param_f64(params, "boundary_margin", DEFAULT_BOUNDARY_MARGIN),
                boundary_force: param_f64(params, "boundary_force", DEFAULT_BOUNDARY_FORCE),
                noise_scale: param_f64(params, "noise_scale", DEFAULT_NOISE_SCALE),
                noise_influence: param_f64(params, "noise_influence", DEFAULT_NOISE_INFLUENCE),
                ink_drop_chance: param_f64(params, "ink_drop_chance", DEFAULT_INK_DROP_CHANCE),
                ink_drop_alpha: param_f64(params, "ink_drop_alpha", DEFAULT_INK_DROP_ALPHA),
                stroke_alpha: param_f64(params, "stroke_alpha", DEFAULT_STROKE_ALPHA),
                stroke_width: param_f64(params, "stroke_width", DEFAULT_STROKE_WIDTH),
                max_strokes: param_usize(params, "max_strokes", DEFAULT_MAX_STROKES),
                dark_threshold: param_f64(params, "dark_threshold", DEFAULT_DARK_THRESHOLD),
                respawn_attempts: param_usize(
                    params,
                    "respawn_attempts",
                    DEFAULT_RESPAWN_ATTEMPTS,
                ),
            },
            pool_size: param_usize(params, "pool_size", DEFAULT_POOL_SIZE).max(1),
            noise_drift: param_f64(params, "noise_drift", DEFAULT_NOISE_DRIFT),
        }
    }
}

/// Pencil-sketch engine: an agent pool stroking a raster from a source image.
///
/// The raster always matches the source dimensions. Agents are stepped in
/// pool order; the observed single-agent behavior is pool size 1.
pub struct PencilSketch {
    source: PixelBuffer,
    raster: Raster,
    agents: Vec<Agent>,
    params: PencilParams,
    rng: Xorshift64,
    noise: WanderNoise,
    z: f64,
}

impl PencilSketch {
    /// Creates an engine over `source` with its agent pool seeded into dark
    /// regions of the image.
    pub fn new(source: PixelBuffer, seed: u64, params: PencilParams) -> Result<Self, SketchError> {
        let raster = Raster::blank(source.width(), source.height())?;
        let mut rng = Xorshift64::new(seed);
        let noise = WanderNoise::new((seed as u32) ^ ((seed >> 32) as u32));
        let pool_size = params.pool_size.max(1);
        let agents = (0..pool_size)
            .map(|_| Agent::spawn(&source, &mut rng, &params.agent))
            .collect();
        Ok(Self {
            source,
            raster,
            agents,
            params,
            rng,
            noise,
            z: 0.0,
        })
    }

    /// Creates an engine from a flat JSON params object.
    pub fn from_json(
        source: PixelBuffer,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, SketchError> {
        Self::new(source, seed, PencilParams::from_json(json_params))
    }

    /// The source image the agents sample.
    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    /// Read-only view of the agent pool.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Total respawns across the pool since construction.
    pub fn total_respawns(&self) -> usize {
        self.agents.iter().map(Agent::respawns).sum()
    }
}

impl Engine for PencilSketch {
    fn step(&mut self) -> Result<(), SketchError> {
        for agent in &mut self.agents {
            agent.update(
                &self.source,
                &self.noise,
                self.z,
                &mut self.rng,
                &self.params.agent,
            );
            renderer::render(
                agent,
                &self.source,
                &mut self.rng,
                &self.params.agent,
                &mut self.raster,
            );
        }
        self.z += self.params.noise_drift;
        Ok(())
    }

    fn raster(&self) -> &Raster {
        &self.raster
    }

    fn params(&self) -> Value {
        let a = &self.params.agent;
        json!({
            "max_speed": a.max_speed,
            "perception_radius": a.perception_radius,
            "boundary_margin": a.boundary_margin,
            "boundary_force": a.boundary_force,
            "noise_scale": a.noise_scale,
            "noise_influence": a.noise_influence,
            "ink_drop_chance": a.ink_drop_chance,
            "ink_drop_alpha": a.ink_drop_alpha,
            "stroke_alpha": a.stroke_alpha,
            "stroke_width": a.stroke_width,
            "max_strokes": a.max_strokes,
            "dark_threshold": a.dark_threshold,
            "respawn_attempts": a.respawn_attempts,
            "pool_size": self.params.pool_size,
            "noise_drift": self.params.noise_drift,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "max_speed": {
                "type": "number",
                "default": DEFAULT_MAX_SPEED,
                "min": 0.1,
                "max": 10.0,
                "description": "Velocity magnitude clamp, pixels per tick"
            },
            "perception_radius": {
                "type": "integer",
                "default": DEFAULT_PERCEPTION_RADIUS,
                "min": 1,
                "max": 21,
                "description": "Side of the square sampling neighborhood"
            },
            "boundary_margin": {
                "type": "number",
                "default": DEFAULT_BOUNDARY_MARGIN,
                "min": 0.0,
                "max": 200.0,
                "description": "Width of the repulsive band along each edge"
            },
            "boundary_force": {
                "type": "number",
                "default": DEFAULT_BOUNDARY_FORCE,
                "min": 0.0,
                "max": 4.0,
                "description": "Scale applied to the boundary push"
            },
            "noise_scale": {
                "type": "number",
                "default": DEFAULT_NOISE_SCALE,
                "min": 1.0,
                "max": 1000.0,
                "description": "Spatial divisor for noise sampling"
            },
            "noise_influence": {
                "type": "number",
                "default": DEFAULT_NOISE_INFLUENCE,
                "min": 0.0,
                "max": 1.0,
                "description": "Wander force magnitude"
            },
            "ink_drop_chance": {
                "type": "number",
                "default": DEFAULT_INK_DROP_CHANCE,
                "min": 0.0,
                "max": 1.0,
                "description": "Per-stroke probability of an ink drop"
            },
            "ink_drop_alpha": {
                "type": "number",
                "default": DEFAULT_INK_DROP_ALPHA,
                "min": 0.0,
                "max": 1.0,
                "description": "Ink drop opacity"
            },
            "stroke_alpha": {
                "type": "number",
                "default": DEFAULT_STROKE_ALPHA,
                "min": 0.0,
                "max": 1.0,
                "description": "Pencil stroke opacity"
            },
            "stroke_width": {
                "type": "number",
                "default": DEFAULT_STROKE_WIDTH,
                "min": 0.1,
                "max": 10.0,
                "description": "Pencil line width in pixels"
            },
            "max_strokes": {
                "type": "integer",
                "default": DEFAULT_MAX_STROKES,
                "min": 1,
                "max": 10000,
                "description": "Strokes before a lifetime respawn"
            },
            "dark_threshold": {
                "type": "number",
                "default": DEFAULT_DARK_THRESHOLD,
                "min": 0.0,
                "max": 255.0,
                "description": "Brightness below which a respawn position is accepted"
            },
            "respawn_attempts": {
                "type": "integer",
                "default": DEFAULT_RESPAWN_ATTEMPTS,
                "min": 1,
                "max": 10000,
                "description": "Respawn sampling budget"
            },
            "pool_size": {
                "type": "integer",
                "default": DEFAULT_POOL_SIZE,
                "min": 1,
                "max": 256,
                "description": "Number of agents stepped per tick"
            },
            "noise_drift": {
                "type": "number",
                "default": DEFAULT_NOISE_DRIFT,
                "min": 0.0,
                "max": 0.1,
                "description": "Advance of the noise z parameter per tick"
            }
        })
    }
}
