//! One autonomous pencil agent.
//!
//! Each tick the agent recomputes its net force from three terms — attraction
//! toward dark image regions, coherent-noise wander, and boundary repulsion —
//! then integrates velocity and position. Leaving the canvas, or exhausting
//! the stroke lifetime, re-seeds the agent into a dark region.

use glam::DVec2;
use mural_core::{PixelBuffer, WanderNoise, Xorshift64};

use crate::AgentParams;

/// Force magnitude below which the agent is considered directionless and the
/// wander term is boosted.
const DRIFT_THRESHOLD: f64 = 0.01;
/// Velocity damping applied each tick before the speed clamp.
const DAMPING: f64 = 0.9999;

/// A single particle executing the force-based movement loop.
#[derive(Debug, Clone)]
pub struct Agent {
    pub(crate) position: DVec2,
    pub(crate) prev: DVec2,
    pub(crate) velocity: DVec2,
    pub(crate) force: DVec2,
    pub(crate) stroke_count: usize,
    pub(crate) respawns: usize,
}

impl Agent {
    /// Creates an agent at a fixed position with zero velocity.
    pub fn at(position: DVec2) -> Self {
        Self {
            position,
            prev: position,
            velocity: DVec2::ZERO,
            force: DVec2::ZERO,
            stroke_count: 0,
            respawns: 0,
        }
    }

    /// Creates an agent seeded into a dark region of `buffer`.
    pub fn spawn(buffer: &PixelBuffer, rng: &mut Xorshift64, params: &AgentParams) -> Self {
        let mut agent = Self::at(DVec2::ZERO);
        agent.respawn(buffer, rng, params);
        agent.respawns = 0;
        agent
    }

    /// Current position.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Position snapshotted at the start of the current tick; stroke segments
    /// run from here to [`Self::position`].
    pub fn previous_position(&self) -> DVec2 {
        self.prev
    }

    /// Current velocity.
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Net force accumulated during the most recent tick.
    pub fn force(&self) -> DVec2 {
        self.force
    }

    /// Strokes rendered since the last respawn.
    pub fn stroke_count(&self) -> usize {
        self.stroke_count
    }

    /// Total respawns since the agent was created.
    pub fn respawns(&self) -> usize {
        self.respawns
    }

    /// Advances the agent one tick. Returns `true` if the agent left the
    /// canvas and was respawned.
    pub fn update(
        &mut self,
        buffer: &PixelBuffer,
        noise: &WanderNoise,
        z: f64,
        rng: &mut Xorshift64,
        params: &AgentParams,
    ) -> bool {
        self.prev = self.position;
        self.force = DVec2::ZERO;

        self.force += self.attraction(buffer, params);
        self.force += self.wander(noise, z, params);
        self.force += self.boundary_steer(buffer, params);

        self.velocity += self.force;
        self.velocity *= DAMPING;
        self.velocity = self.velocity.clamp_length_max(params.max_speed);
        self.position += self.velocity;

        let w = buffer.width() as f64;
        let h = buffer.height() as f64;
        if self.position.x < 0.0
            || self.position.x > w
            || self.position.y < 0.0
            || self.position.y > h
        {
            self.respawn(buffer, rng, params);
            return true;
        }
        false
    }

    /// Mean pull toward the darkest cells in the square neighborhood of side
    /// `perception_radius` around the agent (center cell excluded,
    /// out-of-bounds cells skipped).
    fn attraction(&self, buffer: &PixelBuffer, params: &AgentParams) -> DVec2 {
        let half = (params.perception_radius / 2) as i64;
        let w = buffer.width() as f64;
        let h = buffer.height() as f64;

        let mut pull = DVec2::ZERO;
        let mut sampled = 0u32;
        for dy in -half..=half {
            for dx in -half..=half {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let sx = self.position.x + dx as f64;
                let sy = self.position.y + dy as f64;
                if sx < 0.0 || sy < 0.0 || sx >= w || sy >= h {
                    continue;
                }
                let darkness = buffer.darkness(sx, sy);
                let dir = DVec2::new(dx as f64, dy as f64).normalize_or_zero();
                pull += dir * darkness;
                sampled += 1;
            }
        }
        if sampled == 0 {
            return DVec2::ZERO;
        }
        pull / sampled as f64
    }

    /// Noise-driven wander: the sample maps to a heading in [0, 2π). Boosted
    /// five-fold when the force so far is below [`DRIFT_THRESHOLD`].
    fn wander(&self, noise: &WanderNoise, z: f64, params: &AgentParams) -> DVec2 {
        let sample = noise.sample(
            self.position.x / params.noise_scale,
            self.position.y / params.noise_scale,
            z,
        );
        let heading = DVec2::from_angle(sample * std::f64::consts::TAU);
        let influence = if self.force.length() < DRIFT_THRESHOLD {
            params.noise_influence * 5.0
        } else {
            params.noise_influence
        };
        heading * influence
    }

    /// Inward push per axis, proportional to penetration into the boundary
    /// margin, scaled by `boundary_force`.
    fn boundary_steer(&self, buffer: &PixelBuffer, params: &AgentParams) -> DVec2 {
        let margin = params.boundary_margin;
        let w = buffer.width() as f64;
        let h = buffer.height() as f64;

        let mut steer = DVec2::ZERO;
        if self.position.x < margin {
            steer.x += (margin - self.position.x) / margin;
        }
        if self.position.x > w - margin {
            steer.x -= (self.position.x - (w - margin)) / margin;
        }
        if self.position.y < margin {
            steer.y += (margin - self.position.y) / margin;
        }
        if self.position.y > h - margin {
            steer.y -= (self.position.y - (h - margin)) / margin;
        }
        steer * params.boundary_force
    }

    /// Re-seeds the agent, preferring dark pixels.
    ///
    /// Samples uniformly over the visible canvas up to
    /// `respawn_attempts` times, accepting the first position whose
    /// brightness is below `dark_threshold`. If every attempt lands on a
    /// bright pixel the last sample is kept — degraded placement, never an
    /// error. Velocity and stroke count are reset; the previous position
    /// collapses onto the new one so no stroke bridges the jump.
    pub fn respawn(&mut self, buffer: &PixelBuffer, rng: &mut Xorshift64, params: &AgentParams) {
        let w = buffer.width() as f64;
        let h = buffer.height() as f64;

        self.stroke_count = 0;
        self.respawns += 1;
        for _ in 0..params.respawn_attempts.max(1) {
            self.position = DVec2::new(rng.next_range(0.0, w), rng.next_range(0.0, h));
            if buffer.brightness(self.position.x, self.position.y) < params.dark_threshold {
                break;
            }
        }
        self.prev = self.position;
        self.velocity = DVec2::ZERO;
    }
}
