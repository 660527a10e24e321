//! Per-tick stroke rendering for one agent.

use mural_core::{Ink, PixelBuffer, Raster, Xorshift64};

use crate::agent::Agent;
use crate::AgentParams;

/// Force magnitude above which an ink drop may occur.
const INK_DROP_FORCE: f64 = 0.1;
/// Maximum extra line width added by an ink drop.
const INK_DROP_SPREAD: f64 = 5.0;

/// Renders one stroke for `agent`, or respawns it when its lifetime budget is
/// spent. Returns `true` if a stroke was drawn.
///
/// Most strokes use the faint `stroke_alpha` / `stroke_width` pencil line.
/// With probability `ink_drop_chance` — and only while the agent is being
/// pulled hard (`|force| > 0.1`) — the stroke thickens and darkens into an
/// ink drop. The lifetime check runs first: an agent past `max_strokes` is
/// respawned without drawing, so the next tick's forces start from the fresh
/// position.
pub fn render(
    agent: &mut Agent,
    buffer: &PixelBuffer,
    rng: &mut Xorshift64,
    params: &AgentParams,
    raster: &mut Raster,
) -> bool {
    agent.stroke_count += 1;
    if agent.stroke_count > params.max_strokes {
        agent.respawn(buffer, rng, params);
        return false;
    }

    let ink = if rng.chance(params.ink_drop_chance) && agent.force.length() > INK_DROP_FORCE {
        Ink {
            alpha: params.ink_drop_alpha,
            width: params.stroke_width + rng.next_f64() * INK_DROP_SPREAD,
        }
    } else {
        Ink {
            alpha: params.stroke_alpha,
            width: params.stroke_width,
        }
    };
    raster.stroke_line(agent.prev, agent.position, ink);
    true
}
