//! Scripted input for demo and headless runs
//!
//! Runs right and hops over gaps and spikes. It does not plan routes, so it
//! clears the early levels only some of the time.

use glam::Vec2;

use super::collision::{Rect, overlaps};
use super::entity::Entity;
use super::state::GameState;
use super::tick::StepInput;
use crate::levels::Level;

/// How far ahead of the player's leading edge to probe
const LOOKAHEAD: f32 = 20.0;
/// Depth of the ground probe below (or above) the player's feet
const PROBE_DEPTH: f32 = 4.0;

/// Pick inputs for the next step
pub fn autopilot(state: &GameState, level: &Level) -> StepInput {
    let player = &state.player;
    let wants_jump = player.grounded && (gap_ahead(state, level) || danger_ahead(state, level));

    StepInput {
        left: false,
        right: true,
        // Release for a step after each press so the next press registers
        jump: wants_jump && !player.jump_held,
    }
}

fn gap_ahead(state: &GameState, level: &Level) -> bool {
    let body = state.player.bounds();
    let probe_y = if state.reverse_gravity {
        body.y - PROBE_DEPTH
    } else {
        body.bottom()
    };
    let probe = Rect::new(body.right() + LOOKAHEAD, probe_y, 1.0, PROBE_DEPTH);
    !level
        .platforms_at(state.level_time)
        .any(|platform| overlaps(&probe, &platform))
}

fn danger_ahead(state: &GameState, level: &Level) -> bool {
    let body = state.player.bounds();
    let sweep = Rect::new(body.x, body.y, body.width + LOOKAHEAD * 2.0, body.height);
    level.hazards.iter().any(|hazard| overlaps(&sweep, hazard))
        || state
            .birds
            .iter()
            .any(|bird| overlaps(&sweep.translated(Vec2::new(LOOKAHEAD, 0.0)), &bird.bounds()))
}
