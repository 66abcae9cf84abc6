//! Simple bot for headless runs
//!
//! Flaps whenever the avatar is falling below a target height: the middle of
//! the next gap, or mid-air when no obstacle is ahead.

use crate::consts::GROUND_Y;
use crate::sim::{GamePhase, GameState};

/// A flap rises about this far before gravity turns it around, so the
/// target sits below the gap center by half of it
const FLAP_RISE: f32 = 56.0;

/// Height the bot tries to hold
pub fn target_y(state: &GameState) -> f32 {
    let avatar = &state.avatar;
    let next = state
        .obstacles
        .iter()
        .find(|o| o.right() + avatar.radius >= avatar.x);
    let center = match next {
        Some(o) => o.top + o.gap / 2.0,
        None => GROUND_Y / 2.0,
    };
    center + FLAP_RISE / 2.0
}

/// Whether to trigger this frame
pub fn should_flap(state: &GameState) -> bool {
    match state.session.phase {
        GamePhase::NotStarted | GamePhase::GameOver => false,
        GamePhase::Playing => state.avatar.vy >= 0.0 && state.avatar.y > target_y(state),
    }
}
