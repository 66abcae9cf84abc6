//! Difficulty curve
//!
//! Speed grows without bound, the gap shrinks until it hits a floor.

use crate::consts::*;

/// Difficulty derived from the score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub level: u32,
    /// Horizontal scroll speed, logical units per frame
    pub speed: f32,
    /// Gap height for newly spawned obstacles
    pub gap: f32,
}

impl Difficulty {
    pub fn for_score(score: u32) -> Self {
        let level = score / POINTS_PER_LEVEL;
        Self {
            level,
            speed: BASE_SPEED + level as f32 * SPEED_PER_LEVEL,
            gap: (BASE_GAP - level as f32 * GAP_PER_LEVEL).max(MIN_GAP),
        }
    }
}
