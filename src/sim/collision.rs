//! Collision tests between the avatar and the rest of the world
//!
//! The avatar is a circle but is tested against obstacles as its bounding
//! box, which matches how the sprites read on screen.

use super::state::{Avatar, BonusToken, Obstacle};
use crate::consts::GROUND_Y;

/// Avatar box overlaps the obstacle hitbox column and sticks out of the gap
pub fn avatar_hits_obstacle(avatar: &Avatar, obstacle: &Obstacle) -> bool {
    let (left, right) = obstacle.hitbox_x();
    let overlaps_x = avatar.x + avatar.radius > left && avatar.x - avatar.radius < right;
    let outside_gap = avatar.top() < obstacle.top || avatar.bottom() > obstacle.gap_bottom();
    overlaps_x && outside_gap
}

/// Circle-circle test on squared distances
pub fn avatar_hits_token(avatar: &Avatar, token: &BonusToken) -> bool {
    let dist_sq = avatar.pos().distance_squared(token.pos);
    let reach = avatar.radius + token.radius;
    dist_sq <= reach * reach
}

pub fn avatar_hits_ground(avatar: &Avatar) -> bool {
    avatar.bottom() >= GROUND_Y
}
