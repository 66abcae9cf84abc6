//! Render pass
//!
//! Stateless: reads the world and the sprite readiness flags and returns the
//! frame as draw commands, back to front.

use glam::Vec2;

use super::vertex::colors;
use super::{DrawCommand, Sprite};
use crate::consts::*;
use crate::sim::GameState;

/// Avatar sprite box (slightly smaller than the collision circle reads)
const AVATAR_SPRITE_SIZE: f32 = 35.0;
const AVATAR_SPRITE_OFFSET: f32 = -17.0;

/// Build the draw list for one frame
pub fn build_scene(state: &GameState, ready: impl Fn(Sprite) -> bool) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(8 + state.obstacles.len() * 2 + state.tokens.len());
    let screen = Vec2::new(LOGICAL_WIDTH, LOGICAL_HEIGHT);

    // Background
    if ready(Sprite::Background) {
        out.push(DrawCommand::Sprite {
            sprite: Sprite::Background,
            at: Vec2::ZERO,
            rotation: 0.0,
            flip_y: false,
            offset: Vec2::ZERO,
            size: screen,
        });
    } else {
        out.push(DrawCommand::FillRect {
            pos: Vec2::ZERO,
            size: screen,
            color: colors::SKY,
        });
    }

    // Obstacles: bottom piece below the gap, mirrored top piece above it.
    // Without the sprite they are invisible but still solid.
    if ready(Sprite::Obstacle) {
        let size = Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT);
        for obstacle in &state.obstacles {
            out.push(DrawCommand::Sprite {
                sprite: Sprite::Obstacle,
                at: Vec2::new(obstacle.x, obstacle.gap_bottom()),
                rotation: 0.0,
                flip_y: false,
                offset: Vec2::ZERO,
                size,
            });
            out.push(DrawCommand::Sprite {
                sprite: Sprite::Obstacle,
                at: Vec2::new(obstacle.x, obstacle.top),
                rotation: 0.0,
                flip_y: true,
                offset: Vec2::ZERO,
                size,
            });
        }
    }

    // Tokens
    let token_ready = ready(Sprite::Token);
    for token in &state.tokens {
        if token_ready {
            out.push(DrawCommand::Sprite {
                sprite: Sprite::Token,
                at: token.pos,
                rotation: token.angle,
                flip_y: false,
                offset: Vec2::splat(-token.radius),
                size: Vec2::splat(token.radius * 2.0),
            });
        } else {
            out.push(DrawCommand::Circle {
                center: token.pos,
                radius: token.radius,
                color: colors::TOKEN,
            });
        }
    }

    // Avatar
    let avatar = &state.avatar;
    if ready(Sprite::Avatar) {
        out.push(DrawCommand::Sprite {
            sprite: Sprite::Avatar,
            at: avatar.pos(),
            rotation: avatar.tilt(),
            flip_y: false,
            offset: Vec2::splat(AVATAR_SPRITE_OFFSET),
            size: Vec2::splat(AVATAR_SPRITE_SIZE),
        });
    } else {
        out.push(DrawCommand::Circle {
            center: avatar.pos(),
            radius: avatar.radius,
            color: colors::AVATAR,
        });
    }

    // Ground
    out.push(DrawCommand::FillRect {
        pos: Vec2::new(0.0, GROUND_Y),
        size: Vec2::new(LOGICAL_WIDTH, LOGICAL_HEIGHT - GROUND_Y),
        color: colors::GROUND,
    });
    out.push(DrawCommand::Line {
        from: Vec2::new(0.0, GROUND_Y),
        to: Vec2::new(LOGICAL_WIDTH, GROUND_Y),
        color: colors::GROUND_EDGE,
    });

    if state.session.is_game_over() {
        let alpha = state.session.game_over_alpha;
        out.push(DrawCommand::Text {
            text: "GAME OVER!",
            px: 30.0,
            y: LOGICAL_HEIGHT / 2.0 - 10.0,
            color: colors::GAME_OVER_TITLE,
            alpha,
            glow: Some(10.0),
        });
        out.push(DrawCommand::Text {
            text: "Click or press Space to Restart",
            px: 15.0,
            y: LOGICAL_HEIGHT / 2.0 + 25.0,
            color: colors::GAME_OVER_HINT,
            alpha,
            glow: None,
        });
    }

    out
}
