//! Rendering module
//!
//! The render pass ([`scene::build_scene`]) turns the world into a list of
//! [`DrawCommand`]s without touching any platform API. A [`Surface`] executes
//! them; in the browser that is a 2D canvas.

pub mod scene;
pub mod vertex;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

pub use scene::build_scene;
pub use vertex::{Color, colors};

use glam::Vec2;

use crate::sim::GameState;

/// Image assets the renderer can blit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    Obstacle,
    Token,
    Avatar,
}

impl Sprite {
    pub const ALL: [Sprite; 4] = [
        Sprite::Background,
        Sprite::Obstacle,
        Sprite::Token,
        Sprite::Avatar,
    ];

    /// Asset path relative to the page
    pub fn path(self) -> &'static str {
        match self {
            Sprite::Background => "Assets/images/bg.png",
            Sprite::Obstacle => "Assets/images/pipe.png",
            Sprite::Token => "Assets/images/token.png",
            Sprite::Avatar => "Assets/images/avatar.png",
        }
    }
}

/// One drawing operation, in logical coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        pos: Vec2,
        size: Vec2,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Blit `sprite` into `offset..offset + size` after translating to `at`,
    /// rotating, and optionally mirroring vertically
    Sprite {
        sprite: Sprite,
        at: Vec2,
        rotation: f32,
        flip_y: bool,
        offset: Vec2,
        size: Vec2,
    },
    /// Bold text centered horizontally on the playfield
    Text {
        text: &'static str,
        px: f32,
        y: f32,
        color: Color,
        alpha: f32,
        /// Shadow blur radius in the text color
        glow: Option<f32>,
    },
}

/// Something that can execute draw commands
pub trait Surface {
    /// The sprite's image has loaded and can be blitted
    fn sprite_ready(&self, sprite: Sprite) -> bool;

    fn draw(&mut self, cmd: &DrawCommand);
}

/// Surface that draws nothing and has no images (headless runs)
#[derive(Debug, Default)]
pub struct NullSurface {
    /// Commands received so far
    pub commands: usize,
}

impl Surface for NullSurface {
    fn sprite_ready(&self, _sprite: Sprite) -> bool {
        false
    }

    fn draw(&mut self, _cmd: &DrawCommand) {
        self.commands += 1;
    }
}

/// Paint one frame of `state` onto `surface`
pub fn render<S: Surface>(state: &GameState, surface: &mut S) {
    let commands = build_scene(state, |sprite| surface.sprite_ready(sprite));
    for cmd in &commands {
        surface.draw(cmd);
    }
}
