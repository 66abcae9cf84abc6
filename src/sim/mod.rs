//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One `tick` per display frame
//! - Seeded RNG only
//! - Entities iterate in spawn order

pub mod collision;
pub mod progression;
pub mod state;
pub mod tick;

pub use collision::{avatar_hits_ground, avatar_hits_obstacle, avatar_hits_token};
pub use progression::Difficulty;
pub use state::{Avatar, BonusToken, GamePhase, GameState, Obstacle, Session};
pub use tick::{GameEvent, TickInput, tick};
