//! Game state and core simulation types
//!
//! Everything the frame step reads or writes lives in [`GameState`]. One
//! instance is owned by the session controller for the lifetime of the page.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::progression::Difficulty;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start prompt showing, nothing simulated yet
    #[default]
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a restart trigger
    GameOver,
}

/// The player's avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Horizontal position (fixed for the whole run)
    pub x: f32,
    pub y: f32,
    /// Vertical velocity, logical units per frame (positive is down)
    pub vy: f32,
    pub radius: f32,
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            x: AVATAR_X,
            y: AVATAR_START_Y,
            vy: 0.0,
            radius: AVATAR_RADIUS,
        }
    }
}

impl Avatar {
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn top(&self) -> f32 {
        self.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.radius
    }

    /// Instantaneous velocity reset, not an impulse
    pub fn flap(&mut self) {
        self.vy = FLAP_VELOCITY;
    }

    /// Apply one frame of gravity and move
    pub fn fall(&mut self) {
        self.vy = (self.vy + GRAVITY).min(MAX_FALL_SPEED);
        self.y += self.vy;
    }

    /// Keep the avatar below the ceiling. Returns true if it was clamped.
    pub fn clamp_to_ceiling(&mut self) -> bool {
        if self.y < self.radius {
            self.y = self.radius;
            self.vy = 0.0;
            true
        } else {
            false
        }
    }

    /// Sprite tilt in radians, nose down when falling
    pub fn tilt(&self) -> f32 {
        (self.vy / 8.0).clamp(-0.6, 0.8)
    }
}

/// A gapped obstacle (top and bottom piece)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Bottom edge of the top piece
    pub top: f32,
    /// Height of the opening
    pub gap: f32,
    pub scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, top: f32, gap: f32) -> Self {
        Self {
            x,
            top,
            gap,
            scored: false,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }

    /// Top edge of the bottom piece
    pub fn gap_bottom(&self) -> f32 {
        self.top + self.gap
    }

    /// Hitbox horizontal span, inset from the sprite edges
    pub fn hitbox_x(&self) -> (f32, f32) {
        let inset = (1.0 - OBSTACLE_HITBOX_SCALE) * OBSTACLE_WIDTH / 2.0;
        let left = self.x + inset;
        (left, left + OBSTACLE_WIDTH * OBSTACLE_HITBOX_SCALE)
    }

    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}

/// A spinning bonus token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusToken {
    pub pos: Vec2,
    pub radius: f32,
    /// Rotation (radians)
    pub angle: f32,
    /// Radians per frame
    pub angular_vel: f32,
}

impl BonusToken {
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.radius < 0.0
    }
}

/// Session bookkeeping: phase, score and timers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub phase: GamePhase,
    /// Frames left in the post-reset grace window
    pub grace_frames: u32,
    /// Obstacles cleared this run
    pub score: u32,
    /// Best score since page load; never decreases
    pub best_score: u32,
    /// Tokens collected this run
    pub tokens: u32,
    /// Overlay fade-in, 0..=1, only advances while game over
    pub game_over_alpha: f32,
}

impl Session {
    pub fn in_grace(&self) -> bool {
        self.grace_frames > 0
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Count a cleared obstacle
    pub fn add_point(&mut self) {
        self.score += 1;
        self.best_score = self.best_score.max(self.score);
    }
}

/// Spawn timers, in 60 Hz frame equivalents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub obstacle: f32,
    pub token: f32,
    /// Threshold the token timer must pass this cycle
    pub token_threshold: f32,
}

/// Complete world state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub session: Session,
    pub avatar: Avatar,
    /// Obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Tokens in spawn order
    pub tokens: Vec<BonusToken>,
    pub timers: SpawnTimers,
    rng: Pcg32,
}

impl GameState {
    /// Create a fresh, not yet started world
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            session: Session::default(),
            avatar: Avatar::default(),
            obstacles: Vec::new(),
            tokens: Vec::new(),
            timers: SpawnTimers::default(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.timers.token_threshold = state.roll_token_threshold();
        state
    }

    /// Reset everything except the best score and start playing
    pub fn reset(&mut self) {
        self.avatar = Avatar::default();
        self.obstacles.clear();
        self.tokens.clear();
        self.timers = SpawnTimers {
            token_threshold: self.roll_token_threshold(),
            ..Default::default()
        };
        self.session = Session {
            phase: GamePhase::Playing,
            grace_frames: GRACE_FRAMES,
            best_score: self.session.best_score,
            ..Default::default()
        };
    }

    /// Difficulty for the current score
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::for_score(self.session.score)
    }

    pub fn spawn_obstacle(&mut self, gap: f32) {
        let top = (self.rng.random::<f32>() * OBSTACLE_TOP_RANGE).floor() + OBSTACLE_TOP_MIN;
        self.obstacles.push(Obstacle::new(LOGICAL_WIDTH, top, gap));
    }

    pub fn spawn_token(&mut self) {
        let span = GROUND_Y - 2.0 * TOKEN_MARGIN;
        let y = (self.rng.random::<f32>() * span).floor() + TOKEN_MARGIN;
        let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
        let angular_vel = self.rng.random::<f32>() * TOKEN_SPIN_RANGE + TOKEN_MIN_SPIN;
        self.tokens.push(BonusToken {
            pos: Vec2::new(LOGICAL_WIDTH + TOKEN_RADIUS, y),
            radius: TOKEN_RADIUS,
            angle,
            angular_vel,
        });
    }

    pub fn roll_token_threshold(&mut self) -> f32 {
        TOKEN_SPAWN_MIN_FRAMES + self.rng.random::<f32>() * TOKEN_SPAWN_JITTER_FRAMES
    }
}
