//! Skygap - a single-screen flap-through-the-gaps arcade game
//!
//! Core modules:
//! - `sim`: Simulation (physics, spawning, collisions, session state machine)
//! - `clock`: Frame clock and scheduler abstraction driving the loop
//! - `game`: Session controller wiring the simulation to its collaborators
//! - `renderer`: Render pass producing draw commands, plus the canvas backend
//! - `audio`: Cue triggers and the autoplay fallback state machine
//! - `hud`: Score/best/token readout sink
//! - `platform`: Browser glue (viewport scaling, splash sequencing, input)
//! - `settings`: Presentation settings
//! - `autopilot`: Bot used for headless runs

pub mod audio;
pub mod autopilot;
pub mod clock;
pub mod game;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
///
/// All values are in logical units. Velocities and accelerations are per
/// frame, timers are in 60 Hz frame equivalents.
pub mod consts {
    /// Logical playfield resolution
    pub const LOGICAL_WIDTH: f32 = 288.0;
    pub const LOGICAL_HEIGHT: f32 = 512.0;
    /// Top of the ground band
    pub const GROUND_Y: f32 = LOGICAL_HEIGHT - 112.0;

    /// Upper bound on a single frame step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.032;

    /// Avatar
    pub const AVATAR_X: f32 = 60.0;
    pub const AVATAR_START_Y: f32 = LOGICAL_HEIGHT / 2.0;
    pub const AVATAR_RADIUS: f32 = 18.0;
    /// Added to vertical velocity once per frame (not dt-scaled)
    pub const GRAVITY: f32 = 0.11;
    /// Velocity set on flap (negative is up)
    pub const FLAP_VELOCITY: f32 = -3.6;
    pub const MAX_FALL_SPEED: f32 = 3.6;

    /// Frames after (re)start during which gravity and collisions are off
    pub const GRACE_FRAMES: u32 = 60;

    /// Obstacle sprite size
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    pub const OBSTACLE_HEIGHT: f32 = 320.0;
    /// Fraction of the sprite width used for the hitbox
    pub const OBSTACLE_HITBOX_SCALE: f32 = 0.8;
    /// Spawn interval (frames)
    pub const OBSTACLE_SPAWN_FRAMES: f32 = 85.0;
    /// Gap-top offset is `MIN + rand * RANGE`
    pub const OBSTACLE_TOP_MIN: f32 = 50.0;
    pub const OBSTACLE_TOP_RANGE: f32 = 150.0;

    /// Bonus tokens
    pub const TOKEN_RADIUS: f32 = 20.0;
    pub const TOKEN_SPAWN_MIN_FRAMES: f32 = 140.0;
    pub const TOKEN_SPAWN_JITTER_FRAMES: f32 = 80.0;
    /// Tokens spawn this far from the ceiling and ground
    pub const TOKEN_MARGIN: f32 = 80.0;
    pub const TOKEN_MIN_SPIN: f32 = 0.01;
    pub const TOKEN_SPIN_RANGE: f32 = 0.05;

    /// Progression
    pub const POINTS_PER_LEVEL: u32 = 50;
    pub const BASE_SPEED: f32 = 1.45;
    pub const SPEED_PER_LEVEL: f32 = 0.15;
    pub const BASE_GAP: f32 = 155.0;
    pub const GAP_PER_LEVEL: f32 = 10.0;
    pub const MIN_GAP: f32 = 110.0;

    /// Game-over overlay fade rate (alpha per second)
    pub const GAME_OVER_FADE_RATE: f32 = 2.0;
}
