//! Heads-up display
//!
//! The controller pushes a [`HudSnapshot`] to a [`HudSink`] after every
//! frame. Token pickups also flash the token readout for a short time.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::DomHud;

use crate::sim::GameState;

/// How long the token readout stays highlighted after a pickup
pub const TOKEN_PULSE_MS: f64 = 420.0;

/// Values shown on the HUD for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudSnapshot {
    pub score: u32,
    pub best: u32,
    pub tokens: u32,
    /// Token readout is highlighted
    pub tokens_pulse: bool,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState, tokens_pulse: bool) -> Self {
        Self {
            score: state.session.score,
            best: state.session.best_score,
            tokens: state.session.tokens,
            tokens_pulse,
        }
    }
}

/// Receives the HUD values every frame
pub trait HudSink {
    fn update(&mut self, hud: &HudSnapshot);

    /// The first session started; the start prompt should go away
    fn hide_start_prompt(&mut self) {}
}

/// Sink that ignores updates (headless runs)
#[derive(Debug, Default)]
pub struct NullHud;

impl HudSink for NullHud {
    fn update(&mut self, _hud: &HudSnapshot) {}
}

/// Tracks the transient token highlight
#[derive(Debug, Clone, Default)]
pub struct PulseTimer {
    until_ms: Option<f64>,
}

impl PulseTimer {
    /// Start (or extend) the pulse at `now_ms`
    pub fn trigger(&mut self, now_ms: f64) {
        self.until_ms = Some(now_ms + TOKEN_PULSE_MS);
    }

    pub fn is_active(&self, now_ms: f64) -> bool {
        self.until_ms.is_some_and(|until| now_ms < until)
    }

    pub fn clear(&mut self) {
        self.until_ms = None;
    }
}
