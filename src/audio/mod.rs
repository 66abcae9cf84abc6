//! Audio cues
//!
//! The simulation never talks to audio directly. The controller maps game
//! events to [`Cue`]s and hands them to an [`AudioSink`], which is free to
//! drop them. Browsers may refuse to start playback before a user gesture,
//! so each clip tracks a [`Playback`] state machine that retries muted and
//! unmutes on the next gesture.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Avatar flapped
    Flap,
    /// Run ended on an obstacle or the ground
    Hit,
    /// Bonus token picked up
    Coin,
    /// (Re)start the background loop from the top
    MusicStart,
    /// Halt the background loop
    MusicStop,
}

/// Fire-and-forget cue playback
pub trait AudioSink {
    fn play(&mut self, cue: Cue);

    /// A user gesture happened; backends may use it to unblock playback
    fn gesture(&mut self) {}
}

/// Sink that drops every cue (headless runs)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
}

/// Where a clip's play attempts stand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Idle,
    /// `play()` issued, result pending
    Requested,
    Playing,
    /// Autoplay refused the attempt
    Blocked,
    /// Second attempt issued with the clip muted
    RetryMuted,
    /// Even muted playback was refused; give up until the next request
    Failed,
}

/// Autoplay bookkeeping for a single clip
///
/// `muted` mirrors the element's muted flag. It is set by the muted retry and
/// only cleared by a user gesture, so replays and stops keep it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Playback {
    pub state: PlayState,
    pub muted: bool,
}

/// What the backend must do after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAction {
    /// Mute the clip, call [`Playback::on_retry`], and play again
    RetryMuted,
    /// Unmute the clip
    Unmute,
}

impl Playback {
    /// A new play request replaces whatever was going on
    pub fn on_request(&mut self) {
        self.state = PlayState::Requested;
    }

    /// The pending play attempt settled
    pub fn on_result(&mut self, ok: bool) -> Option<PlaybackAction> {
        match (self.state, ok) {
            (PlayState::Requested | PlayState::RetryMuted, true) => {
                self.state = PlayState::Playing;
                None
            }
            // Already muted, retrying changes nothing
            (PlayState::Requested, false) if self.muted => {
                self.state = PlayState::Failed;
                None
            }
            (PlayState::Requested, false) => {
                self.state = PlayState::Blocked;
                Some(PlaybackAction::RetryMuted)
            }
            (PlayState::RetryMuted, false) => {
                self.state = PlayState::Failed;
                None
            }
            // Stale result after a stop or a newer request
            _ => None,
        }
    }

    /// The backend muted the clip and issued the retry
    pub fn on_retry(&mut self) {
        if self.state == PlayState::Blocked {
            self.state = PlayState::RetryMuted;
            self.muted = true;
        }
    }

    pub fn on_gesture(&mut self) -> Option<PlaybackAction> {
        if self.muted {
            self.muted = false;
            Some(PlaybackAction::Unmute)
        } else {
            None
        }
    }

    pub fn on_stop(&mut self) {
        self.state = PlayState::Idle;
    }
}
