//! Browser audio backend
//!
//! Clips come from `<audio>` elements on the page. When a clip element is
//! missing, short cues fall back to tones synthesized with the Web Audio API.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use super::{AudioSink, Cue, Playback, PlaybackAction};
use crate::settings::Settings;

/// Element ids of the clips
const FLAP_ID: &str = "flap-sound";
const HIT_ID: &str = "hit-sound";
const MUSIC_ID: &str = "bg-music";

/// An `<audio>` element plus its autoplay state
struct Clip {
    el: HtmlAudioElement,
    state: Rc<RefCell<Playback>>,
}

impl Clip {
    fn find(id: &str, volume: f32) -> Option<Self> {
        let el = web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlAudioElement>()
            .ok()?;
        el.set_volume(volume as f64);
        Some(Self {
            el,
            state: Rc::new(RefCell::new(Playback::default())),
        })
    }

    /// Rewind and play; a refused attempt is retried once muted
    fn restart(&self) {
        self.el.set_current_time(0.0);
        self.state.borrow_mut().on_request();

        let el = self.el.clone();
        let state = Rc::clone(&self.state);
        spawn_local(async move {
            let ok = play(&el).await;
            let action = state.borrow_mut().on_result(ok);
            if action != Some(PlaybackAction::RetryMuted) {
                return;
            }
            log::warn!("play() blocked for {}, retrying muted", el.src());
            el.set_muted(true);
            state.borrow_mut().on_retry();
            let ok = play(&el).await;
            state.borrow_mut().on_result(ok);
            if !ok {
                log::error!("Muted fallback play failed for {}", el.src());
            }
        });
    }

    fn stop(&self) {
        let _ = self.el.pause();
        self.state.borrow_mut().on_stop();
    }

    fn gesture(&self) {
        if self.state.borrow_mut().on_gesture() == Some(PlaybackAction::Unmute) {
            self.el.set_muted(false);
        }
    }
}

/// Await an element's `play()` promise
async fn play(el: &HtmlAudioElement) -> bool {
    match el.play() {
        Ok(promise) => JsFuture::from(promise).await.is_ok(),
        Err(_) => false,
    }
}

/// Audio manager for the game
pub struct WebAudio {
    flap: Option<Clip>,
    hit: Option<Clip>,
    music: Option<Clip>,
    /// Synth for cues without a clip
    ctx: Option<AudioContext>,
    sfx_volume: f32,
    muted: bool,
}

impl WebAudio {
    pub fn new(settings: &Settings) -> Self {
        let sfx_volume = settings.effective_sfx_volume();
        let music_volume = settings.effective_music_volume();

        let flap = Clip::find(FLAP_ID, sfx_volume);
        let hit = Clip::find(HIT_ID, sfx_volume);
        let music = Clip::find(MUSIC_ID, music_volume);

        // Only build a context if something needs synthesizing
        let ctx = if flap.is_none() || hit.is_none() {
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - synthesized cues disabled");
            }
            ctx
        } else {
            None
        };
        if music.is_none() {
            log::info!("No #{} element, playing without music", MUSIC_ID);
        }

        Self {
            flap,
            hit,
            music,
            ctx,
            sfx_volume,
            muted: settings.muted,
        }
    }

    fn play_clip_or(&self, clip: &Option<Clip>, synth: fn(&Self, &AudioContext, f32)) {
        if let Some(clip) = clip {
            clip.restart();
            return;
        }
        if self.sfx_volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        synth(self, ctx, self.sfx_volume);
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Flap - short upward chirp
    fn synth_flap(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(800.0, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Hit - falling thud
    fn synth_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.4)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.4)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.5).ok();
    }
}

impl AudioSink for WebAudio {
    fn play(&mut self, cue: Cue) {
        if self.muted {
            return;
        }
        match cue {
            // Tokens reuse the flap clip
            Cue::Flap | Cue::Coin => self.play_clip_or(&self.flap, Self::synth_flap),
            Cue::Hit => self.play_clip_or(&self.hit, Self::synth_hit),
            Cue::MusicStart => {
                if let Some(music) = &self.music {
                    music.restart();
                }
            }
            Cue::MusicStop => {
                if let Some(music) = &self.music {
                    music.stop();
                }
            }
        }
    }

    fn gesture(&mut self) {
        for clip in [&self.flap, &self.hit, &self.music].into_iter().flatten() {
            clip.gesture();
        }
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }
}
