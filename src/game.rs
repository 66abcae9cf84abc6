//! Session controller
//!
//! Owns the world and the frame clock, turns triggers into tick input, and
//! fans frame events out to the audio, HUD and render collaborators.

use std::cell::RefCell;
use std::rc::Rc;

use crate::audio::{AudioSink, Cue};
use crate::clock::{FrameClock, FrameScheduler, LoopControl, drive};
use crate::hud::{HudSink, HudSnapshot, PulseTimer};
use crate::renderer::{Surface, render};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Game instance holding all state
pub struct Game<S, A, H> {
    state: GameState,
    clock: FrameClock,
    /// Input gathered since the last frame
    input: TickInput,
    pulse: PulseTimer,
    running: bool,
    surface: S,
    audio: A,
    hud: H,
}

impl<S: Surface, A: AudioSink, H: HudSink> Game<S, A, H> {
    pub fn new(seed: u64, surface: S, audio: A, hud: H) -> Self {
        Self {
            state: GameState::new(seed),
            clock: FrameClock::new(),
            input: TickInput::default(),
            pulse: PulseTimer::default(),
            running: true,
            surface,
            audio,
            hud,
        }
    }

    /// The single player action: start, flap or restart
    pub fn trigger(&mut self) {
        self.input.trigger = true;
        self.audio.gesture();
    }

    /// Run one display frame at host time `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> LoopControl {
        if !self.running {
            return LoopControl::Stop;
        }

        let dt = self.clock.advance(now_ms);
        let input = std::mem::take(&mut self.input);
        let events = tick(&mut self.state, &input, dt);
        for event in events {
            self.dispatch(event, now_ms);
        }

        let snapshot = HudSnapshot::from_state(&self.state, self.pulse.is_active(now_ms));
        self.hud.update(&snapshot);
        render(&self.state, &mut self.surface);

        LoopControl::Continue
    }

    fn dispatch(&mut self, event: GameEvent, now_ms: f64) {
        match event {
            GameEvent::Started => {
                self.hud.hide_start_prompt();
                self.audio.play(Cue::MusicStart);
            }
            GameEvent::Restarted => {
                self.pulse.clear();
                self.audio.play(Cue::MusicStart);
            }
            GameEvent::Flapped => self.audio.play(Cue::Flap),
            GameEvent::Scored { score } => log::debug!("Score {}", score),
            GameEvent::TokenCollected { tokens } => {
                log::debug!("Token {}", tokens);
                self.pulse.trigger(now_ms);
                self.audio.play(Cue::Coin);
            }
            GameEvent::GameOver { .. } => {
                self.audio.play(Cue::MusicStop);
                self.audio.play(Cue::Hit);
            }
        }
    }

    /// End the frame chain after the current frame
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> GamePhase {
        self.state.session.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }
}

impl<S, A, H> Game<S, A, H>
where
    S: Surface + 'static,
    A: AudioSink + 'static,
    H: HudSink + 'static,
{
    /// Drive `game` from `scheduler` until it is stopped
    pub fn run<F: FrameScheduler + 'static>(game: Rc<RefCell<Self>>, scheduler: Rc<F>) {
        drive(scheduler, Box::new(move |now| game.borrow_mut().frame(now)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualScheduler;
    use crate::consts::*;
    use crate::renderer::{DrawCommand, Sprite};
    use crate::sim::state::BonusToken;
    use glam::Vec2;

    #[derive(Default)]
    struct FakeSurface {
        ready: bool,
        frames: usize,
        last: Vec<DrawCommand>,
    }

    impl Surface for FakeSurface {
        fn sprite_ready(&self, _sprite: Sprite) -> bool {
            self.ready
        }

        fn draw(&mut self, cmd: &DrawCommand) {
            if matches!(cmd, DrawCommand::FillRect { pos, .. } if *pos == Vec2::ZERO)
                || matches!(cmd, DrawCommand::Sprite { sprite: Sprite::Background, .. })
            {
                self.frames += 1;
                self.last.clear();
            }
            self.last.push(cmd.clone());
        }
    }

    #[derive(Default)]
    struct FakeAudio {
        cues: Vec<Cue>,
        gestures: usize,
    }

    impl AudioSink for FakeAudio {
        fn play(&mut self, cue: Cue) {
            self.cues.push(cue);
        }

        fn gesture(&mut self) {
            self.gestures += 1;
        }
    }

    #[derive(Default)]
    struct FakeHud {
        updates: Vec<HudSnapshot>,
        prompt_hidden: usize,
    }

    impl HudSink for FakeHud {
        fn update(&mut self, hud: &HudSnapshot) {
            self.updates.push(*hud);
        }

        fn hide_start_prompt(&mut self) {
            self.prompt_hidden += 1;
        }
    }

    type TestGame = Game<FakeSurface, FakeAudio, FakeHud>;

    fn game() -> TestGame {
        Game::new(17, FakeSurface::default(), FakeAudio::default(), FakeHud::default())
    }

    /// Advance `n` frames at 60 Hz starting from `*now`
    fn frames(game: &mut TestGame, now: &mut f64, n: usize) {
        for _ in 0..n {
            *now += 1000.0 / 60.0;
            game.frame(*now);
        }
    }

    #[test]
    fn test_first_trigger_starts_music() {
        let mut game = game();
        let mut now = 0.0;
        frames(&mut game, &mut now, 3);
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert!(game.audio().cues.is_empty());

        game.trigger();
        frames(&mut game, &mut now, 1);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.audio().cues, vec![Cue::MusicStart]);
        assert_eq!(game.audio().gestures, 1);
    }

    #[test]
    fn test_start_prompt_hidden_once() {
        let mut game = game();
        let mut now = 0.0;
        frames(&mut game, &mut now, 10);
        assert_eq!(game.hud().prompt_hidden, 0);

        game.trigger();
        frames(&mut game, &mut now, 1);
        assert_eq!(game.hud().prompt_hidden, 1);

        // Flaps, game over and restart leave it alone
        game.trigger();
        frames(&mut game, &mut now, 600);
        assert_eq!(game.phase(), GamePhase::GameOver);
        game.trigger();
        frames(&mut game, &mut now, 1);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.hud().prompt_hidden, 1);
    }

    #[test]
    fn test_triggers_in_one_frame_collapse() {
        let mut game = game();
        game.trigger();
        game.trigger();
        game.frame(0.0);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.audio().cues, vec![Cue::MusicStart]);
    }

    #[test]
    fn test_flap_plays_cue() {
        let mut game = game();
        let mut now = 0.0;
        game.trigger();
        frames(&mut game, &mut now, 1);
        game.trigger();
        frames(&mut game, &mut now, 1);
        assert_eq!(game.audio().cues, vec![Cue::MusicStart, Cue::Flap]);
    }

    #[test]
    fn test_game_over_cues_once() {
        let mut game = game();
        let mut now = 0.0;
        game.trigger();
        frames(&mut game, &mut now, 600);
        assert_eq!(game.phase(), GamePhase::GameOver);
        let cues = &game.audio().cues;
        assert_eq!(cues.iter().filter(|c| **c == Cue::Hit).count(), 1);
        assert_eq!(cues.iter().filter(|c| **c == Cue::MusicStop).count(), 1);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut game = game();
        let mut now = 0.0;
        game.trigger();
        frames(&mut game, &mut now, 600);
        assert_eq!(game.phase(), GamePhase::GameOver);

        game.trigger();
        frames(&mut game, &mut now, 1);
        let state = game.state();
        assert_eq!(state.session.phase, GamePhase::Playing);
        assert!(state.obstacles.is_empty());
        assert!(state.tokens.is_empty());
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.tokens, 0);
        assert_eq!(state.avatar.y, AVATAR_START_Y);
        assert_eq!(state.avatar.vy, 0.0);
        assert_eq!(game.audio().cues.last(), Some(&Cue::MusicStart));
    }

    #[test]
    fn test_token_pulses_hud() {
        let mut game = game();
        let mut now = 0.0;
        game.trigger();
        frames(&mut game, &mut now, GRACE_FRAMES as usize);
        game.state.avatar.vy = FLAP_VELOCITY;
        game.state.tokens.push(BonusToken {
            pos: Vec2::new(AVATAR_X, game.state.avatar.y),
            radius: TOKEN_RADIUS,
            angle: 0.0,
            angular_vel: 0.01,
        });
        frames(&mut game, &mut now, 1);
        let hud = *game.hud().updates.last().unwrap();
        assert_eq!(hud.tokens, 1);
        assert!(hud.tokens_pulse);
        assert_eq!(game.audio().cues.last(), Some(&Cue::Coin));

        // 30 frames is 500 ms, past the pulse
        game.state.avatar.y = AVATAR_START_Y;
        for _ in 0..30 {
            game.state.avatar.vy = FLAP_VELOCITY;
            frames(&mut game, &mut now, 1);
        }
        assert!(!game.hud().updates.last().unwrap().tokens_pulse);
    }

    #[test]
    fn test_renders_every_frame() {
        let mut game = game();
        let mut now = 0.0;
        frames(&mut game, &mut now, 5);
        assert_eq!(game.surface().frames, 5);
        assert_eq!(game.hud().updates.len(), 5);
        // Nothing loaded: avatar falls back to a circle
        assert!(
            game.surface()
                .last
                .iter()
                .any(|c| matches!(c, DrawCommand::Circle { .. }))
        );
    }

    #[test]
    fn test_run_stops_with_game() {
        let scheduler = Rc::new(ManualScheduler::new());
        let game = Rc::new(RefCell::new(game()));
        Game::run(Rc::clone(&game), Rc::clone(&scheduler));

        let mut now = 0.0;
        for _ in 0..10 {
            now += 16.0;
            assert!(scheduler.fire(now));
        }
        assert_eq!(game.borrow().surface().frames, 10);

        game.borrow_mut().stop();
        assert!(scheduler.fire(now + 16.0));
        assert!(!scheduler.fire(now + 32.0));
        assert_eq!(game.borrow().surface().frames, 10);
    }
}
