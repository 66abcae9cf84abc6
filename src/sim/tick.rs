//! Per-frame simulation step
//!
//! Advances the world by one display frame. Spawn timers and scrolling are
//! normalized to 60 Hz through `dt`, but gravity is applied once per frame
//! regardless of `dt`, so fall acceleration depends on the display rate.

use super::collision::{avatar_hits_ground, avatar_hits_obstacle, avatar_hits_token};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap, start or restart depending on the phase (key/click/tap)
    pub trigger: bool,
}

/// Things that happened during a frame, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// First run started from the start prompt
    Started,
    /// New run started from the game-over screen
    Restarted,
    Flapped,
    /// An obstacle was cleared; carries the new score
    Scored { score: u32 },
    /// A token was picked up; carries the run total
    TokenCollected { tokens: u32 },
    /// The run ended
    GameOver { score: u32, best: u32 },
}

/// Advance the game state by one frame of `dt` seconds
///
/// `dt` is expected to be clamped by the caller (see [`crate::clock`]); it is
/// clamped again here so a bad caller cannot tunnel entities.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    let mut events = Vec::new();

    if input.trigger {
        match state.session.phase {
            GamePhase::NotStarted => {
                state.reset();
                log::info!("Session started (seed {})", state.seed);
                events.push(GameEvent::Started);
            }
            GamePhase::GameOver => {
                state.reset();
                log::info!("Session restarted, best {}", state.session.best_score);
                events.push(GameEvent::Restarted);
            }
            GamePhase::Playing => {
                state.avatar.flap();
                events.push(GameEvent::Flapped);
            }
        }
    }

    match state.session.phase {
        GamePhase::NotStarted => {}
        GamePhase::GameOver => {
            let alpha = state.session.game_over_alpha + dt * GAME_OVER_FADE_RATE;
            state.session.game_over_alpha = alpha.min(1.0);
        }
        GamePhase::Playing => step_playing(state, dt, &mut events),
    }

    events
}

fn step_playing(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let frames = dt * 60.0;

    if state.session.grace_frames > 0 {
        state.session.grace_frames -= 1;
    }
    let armed = !state.session.in_grace();

    if armed {
        state.avatar.fall();
    }
    state.avatar.clamp_to_ceiling();

    let difficulty = state.difficulty();

    // --- SPAWNING ---
    state.timers.obstacle += frames;
    if state.timers.obstacle > OBSTACLE_SPAWN_FRAMES {
        state.timers.obstacle = 0.0;
        state.spawn_obstacle(difficulty.gap);
    }

    state.timers.token += frames;
    if state.timers.token > state.timers.token_threshold {
        state.timers.token = 0.0;
        state.timers.token_threshold = state.roll_token_threshold();
        state.spawn_token();
    }

    // --- OBSTACLES ---
    let mut hit = false;
    for obstacle in &mut state.obstacles {
        obstacle.x -= difficulty.speed;

        if !obstacle.scored && obstacle.right() < state.avatar.x {
            obstacle.scored = true;
            state.session.add_point();
            events.push(GameEvent::Scored {
                score: state.session.score,
            });
        }

        if armed && avatar_hits_obstacle(&state.avatar, obstacle) {
            hit = true;
        }
    }
    state.obstacles.retain(|o| !o.is_offscreen());
    if hit {
        trigger_game_over(state, events);
    }

    // --- TOKENS ---
    let avatar = state.avatar;
    let mut collected = 0;
    state.tokens.retain_mut(|token| {
        token.pos.x -= difficulty.speed;
        token.angle += token.angular_vel;

        if armed && avatar_hits_token(&avatar, token) {
            collected += 1;
            return false;
        }
        !token.is_offscreen()
    });
    for _ in 0..collected {
        state.session.tokens += 1;
        events.push(GameEvent::TokenCollected {
            tokens: state.session.tokens,
        });
    }

    // --- GROUND ---
    if armed && avatar_hits_ground(&state.avatar) {
        state.avatar.y = GROUND_Y - state.avatar.radius;
        trigger_game_over(state, events);
    }
}

/// Latch the game-over state; later calls are no-ops
fn trigger_game_over(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.session.is_game_over() {
        return;
    }
    state.session.phase = GamePhase::GameOver;
    state.session.game_over_alpha = 0.0;
    log::info!(
        "Game over: score {} best {} tokens {}",
        state.session.score,
        state.session.best_score,
        state.session.tokens
    );
    events.push(GameEvent::GameOver {
        score: state.session.score,
        best: state.session.best_score,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Avatar, BonusToken, Obstacle};
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn trigger() -> TickInput {
        TickInput { trigger: true }
    }

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(&mut state, &trigger(), DT);
        state
    }

    /// Start and burn through the grace window with the avatar held still
    fn armed(seed: u64) -> GameState {
        let mut state = started(seed);
        while state.session.in_grace() {
            tick(&mut state, &idle(), DT);
        }
        state.obstacles.clear();
        state.tokens.clear();
        state.avatar = Avatar::default();
        state
    }

    #[test]
    fn test_idle_before_start() {
        let mut state = GameState::new(1);
        for _ in 0..100 {
            let events = tick(&mut state, &idle(), DT);
            assert!(events.is_empty());
        }
        assert_eq!(state.session.phase, GamePhase::NotStarted);
        assert_eq!(state.avatar, Avatar::default());
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_trigger_starts_session() {
        let mut state = GameState::new(1);
        let events = tick(&mut state, &trigger(), DT);
        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(state.session.phase, GamePhase::Playing);
        assert_eq!(state.session.grace_frames, GRACE_FRAMES - 1);
    }

    #[test]
    fn test_trigger_while_playing_flaps() {
        let mut state = armed(2);
        state.avatar.vy = 2.5;
        let events = tick(&mut state, &trigger(), DT);
        assert!(events.contains(&GameEvent::Flapped));
        assert_eq!(state.session.phase, GamePhase::Playing);
        // Flap sets velocity, then one frame of gravity applies
        assert!((state.avatar.vy - (FLAP_VELOCITY + GRAVITY)).abs() < 1e-5);
    }

    #[test]
    fn test_grace_window_holds_avatar() {
        let mut state = started(3);
        let y = state.avatar.y;
        for _ in 1..GRACE_FRAMES - 1 {
            tick(&mut state, &idle(), DT);
            assert_eq!(state.avatar.y, y);
            assert_eq!(state.avatar.vy, 0.0);
        }
    }

    #[test]
    fn test_grace_window_ignores_collisions() {
        let mut state = started(4);
        // Sit the avatar on the ground inside an obstacle column
        state.avatar.y = GROUND_Y;
        state.obstacles.push(Obstacle::new(AVATAR_X - OBSTACLE_WIDTH / 2.0, 300.0, MIN_GAP));
        state.tokens.push(BonusToken {
            pos: Vec2::new(AVATAR_X + 2.0, GROUND_Y),
            radius: TOKEN_RADIUS,
            angle: 0.0,
            angular_vel: 0.0,
        });
        while state.session.grace_frames > 1 {
            let events = tick(&mut state, &idle(), DT);
            assert!(!events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
            assert!(!events.iter().any(|e| matches!(e, GameEvent::TokenCollected { .. })));
        }
        assert_eq!(state.session.phase, GamePhase::Playing);
        assert_eq!(state.session.tokens, 0);
    }

    #[test]
    fn test_falls_to_ground_and_latches_game_over() {
        let mut state = started(5);
        let mut game_overs = 0;
        for _ in 0..GRACE_FRAMES + 1 {
            let events = tick(&mut state, &idle(), DT);
            game_overs += events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count();
        }
        assert_eq!(game_overs, 0);
        assert!(state.avatar.y > AVATAR_START_Y);

        for _ in 0..600 {
            let events = tick(&mut state, &idle(), DT);
            game_overs += events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count();
        }
        assert_eq!(game_overs, 1);
        assert_eq!(state.session.phase, GamePhase::GameOver);
        assert!(state.avatar.bottom() <= GROUND_Y + 1e-3);
    }

    #[test]
    fn test_game_over_freezes_world_and_fades() {
        let mut state = armed(6);
        state.avatar.y = GROUND_Y;
        tick(&mut state, &idle(), DT);
        assert_eq!(state.session.phase, GamePhase::GameOver);
        assert_eq!(state.session.game_over_alpha, 0.0);

        state.obstacles.push(Obstacle::new(200.0, 100.0, BASE_GAP));
        tick(&mut state, &idle(), 0.1);
        assert_eq!(state.obstacles[0].x, 200.0);
        // dt is clamped before fading
        assert!((state.session.game_over_alpha - MAX_FRAME_DT * GAME_OVER_FADE_RATE).abs() < 1e-6);

        for _ in 0..100 {
            tick(&mut state, &idle(), DT);
        }
        assert_eq!(state.session.game_over_alpha, 1.0);
    }

    #[test]
    fn test_restart_resets_world() {
        let mut state = armed(7);
        state.session.add_point();
        state.session.add_point();
        state.session.tokens = 4;
        state.obstacles.push(Obstacle::new(200.0, 100.0, BASE_GAP));
        state.avatar.y = GROUND_Y;
        tick(&mut state, &idle(), DT);
        assert_eq!(state.session.phase, GamePhase::GameOver);

        let events = tick(&mut state, &trigger(), 0.0);
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert_eq!(state.session.phase, GamePhase::Playing);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.tokens, 0);
        assert_eq!(state.session.best_score, 2);
        assert_eq!(state.session.game_over_alpha, 0.0);
        assert!(state.obstacles.is_empty());
        assert!(state.tokens.is_empty());
        assert_eq!(state.avatar, Avatar::default());
    }

    #[test]
    fn test_obstacle_scores_once() {
        let mut state = armed(8);
        let speed = BASE_SPEED;
        // Right edge sits just right of the avatar; the next step crosses it
        let x = AVATAR_X - OBSTACLE_WIDTH + speed / 2.0;
        state.obstacles.push(Obstacle::new(x, 0.0, LOGICAL_HEIGHT));
        state.avatar.vy = FLAP_VELOCITY;

        let events = tick(&mut state, &idle(), 0.0);
        assert_eq!(events, vec![GameEvent::Scored { score: 1 }]);
        assert!(state.obstacles[0].scored);
        assert_eq!(state.session.score, 1);
        assert_eq!(state.session.best_score, 1);

        state.avatar.vy = FLAP_VELOCITY;
        let events = tick(&mut state, &idle(), 0.0);
        assert!(events.is_empty());
        assert_eq!(state.session.score, 1);
    }

    #[test]
    fn test_obstacle_spawns_on_timer() {
        let mut state = armed(9);
        state.timers.obstacle = 0.0;
        state.timers.token_threshold = f32::MAX;
        let mut frames = 0;
        while state.obstacles.is_empty() {
            state.avatar = Avatar::default();
            tick(&mut state, &idle(), DT);
            frames += 1;
            assert!(frames < 200);
        }
        assert!(frames >= OBSTACLE_SPAWN_FRAMES as i32 - 1);
        assert_eq!(state.obstacles[0].gap, BASE_GAP);
        assert_eq!(state.timers.obstacle, 0.0);
    }

    #[test]
    fn test_offscreen_entities_removed() {
        let mut state = armed(10);
        state.obstacles.push(Obstacle::new(-OBSTACLE_WIDTH + 0.5, 0.0, LOGICAL_HEIGHT));
        state.tokens.push(BonusToken {
            pos: Vec2::new(-TOKEN_RADIUS + 0.5, 40.0),
            radius: TOKEN_RADIUS,
            angle: 0.0,
            angular_vel: 0.1,
        });
        tick(&mut state, &idle(), 0.0);
        assert!(state.obstacles.is_empty());
        assert!(state.tokens.is_empty());
    }

    #[test]
    fn test_token_collected() {
        let mut state = armed(11);
        state.tokens.push(BonusToken {
            pos: Vec2::new(AVATAR_X + 10.0, AVATAR_START_Y),
            radius: TOKEN_RADIUS,
            angle: 0.0,
            angular_vel: 0.02,
        });
        let events = tick(&mut state, &idle(), 0.0);
        assert!(events.contains(&GameEvent::TokenCollected { tokens: 1 }));
        assert_eq!(state.session.tokens, 1);
        assert!(state.tokens.is_empty());
    }

    #[test]
    fn test_tokens_rotate_and_scroll() {
        let mut state = armed(12);
        state.tokens.push(BonusToken {
            pos: Vec2::new(250.0, 60.0),
            radius: TOKEN_RADIUS,
            angle: 1.0,
            angular_vel: 0.03,
        });
        tick(&mut state, &idle(), 0.0);
        let token = &state.tokens[0];
        assert!((token.pos.x - (250.0 - BASE_SPEED)).abs() < 1e-5);
        assert!((token.angle - 1.03).abs() < 1e-6);
    }

    #[test]
    fn test_obstacle_hit_ends_run() {
        let mut state = armed(13);
        state.obstacles.push(Obstacle::new(AVATAR_X - OBSTACLE_WIDTH / 2.0, 300.0, BASE_GAP));
        let events = tick(&mut state, &idle(), 0.0);
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
        assert!(state.session.is_game_over());
    }

    /// One frame of a random session
    #[derive(Debug, Clone, Copy)]
    enum Step {
        Idle,
        /// Start, flap or restart
        Trigger,
        /// Put an obstacle where it will be cleared this frame
        Cross,
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            4 => Just(Step::Idle),
            2 => Just(Step::Trigger),
            1 => Just(Step::Cross),
        ]
    }

    /// Full-height opening whose right edge passes the avatar on the next step
    fn plant_crossing(state: &mut GameState) {
        let speed = state.difficulty().speed;
        let x = state.avatar.x - OBSTACLE_WIDTH + speed / 2.0;
        state.obstacles.push(Obstacle::new(x, 0.0, LOGICAL_HEIGHT));
    }

    proptest! {
        #[test]
        fn prop_ceiling_clamp(flaps in proptest::collection::vec(any::<bool>(), 1..400)) {
            let mut state = armed(21);
            for flap in flaps {
                let input = TickInput { trigger: flap };
                tick(&mut state, &input, DT);
                if state.session.phase == GamePhase::Playing {
                    prop_assert!(state.avatar.y >= state.avatar.radius);
                    if state.avatar.y == state.avatar.radius {
                        prop_assert_eq!(state.avatar.vy, 0.0);
                    }
                }
            }
        }

        #[test]
        fn prop_best_score_never_decreases(
            steps in proptest::collection::vec((step(), 0.0f32..0.05), 1..2000),
        ) {
            let mut state = GameState::new(42);
            let mut best = 0;
            let mut crossed = false;
            for (action, dt) in steps {
                let trigger = match action {
                    Step::Idle => false,
                    Step::Trigger => true,
                    Step::Cross => {
                        if state.session.phase == GamePhase::Playing {
                            plant_crossing(&mut state);
                            crossed = true;
                        }
                        false
                    }
                };
                tick(&mut state, &TickInput { trigger }, dt);
                prop_assert!(state.session.best_score >= best);
                prop_assert!(state.session.best_score >= state.session.score);
                best = state.session.best_score;
            }
            if crossed {
                prop_assert!(best > 0);
            }
        }
    }
}
