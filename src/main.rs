//! Skygap entry point
//!
//! In the browser this wires the canvas, HUD, audio and input to the game and
//! starts the animation-frame loop. Natively it plays a headless session with
//! the autopilot and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, Window};

    use skygap::audio::WebAudio;
    use skygap::clock::FrameScheduler;
    use skygap::hud::DomHud;
    use skygap::platform::viewport::Viewport;
    use skygap::platform::{PlatformError, input, splash};
    use skygap::renderer::CanvasSurface;
    use skygap::{Game, Settings};

    const CANVAS_ID: &str = "game";

    /// Frames delivered by `requestAnimationFrame`
    struct AnimationFrames {
        window: Window,
    }

    impl FrameScheduler for AnimationFrames {
        fn request_frame(&self, on_frame: Box<dyn FnOnce(f64)>) {
            let closure = Closure::once(move |time: f64| on_frame(time));
            if let Err(e) = self
                .window
                .request_animation_frame(closure.as_ref().unchecked_ref())
            {
                log::error!("requestAnimationFrame failed: {:?}", e);
            }
            closure.forget();
        }
    }

    pub fn run() -> Result<(), PlatformError> {
        let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
        let document = window.document().ok_or(PlatformError::NoWindow)?;

        let settings = Settings::load();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or(PlatformError::MissingElement(CANVAS_ID))?
            .dyn_into()
            .map_err(|_| PlatformError::MissingElement(CANVAS_ID))?;

        let surface = CanvasSurface::new(&canvas)?;
        Viewport::for_dpr(window.device_pixel_ratio()).apply(&canvas, surface.context());

        // Re-scale when the window moves between displays or zooms
        {
            let canvas = canvas.clone();
            let ctx = surface.context().clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                if let Some(window) = web_sys::window() {
                    Viewport::for_dpr(window.device_pixel_ratio()).apply(&canvas, &ctx);
                }
            });
            window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
                .map_err(PlatformError::from_js)?;
            closure.forget();
        }

        let hud = DomHud::new(&document);
        let audio = WebAudio::new(&settings);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, surface, audio, hud)));
        log::info!("Game initialized with seed: {}", seed);

        let trigger = Rc::clone(&game);
        input::install(
            &window,
            &document,
            Rc::new(move || trigger.borrow_mut().trigger()),
        )?;

        splash::run(&document, settings.show_splash);

        Game::run(game, Rc::new(AnimationFrames { window }));
        log::info!("Skygap running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
    }
    log::info!("Skygap starting...");

    if let Err(e) = web::run() {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;

    use skygap::Game;
    use skygap::audio::NullAudio;
    use skygap::autopilot;
    use skygap::clock::ManualScheduler;
    use skygap::hud::NullHud;
    use skygap::renderer::NullSurface;
    use skygap::sim::GamePhase;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Play one autopilot session of at most `max_frames` frames
    pub fn run(seed: u64, max_frames: u32) {
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            NullSurface::default(),
            NullAudio,
            NullHud,
        )));
        let scheduler = Rc::new(ManualScheduler::new());
        Game::run(Rc::clone(&game), Rc::clone(&scheduler));

        game.borrow_mut().trigger();
        let mut now = 0.0;
        let mut frames = 0;
        while frames < max_frames && game.borrow().is_running() {
            let (phase, flap) = {
                let g = game.borrow();
                (g.phase(), autopilot::should_flap(g.state()))
            };
            if phase == GamePhase::GameOver {
                game.borrow_mut().stop();
            } else if flap {
                game.borrow_mut().trigger();
            }

            now += FRAME_MS;
            if !scheduler.fire(now) {
                break;
            }
            frames += 1;
        }

        let g = game.borrow();
        let session = &g.state().session;
        log::info!(
            "Session over after {} frames ({:?}): score {} best {} tokens {}, {} draw commands",
            frames,
            session.phase,
            session.score,
            session.best_score,
            session.tokens,
            g.surface().commands
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Skygap (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` for the game");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);
    headless::run(seed, 60 * 60 * 5);
}
