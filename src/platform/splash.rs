//! Splash and start screen sequencing
//!
//! On load the start prompt is hidden while the splash animation plays.
//! After the animation and a short hold the splash fades out, then it is
//! removed and the start prompt revealed. Purely cosmetic: the game accepts
//! triggers regardless.

/// Delay before the splash animation starts
pub const ANIM_DELAY_MS: u32 = 250;
pub const ANIM_DURATION_MS: u32 = 1200;
/// Hold after the animation finishes
pub const HOLD_MS: u32 = 1000;
pub const FADE_MS: u32 = 500;
/// Slack after the fade before removing the splash
pub const REVEAL_SLACK_MS: u32 = 20;

/// Class hiding the start prompt
pub const HIDE_CLASS: &str = "hide";
/// Marks a start prompt the player already used; the reveal leaves it hidden
pub const DISMISSED_CLASS: &str = "dismissed";

/// Where the sequence is at a given time since load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashStage {
    Showing,
    Fading,
    /// Splash gone, start prompt visible
    Revealed,
}

/// Time the fade starts
pub const fn fade_at_ms() -> u32 {
    ANIM_DELAY_MS + ANIM_DURATION_MS + HOLD_MS
}

/// Time the start prompt appears
pub const fn reveal_at_ms() -> u32 {
    fade_at_ms() + FADE_MS + REVEAL_SLACK_MS
}

pub fn stage_at(elapsed_ms: u32) -> SplashStage {
    if elapsed_ms < fade_at_ms() {
        SplashStage::Showing
    } else if elapsed_ms < reveal_at_ms() {
        SplashStage::Fading
    } else {
        SplashStage::Revealed
    }
}

/// Put the page into `stage`
#[cfg(target_arch = "wasm32")]
fn apply(stage: SplashStage, splash: &web_sys::HtmlElement, start: Option<&web_sys::Element>) {
    let style = splash.style();
    match stage {
        SplashStage::Showing => {
            if let Some(start) = start {
                let _ = start.class_list().add_1(HIDE_CLASS);
            }
        }
        SplashStage::Fading => {
            let _ = style.set_property("transition", &format!("opacity {}ms ease", FADE_MS));
            let _ = style.set_property("opacity", "0");
        }
        SplashStage::Revealed => {
            let _ = style.set_property("display", "none");
            if let Some(start) = start {
                if !start.class_list().contains(DISMISSED_CLASS) {
                    let _ = start.class_list().remove_1(HIDE_CLASS);
                }
            }
            log::debug!("Start screen revealed");
        }
    }
}

/// Run the sequence against `#splash-screen` and `#start-screen`
#[cfg(target_arch = "wasm32")]
pub fn run(document: &web_sys::Document, show_splash: bool) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::HtmlElement;

    let start = document.get_element_by_id("start-screen");
    let splash = document
        .get_element_by_id("splash-screen")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    let Some(splash) = splash else {
        return;
    };
    if !show_splash {
        apply(SplashStage::Revealed, &splash, start.as_ref());
        return;
    }
    apply(stage_at(0), &splash, start.as_ref());

    let Some(window) = web_sys::window() else {
        return;
    };
    for at in [fade_at_ms(), reveal_at_ms()] {
        let splash = splash.clone();
        let start = start.clone();
        let step = Closure::once(move || apply(stage_at(at), &splash, start.as_ref()));
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            step.as_ref().unchecked_ref(),
            at as i32,
        );
        step.forget();
    }
}
