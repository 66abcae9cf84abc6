//! Input mapping
//!
//! Every input device maps to the same trigger action. Duplicate triggers
//! within one frame collapse into one, so listeners do not debounce.

/// Keyboard codes that count as a trigger
pub const TRIGGER_KEYS: [&str; 2] = ["Space", "ArrowUp"];

pub fn is_trigger_key(code: &str) -> bool {
    TRIGGER_KEYS.contains(&code)
}

/// Hook keyboard, mouse and touch up to `on_trigger`
///
/// Listens on the window plus the start screen (if present), which swallows
/// its own events so the page does not scroll or zoom.
#[cfg(target_arch = "wasm32")]
pub fn install(
    window: &web_sys::Window,
    document: &web_sys::Document,
    on_trigger: std::rc::Rc<dyn Fn()>,
) -> Result<(), super::PlatformError> {
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{AddEventListenerOptions, Event, EventTarget, KeyboardEvent};

    use super::PlatformError;

    fn listen(
        target: &EventTarget,
        kind: &str,
        passive: bool,
        handler: Closure<dyn FnMut(Event)>,
    ) -> Result<(), PlatformError> {
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                handler.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(PlatformError::from_js)?;
        handler.forget();
        Ok(())
    }

    // Keyboard
    {
        let on_trigger = Rc::clone(&on_trigger);
        let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if is_trigger_key(&key.code()) {
                event.prevent_default();
                on_trigger();
            }
        });
        listen(window, "keydown", false, handler)?;
    }

    // Mouse
    {
        let on_trigger = Rc::clone(&on_trigger);
        let handler = Closure::<dyn FnMut(Event)>::new(move |_event: Event| on_trigger());
        listen(window, "mousedown", true, handler)?;
    }

    // Touch (non-passive so we can stop scrolling)
    {
        let on_trigger = Rc::clone(&on_trigger);
        let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            on_trigger();
        });
        listen(window, "touchstart", false, handler)?;
    }

    if let Some(start) = document.get_element_by_id("start-screen") {
        for kind in ["mousedown", "touchstart"] {
            let on_trigger = Rc::clone(&on_trigger);
            let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                event.prevent_default();
                on_trigger();
            });
            listen(&start, kind, false, handler)?;
        }
    }

    Ok(())
}
