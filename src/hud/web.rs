//! DOM-backed HUD

use web_sys::{Document, Element};

use super::{HudSink, HudSnapshot};
use crate::platform::splash::{DISMISSED_CLASS, HIDE_CLASS};

/// Class toggled on the token readout while it pulses
const PULSE_CLASS: &str = "tokens-pulse";

/// Writes the HUD into `#score`, `#best` and `#tokens`, and hides
/// `#start-screen` once play begins
pub struct DomHud {
    score: Option<Element>,
    best: Option<Element>,
    tokens: Option<Element>,
    start: Option<Element>,
    /// Last values written, to skip redundant DOM writes
    shown: Option<HudSnapshot>,
}

impl DomHud {
    pub fn new(document: &Document) -> Self {
        let find = |id: &str| {
            let el = document.get_element_by_id(id);
            if el.is_none() {
                log::warn!("HUD element #{} not found", id);
            }
            el
        };
        Self {
            score: find("score"),
            best: find("best"),
            tokens: find("tokens"),
            start: find("start-screen"),
            shown: None,
        }
    }
}

fn set_text(el: &Option<Element>, value: u32) {
    if let Some(el) = el {
        el.set_text_content(Some(&value.to_string()));
    }
}

impl HudSink for DomHud {
    fn update(&mut self, hud: &HudSnapshot) {
        let prev = self.shown;
        if prev.map(|p| p.score) != Some(hud.score) {
            set_text(&self.score, hud.score);
        }
        if prev.map(|p| p.best) != Some(hud.best) {
            set_text(&self.best, hud.best);
        }
        if prev.map(|p| p.tokens) != Some(hud.tokens) {
            set_text(&self.tokens, hud.tokens);
        }
        if prev.map(|p| p.tokens_pulse) != Some(hud.tokens_pulse) {
            if let Some(el) = &self.tokens {
                let _ = el.class_list().toggle_with_force(PULSE_CLASS, hud.tokens_pulse);
            }
        }
        self.shown = Some(*hud);
    }

    fn hide_start_prompt(&mut self) {
        if let Some(el) = &self.start {
            let _ = el.class_list().add_2(HIDE_CLASS, DISMISSED_CLASS);
        }
    }
}
