//! Platform abstraction layer
//!
//! Browser glue around the game:
//! - Viewport scaling from logical units to the display
//! - Splash/start screen sequencing
//! - Input mapping to the single trigger action

pub mod input;
pub mod splash;
pub mod viewport;

/// Failures while wiring the page
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("no browser window")]
    NoWindow,

    #[error("element #{0} not found")]
    MissingElement(&'static str),

    #[error("2D canvas context unavailable")]
    NoContext,

    #[error("JS error: {0}")]
    Js(String),
}

impl PlatformError {
    /// Wrap a thrown JS value
    #[cfg(target_arch = "wasm32")]
    pub fn from_js(err: wasm_bindgen::JsValue) -> Self {
        PlatformError::Js(format!("{:?}", err))
    }
}
