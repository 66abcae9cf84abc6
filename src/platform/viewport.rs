//! Viewport scaling
//!
//! The simulation always runs in logical units. The canvas backing store is
//! sized to the logical resolution times the device pixel ratio, and the 2D
//! context is scaled by the same ratio.

use crate::consts::{LOGICAL_HEIGHT, LOGICAL_WIDTH};

/// Device pixel ratios outside this range are clamped
pub const MIN_DPR: f64 = 1.0;
pub const MAX_DPR: f64 = 2.0;

/// Backing-store size and context scale for a device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub scale: f64,
}

impl Viewport {
    pub fn for_dpr(dpr: f64) -> Self {
        let scale = if dpr.is_finite() {
            dpr.clamp(MIN_DPR, MAX_DPR)
        } else {
            MIN_DPR
        };
        Self {
            width: (LOGICAL_WIDTH as f64 * scale).floor() as u32,
            height: (LOGICAL_HEIGHT as f64 * scale).floor() as u32,
            scale,
        }
    }

    /// Resize the canvas and reset the context transform
    #[cfg(target_arch = "wasm32")]
    pub fn apply(
        &self,
        canvas: &web_sys::HtmlCanvasElement,
        ctx: &web_sys::CanvasRenderingContext2d,
    ) {
        canvas.set_width(self.width);
        canvas.set_height(self.height);
        let _ = ctx.set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0);
        log::debug!("Viewport {}x{} @{}", self.width, self.height, self.scale);
    }
}
