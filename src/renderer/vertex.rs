//! Color type shared by draw commands

/// Linear RGBA, 0..=1
pub type Color = [f32; 4];

/// Opaque color from 8-bit channels
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// CSS `rgba()` string for a color
pub fn css(color: Color) -> String {
    let [r, g, b, a] = color;
    format!(
        "rgba({}, {}, {}, {})",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        a
    )
}

/// Colors for game elements
pub mod colors {
    use super::{Color, rgb};

    /// Sky fill when the background image is missing
    pub const SKY: Color = rgb(0x6f, 0xc3, 0xf7);
    pub const GROUND: Color = rgb(0xde, 0xd8, 0x95);
    pub const GROUND_EDGE: Color = rgb(0xb9, 0xa9, 0x6b);
    /// Token fallback disc
    pub const TOKEN: Color = rgb(0xff, 0xd7, 0x00);
    /// Avatar fallback disc
    pub const AVATAR: Color = rgb(0xff, 0x6b, 0x6b);
    pub const GAME_OVER_TITLE: Color = rgb(0xff, 0x33, 0x00);
    pub const GAME_OVER_HINT: Color = rgb(0x00, 0x00, 0x00);
}
