//! 2D canvas surface
//!
//! Executes draw commands on a `CanvasRenderingContext2d` whose transform
//! maps logical units to backing-store pixels (see `platform::viewport`).

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::vertex::css;
use super::{DrawCommand, Sprite, Surface};
use crate::consts::LOGICAL_WIDTH;
use crate::platform::PlatformError;

const FONT_FAMILY: &str = "'Poppins', sans-serif";

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    images: HashMap<Sprite, HtmlImageElement>,
}

impl CanvasSurface {
    /// Grab the 2D context and start loading every sprite
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, PlatformError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(PlatformError::from_js)?
            .ok_or(PlatformError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PlatformError::NoContext)?;

        let mut images = HashMap::new();
        for sprite in Sprite::ALL {
            match load_image(sprite.path()) {
                Ok(img) => {
                    images.insert(sprite, img);
                }
                Err(e) => log::warn!("Could not create image for {:?}: {}", sprite, e),
            }
        }

        Ok(Self { ctx, images })
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

fn load_image(src: &str) -> Result<HtmlImageElement, PlatformError> {
    let img = HtmlImageElement::new().map_err(PlatformError::from_js)?;

    let path = src.to_string();
    let on_load = Closure::<dyn FnMut()>::new(move || log::info!("Loaded: {}", path));
    img.set_onload(Some(on_load.as_ref().unchecked_ref()));
    on_load.forget();

    let path = src.to_string();
    let on_error =
        Closure::<dyn FnMut()>::new(move || log::error!("Image failed to load: {}", path));
    img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();

    img.set_src(src);
    Ok(img)
}

impl Surface for CanvasSurface {
    fn sprite_ready(&self, sprite: Sprite) -> bool {
        self.images
            .get(&sprite)
            .is_some_and(|img| img.complete() && img.natural_width() > 0)
    }

    fn draw(&mut self, cmd: &DrawCommand) {
        let ctx = &self.ctx;
        match cmd {
            DrawCommand::FillRect { pos, size, color } => {
                ctx.set_fill_style_str(&css(*color));
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCommand::Line { from, to, color } => {
                ctx.set_stroke_style_str(&css(*color));
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(&css(*color));
                ctx.begin_path();
                let _ = ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.fill();
            }
            DrawCommand::Sprite {
                sprite,
                at,
                rotation,
                flip_y,
                offset,
                size,
            } => {
                let Some(img) = self.images.get(sprite) else {
                    return;
                };
                ctx.save();
                let _ = ctx.translate(at.x as f64, at.y as f64);
                if *rotation != 0.0 {
                    let _ = ctx.rotate(*rotation as f64);
                }
                if *flip_y {
                    let _ = ctx.scale(1.0, -1.0);
                }
                let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    offset.x as f64,
                    offset.y as f64,
                    size.x as f64,
                    size.y as f64,
                );
                ctx.restore();
            }
            DrawCommand::Text {
                text,
                px,
                y,
                color,
                alpha,
                glow,
            } => {
                ctx.save();
                ctx.set_global_alpha(*alpha as f64);
                ctx.set_font(&format!("bold {}px {}", px, FONT_FAMILY));
                let fill = css(*color);
                ctx.set_fill_style_str(&fill);
                ctx.set_text_align("center");
                if let Some(blur) = glow {
                    ctx.set_shadow_color(&fill);
                    ctx.set_shadow_blur(*blur as f64);
                }
                let _ = ctx.fill_text(text, LOGICAL_WIDTH as f64 / 2.0, *y as f64);
                ctx.restore();
            }
        }
    }
}
