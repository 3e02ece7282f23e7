//! Canvas 2D surface
//!
//! Paints onto a `CanvasRenderingContext2d`. Canvas calls that return a
//! `Result` only fail on invalid arguments; the first failure is logged and
//! drawing carries on.

use std::f64::consts::TAU;

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::{Color, RenderSurface};
use crate::assets::ImageId;

const FONT_FAMILY: &str = "\"Space Grotesk\", system-ui, sans-serif";

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    player: Option<HtmlImageElement>,
    enemy: Option<HtmlImageElement>,
    reported_error: bool,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            player: None,
            enemy: None,
            reported_error: false,
        }
    }

    /// Attach a loaded image. Images that failed to load are never attached,
    /// so their avatars are simply skipped.
    pub fn set_image(&mut self, id: ImageId, image: HtmlImageElement) {
        match id {
            ImageId::Player => self.player = Some(image),
            ImageId::Enemy => self.enemy = Some(image),
        }
    }

    fn image(&self, id: ImageId) -> Option<&HtmlImageElement> {
        match id {
            ImageId::Player => self.player.as_ref(),
            ImageId::Enemy => self.enemy.as_ref(),
        }
    }

    fn check(&mut self, what: &str, result: Result<(), wasm_bindgen::JsValue>) {
        if let Err(e) = result {
            if !self.reported_error {
                log::warn!("Canvas {} failed: {:?}", what, e);
                self.reported_error = true;
            }
        }
    }

    fn circle_path(&mut self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let result = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            TAU,
        );
        self.check("arc", result);
    }
}

impl RenderSurface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.circle_path(center, radius);
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color) {
        self.circle_path(center, radius);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }

    fn fill_glow(&mut self, center: Vec2, inner: f32, outer: f32, color: Color) {
        let (x, y) = (center.x as f64, center.y as f64);
        let gradient = match self
            .ctx
            .create_radial_gradient(x, y, inner as f64, x, y, outer as f64)
        {
            Ok(g) => g,
            Err(e) => {
                self.check("gradient", Err(e));
                return;
            }
        };
        let stops = gradient
            .add_color_stop(0.0, &color.css())
            .and_then(|_| gradient.add_color_stop(1.0, &color.with_alpha(0.0).css()));
        self.check("gradient stop", stops);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.circle_path(center, outer);
        self.ctx.fill();
    }

    fn push_circle_clip(&mut self, center: Vec2, radius: f32) {
        self.ctx.save();
        self.circle_path(center, radius);
        self.ctx.clip();
    }

    fn pop_clip(&mut self) {
        self.ctx.restore();
    }

    fn draw_image(&mut self, image: ImageId, x: f32, y: f32, w: f32, h: f32) {
        let Some(img) = self.image(image) else {
            return;
        };
        let result = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img, x as f64, y as f64, w as f64, h as f64,
        );
        self.check("image", result);
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, color: Color) {
        self.ctx
            .set_font(&format!("700 {}px {}", size_px.round(), FONT_FAMILY));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&color.css());
        let result = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
        self.check("text", result);
    }
}
