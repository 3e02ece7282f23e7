//! Rendering module
//!
//! The scene is painted through the `RenderSurface` trait: a small set of
//! canvas-style primitives. The browser build draws onto a 2D canvas; tests
//! and headless runs record the calls instead.

pub mod color;
pub mod recorder;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::assets::ImageId;

pub use color::{Color, colors};
pub use recorder::{DrawCommand, DrawList};
pub use scene::draw_scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

/// Drawing primitives the scene needs
pub trait RenderSurface {
    /// Wipe the whole surface
    fn clear(&mut self, width: f32, height: f32);
    /// Fill an axis-aligned rectangle given its top-left corner
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color);
    /// Radial gradient from `color` at `inner` to transparent at `outer`
    fn fill_glow(&mut self, center: Vec2, inner: f32, outer: f32, color: Color);
    /// Restrict drawing to a circle until the matching `pop_clip`
    fn push_circle_clip(&mut self, center: Vec2, radius: f32);
    fn pop_clip(&mut self);
    /// Draw an image into a rectangle given its top-left corner
    fn draw_image(&mut self, image: ImageId, x: f32, y: f32, w: f32, h: f32);
    /// Bold text centered on `pos`
    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, color: Color);
}
