//! Recording surface
//!
//! Stores every draw call as a `DrawCommand`. Used by tests to inspect a
//! frame and by the native build, which has no window to paint.

use glam::Vec2;

use super::{Color, RenderSurface};
use crate::assets::ImageId;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        line_width: f32,
        color: Color,
    },
    Glow {
        center: Vec2,
        inner: f32,
        outer: f32,
        color: Color,
    },
    PushClip {
        center: Vec2,
        radius: f32,
    },
    PopClip,
    Image {
        image: ImageId,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        size_px: f32,
        color: Color,
    },
}

/// A surface that records instead of painting
#[derive(Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of image draws of the given image
    pub fn image_count(&self, id: ImageId) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { image, .. } if *image == id))
            .count()
    }

    /// All text drawn this frame
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Rectangles filled with `color`
    pub fn rects_of(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { color: fill, .. } if *fill == color))
            .count()
    }
}

impl RenderSurface for DrawList {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            line_width,
            color,
        });
    }

    fn fill_glow(&mut self, center: Vec2, inner: f32, outer: f32, color: Color) {
        self.commands.push(DrawCommand::Glow {
            center,
            inner,
            outer,
            color,
        });
    }

    fn push_circle_clip(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::PushClip { center, radius });
    }

    fn pop_clip(&mut self) {
        self.commands.push(DrawCommand::PopClip);
    }

    fn draw_image(&mut self, image: ImageId, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::Image { image, x, y, w, h });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size_px,
            color,
        });
    }
}
