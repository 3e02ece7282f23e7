//! Colors for game elements

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` string for canvas styles
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Game palette
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(5, 6, 13);
    pub const STAR: Color = Color::rgb(190, 220, 255);
    pub const PLAYER_GLOW: Color = Color::rgba(125, 255, 106, 0.35);
    pub const PLAYER_RING: Color = Color::rgba(125, 255, 106, 0.9);
    pub const ENEMY_RING: Color = Color::rgba(0, 240, 255, 0.6);
    pub const PLAYER_BULLET: Color = Color::rgba(255, 46, 159, 0.9);
    pub const ENEMY_BULLET: Color = Color::rgba(255, 160, 60, 0.9);
    pub const ENEMY_EXPLOSION: Color = Color::rgba(0, 240, 255, 0.9);
    pub const PLAYER_EXPLOSION: Color = Color::rgba(255, 46, 159, 0.9);
    pub const PICKUP_RAPID: Color = Color::rgba(125, 255, 106, 0.95);
    pub const PICKUP_BIG: Color = Color::rgba(0, 240, 255, 0.95);
    pub const PICKUP_TRIPLE: Color = Color::rgba(255, 46, 159, 0.95);
    pub const PICKUP_FAST: Color = Color::rgba(255, 160, 60, 0.95);
    pub const PICKUP_PIERCE: Color = Color::rgba(190, 220, 255, 0.95);
    pub const PICKUP_RING: Color = Color::rgba(255, 255, 255, 0.6);
    pub const PICKUP_GLYPH: Color = Color::rgb(7, 16, 24);
    pub const OVERLAY: Color = Color::rgba(5, 6, 13, 0.65);
    pub const OVERLAY_TEXT: Color = Color::rgb(230, 241, 255);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css() {
        assert_eq!(colors::OVERLAY.css(), "rgba(5, 6, 13, 0.65)");
        assert_eq!(colors::STAR.with_alpha(0.5).css(), "rgba(190, 220, 255, 0.5)");
    }
}
