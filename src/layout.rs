//! Viewport sizing
//!
//! The playfield is sized from the window and the heights of the HUD and
//! footer chrome around it. The resulting scale multiplies every size,
//! spacing and speed in the simulation so gameplay is resolution-independent.

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_LAYOUT_SCALE, REFERENCE_HEIGHT, REFERENCE_WIDTH};

const MAX_WIDTH: f32 = 960.0;
const MAX_HEIGHT: f32 = 600.0;
const MIN_HEIGHT: f32 = 360.0;
const MAX_ASPECT: f32 = 1.6;
const WIDTH_FRACTION: f32 = 0.96;
const NARROW_WINDOW: f32 = 520.0;
const NARROW_PADDING: f32 = 28.0;
const WIDE_PADDING: f32 = 48.0;

/// Playfield size in pixels plus the uniform resolution scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl Viewport {
    /// Viewport of the given size with the scale derived from it
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scale: scale_for(width, height),
        }
    }

    /// The reference 960x600 playfield (scale 1)
    pub fn reference() -> Self {
        Self::new(REFERENCE_WIDTH, REFERENCE_HEIGHT)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::reference()
    }
}

/// Heights of the page elements stacked around the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Chrome {
    pub hud_height: f32,
    pub footer_height: f32,
}

/// Resolution scale for a playfield size
pub fn scale_for(width: f32, height: f32) -> f32 {
    (width / REFERENCE_WIDTH)
        .min(height / REFERENCE_HEIGHT)
        .max(MIN_LAYOUT_SCALE)
}

/// Fit the playfield into a window
pub fn fit_viewport(window_width: f32, window_height: f32, chrome: Chrome) -> Viewport {
    let padding = if window_width <= NARROW_WINDOW {
        NARROW_PADDING
    } else {
        WIDE_PADDING
    };
    let available_height =
        window_height - chrome.hud_height - chrome.footer_height - padding;
    let available_width = MAX_WIDTH.min((window_width * WIDTH_FRACTION).floor());

    let height = available_height.floor().min(MAX_HEIGHT).max(MIN_HEIGHT);
    let width = available_width.min((height * MAX_ASPECT).floor());

    Viewport::new(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_window_hits_maximum() {
        let vp = fit_viewport(1920.0, 1080.0, Chrome::default());
        assert_eq!(vp.width, 960.0);
        assert_eq!(vp.height, 600.0);
        assert_eq!(vp.scale, 1.0);
    }

    #[test]
    fn test_chrome_reduces_height() {
        let chrome = Chrome {
            hud_height: 60.0,
            footer_height: 40.0,
        };
        let vp = fit_viewport(1400.0, 600.0, chrome);
        // 600 - 60 - 40 - 48 = 452
        assert_eq!(vp.height, 452.0);
        assert_eq!(vp.width, (452.0f32 * 1.6).floor());
    }

    #[test]
    fn test_short_window_keeps_minimum_height() {
        let vp = fit_viewport(1000.0, 200.0, Chrome::default());
        assert_eq!(vp.height, 360.0);
    }

    #[test]
    fn test_narrow_window_scale_is_clamped() {
        let vp = fit_viewport(320.0, 640.0, Chrome::default());
        // 320 * 0.96 = 307.2 -> 307
        assert_eq!(vp.width, 307.0);
        assert!(vp.scale >= MIN_LAYOUT_SCALE);
        assert_eq!(vp.scale, MIN_LAYOUT_SCALE);
    }

    #[test]
    fn test_narrow_window_uses_small_padding() {
        let vp = fit_viewport(500.0, 500.0, Chrome::default());
        // 500 - 28 = 472; wide padding would leave 452
        assert_eq!(vp.height, 472.0);
        assert_eq!(vp.width, 480.0);
        assert_eq!(vp.scale, 0.5);
    }
}
