//! Axis-aligned rectangles for hit tests
//!
//! A rectangle is stored as a center plus half extents, which is how every
//! entity in the playfield is positioned.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (center + half extents)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    /// Rectangle centered on `center` with full `size`
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Strict containment: points on the boundary are outside
    pub fn contains_point(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x > min.x && point.x < max.x && point.y > min.y && point.y < max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_is_strict() {
        let rect = Rect::from_center_size(Vec2::new(100.0, 100.0), Vec2::new(40.0, 20.0));
        assert!(rect.contains_point(Vec2::new(100.0, 100.0)));
        assert!(rect.contains_point(Vec2::new(119.9, 109.9)));
        assert!(!rect.contains_point(Vec2::new(120.0, 100.0)));
        assert!(!rect.contains_point(Vec2::new(100.0, 90.0)));
    }

    #[test]
    fn test_min_max_from_size() {
        let rect = Rect::from_center_size(Vec2::new(50.0, 20.0), Vec2::new(30.0, 10.0));
        assert_eq!(rect.min(), Vec2::new(35.0, 15.0));
        assert_eq!(rect.max(), Vec2::new(65.0, 25.0));
    }
}
