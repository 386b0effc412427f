//! Axis-aligned bounding box

use serde::{Deserialize, Serialize};
use super::Vec2;

/// Element bounding box as reported by `getBoundingClientRect`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Center point
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Half width and half height
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// True if the box has no area (detached or `display: none` elements)
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Offset of `point` from the center, normalized so the edges map to ±1.
    ///
    /// Returns `None` for degenerate boxes.
    pub fn normalized_offset(&self, point: Vec2) -> Option<Vec2> {
        if self.is_degenerate() {
            return None;
        }
        let half = self.half_extents();
        let offset = point - self.center();
        Some(Vec2::new(offset.x / half.x, offset.y / half.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_center() {
        let r = Rect::new(10.0, 20.0, 200.0, 100.0);
        assert_eq!(r.center(), Vec2::new(110.0, 70.0));
    }

    #[test]
    fn test_normalized_offset() {
        let r = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(r.normalized_offset(Vec2::new(100.0, 50.0)), Some(Vec2::ZERO));
        assert_eq!(r.normalized_offset(Vec2::new(200.0, 0.0)), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(Rect::new(5.0, 5.0, 0.0, 40.0).normalized_offset(Vec2::ZERO), None);
    }
}
