//! Axis-aligned rectangle geometry
//!
//! Screen coordinates: +x right, +y down. All overlap tests are strict, so
//! rectangles that merely share an edge do not touch.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Strict horizontal overlap only
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// Point strictly inside (points on an edge are outside)
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }

    /// Closest point of the rectangle (boundary included) to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.x, self.right()),
            p.y.clamp(self.y, self.bottom()),
        )
    }

    /// Circle-vs-rectangle test via the closest point
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        center.distance_squared(self.closest_point(center)) < radius * radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Rect::new(9.0, 9.0, 10.0, 10.0)));
    }

    #[test]
    fn test_contains_point_is_strict() {
        let r = Rect::new(100.0, 100.0, 40.0, 40.0);
        assert!(r.contains_point(Vec2::new(120.0, 120.0)));
        assert!(!r.contains_point(Vec2::new(100.0, 120.0)));
        assert!(!r.contains_point(Vec2::new(120.0, 140.0)));
    }

    #[test]
    fn test_circle_overlap() {
        let r = Rect::new(0.0, 0.0, 60.0, 75.0);
        // Inside
        assert!(r.overlaps_circle(Vec2::new(30.0, 30.0), 10.0));
        // Just off the right edge
        assert!(r.overlaps_circle(Vec2::new(65.0, 30.0), 10.0));
        assert!(!r.overlaps_circle(Vec2::new(70.0, 30.0), 10.0));
        // Off the corner diagonally: distance sqrt(8^2 + 8^2) > 10
        assert!(!r.overlaps_circle(Vec2::new(68.0, 83.0), 10.0));
    }
}
