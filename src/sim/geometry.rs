//! Axis-aligned rectangles

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in play-area coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Build a rect from its top-left corner and size
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            left: origin.x,
            right: origin.x + size.x,
            top: origin.y,
            bottom: origin.y + size.y,
        }
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        rects_overlap(self, other)
    }
}

/// Strict AABB intersection: rects that only share an edge do not overlap
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.left < b.right && a.right > b.left && a.top < b.bottom && a.bottom > b.top
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_touching_is_not_overlap() {
        let a = Rect::new(0.0, 10.0, 0.0, 10.0);
        let b = Rect::new(10.0, 20.0, 0.0, 10.0);
        assert!(!rects_overlap(&a, &b));
        assert!(!rects_overlap(&b, &a));

        // Touching along the bottom edge
        let c = Rect::new(0.0, 10.0, 10.0, 20.0);
        assert!(!rects_overlap(&a, &c));
    }

    #[test]
    fn test_interior_overlap() {
        let a = Rect::new(0.0, 10.0, 0.0, 10.0);
        let b = Rect::new(9.0, 20.0, 9.0, 20.0);
        assert!(rects_overlap(&a, &b));
        assert!(b.overlaps(&a));

        // Containment counts as overlap
        let inner = Rect::new(2.0, 4.0, 2.0, 4.0);
        assert!(rects_overlap(&a, &inner));
    }

    #[test]
    fn test_disjoint() {
        let a = Rect::new(0.0, 10.0, 0.0, 10.0);
        let b = Rect::new(30.0, 40.0, 0.0, 10.0);
        assert!(!rects_overlap(&a, &b));
    }

    #[test]
    fn test_from_origin_size() {
        let r = Rect::from_origin_size(Vec2::new(5.0, -50.0), Vec2::splat(45.0));
        assert_eq!(r, Rect::new(5.0, 50.0, -50.0, -5.0));
    }
}
