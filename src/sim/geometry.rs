//! Transform and rectangle geometry
//!
//! Positions and sizes live on an integer grid (screen space, y grows down).
//! A body's rectangle is never stored: it is derived from the transform on demand
//! so it can't drift out of sync with the position.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Placement of a body in 2D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position on the discrete grid
    pub position: IVec2,
    /// Multiplier applied to size when deriving the rectangle
    pub scale: f32,
    /// Anchor point, normalized relative to the body's size
    pub pivot: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: IVec2::ZERO,
            scale: 1.0,
            pivot: Vec2::splat(0.5),
        }
    }
}

impl Transform {
    pub fn at(position: IVec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_pivot(mut self, pivot: Vec2) -> Self {
        self.pivot = pivot;
        self
    }

    /// Translate position by an integer offset (no hooks involved)
    #[inline]
    pub fn translate(&mut self, offset: IVec2) {
        self.position += offset;
    }

    /// Rectangle covered by a body of the given size under this transform
    ///
    /// Extents are `size * scale`, and the top-left corner is the position
    /// shifted back by `extent * pivot`. Float results truncate toward zero.
    pub fn rect(&self, size: IVec2) -> Rect {
        let w = (size.x as f32 * self.scale) as i32;
        let h = (size.y as f32 * self.scale) as i32;
        Rect {
            x: (self.position.x as f32 - w as f32 * self.pivot.x) as i32,
            y: (self.position.y as f32 - h as f32 * self.pivot.y) as i32,
            w,
            h,
        }
    }
}

/// Axis-aligned rectangle (top-left corner + extents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Whether the two rectangles share any area
    ///
    /// Empty rectangles never intersect, and rectangles that only touch along
    /// an edge don't either.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Leading edge and integer half extent along x
    #[inline]
    pub fn span_x(&self) -> (i32, i32) {
        (self.x, self.w / 2)
    }

    /// Leading edge and integer half extent along y
    #[inline]
    pub fn span_y(&self) -> (i32, i32) {
        (self.y, self.h / 2)
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_centered_pivot() {
        let t = Transform::at(IVec2::new(100, 50));
        let r = t.rect(IVec2::new(10, 20));
        assert_eq!(r, Rect::new(95, 40, 10, 20));
    }

    #[test]
    fn test_rect_respects_pivot_and_scale() {
        let mut t = Transform::at(IVec2::new(640, 720)).with_pivot(Vec2::new(0.5, 1.0));
        assert_eq!(t.rect(IVec2::new(1280, 10)), Rect::new(0, 710, 1280, 10));

        t.scale = 2.0;
        assert_eq!(t.rect(IVec2::new(1280, 10)), Rect::new(-640, 700, 2560, 20));
    }

    #[test]
    fn test_default_scale_is_identity() {
        let t = Transform::default();
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.rect(IVec2::new(8, 8)).w, 8);
    }

    #[test]
    fn test_translate() {
        let mut t = Transform::at(IVec2::new(3, 4));
        t.translate(IVec2::new(-5, 2));
        assert_eq!(t.position, IVec2::new(-2, 6));
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(5, 5, 10, 10)));
        assert!(a.intersects(&Rect::new(2, 2, 2, 2)));
        // Touching edges are not an intersection
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
        assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
        // Empty rects never intersect
        assert!(!a.intersects(&Rect::new(5, 5, 0, 3)));
    }

    #[test]
    fn test_center_and_extent() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.center(), IVec2::new(25, 40));
        assert_eq!(r.span_x(), (10, 15));
        assert_eq!(r.span_y(), (20, 20));
    }
}
