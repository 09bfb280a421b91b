//! Overlap resolution between axis-aligned rectangles
//!
//! Collision here means overlap: after the ball moves we test rectangles, and
//! when two overlap we push the ball back out along a single, known axis until
//! the rectangles are exactly tangent. Which axis is decided by the caller from
//! the kind of body that was hit (paddles on X, obstacles on Y), never from the
//! overlap shape.
//!
//! This is discrete-time correction, not continuous collision detection. A
//! fast ball (or a thin collider) can step clean through a body in one frame.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Axis (or axes) along which an overlap gets corrected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Both,
}

impl Axis {
    #[inline]
    pub fn has_x(self) -> bool {
        matches!(self, Axis::X | Axis::Both)
    }

    #[inline]
    pub fn has_y(self) -> bool {
        matches!(self, Axis::Y | Axis::Both)
    }
}

/// Sign with zero counted as positive
#[inline]
fn sign(value: i32) -> i32 {
    if value >= 0 { 1 } else { -1 }
}

/// Shift along one axis that makes two overlapping spans tangent
///
/// Spans are given as leading edge + half extent. The result moves the current
/// span away from the other span's center, keeping the side it was on.
pub fn overlap_shift(
    current_pos: i32,
    current_extent: i32,
    other_pos: i32,
    other_extent: i32,
) -> i32 {
    let current_center = current_pos + current_extent;
    let other_center = other_pos + other_extent;

    let current_offset = current_center - other_center;
    // Center distance at which the spans just touch
    let min_offset = current_extent + other_extent;

    sign(current_offset) * (min_offset - current_offset.abs()).abs()
}

/// Offset to apply to the `current` body so it no longer overlaps `other`
///
/// The shift is meant to be applied straight to the transform, skipping any
/// post-move hook, so resolution never re-triggers collision checks.
pub fn resolve_overlap(current: &Rect, other: &Rect, axis: Axis) -> IVec2 {
    let mut shift = IVec2::ZERO;

    if axis.has_x() {
        let (pos, extent) = current.span_x();
        let (other_pos, other_extent) = other.span_x();
        shift.x = overlap_shift(pos, extent, other_pos, other_extent);
    }
    if axis.has_y() {
        let (pos, extent) = current.span_y();
        let (other_pos, other_extent) = other.span_y();
        shift.y = overlap_shift(pos, extent, other_pos, other_extent);
    }

    shift
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn shifted(rect: Rect, by: IVec2) -> Rect {
        Rect::new(rect.x + by.x, rect.y + by.y, rect.w, rect.h)
    }

    #[test]
    fn test_overlap_shift_pushes_left() {
        // Ball center 100 (extent 5), paddle center 110 (extent 10)
        assert_eq!(overlap_shift(95, 5, 100, 10), -5);
    }

    #[test]
    fn test_overlap_shift_pushes_right() {
        // Ball center 120, paddle center 110
        assert_eq!(overlap_shift(115, 5, 100, 10), 5);
    }

    #[test]
    fn test_overlap_shift_zero_offset_goes_positive() {
        assert_eq!(overlap_shift(5, 5, 0, 10), 15);
    }

    #[test]
    fn test_resolve_y_only() {
        let ball = Rect::new(643, 703, 10, 10);
        let border = Rect::new(0, 710, 1280, 10);
        let shift = resolve_overlap(&ball, &border, Axis::Y);
        assert_eq!(shift, IVec2::new(0, -3));

        let resolved = shifted(ball, shift);
        assert_eq!(resolved.bottom(), border.y);
        assert!(!resolved.intersects(&border));
    }

    #[test]
    fn test_resolve_x_only() {
        let ball = Rect::new(38, 300, 10, 10);
        let paddle = Rect::new(35, 250, 10, 100);
        let shift = resolve_overlap(&ball, &paddle, Axis::X);
        assert_eq!(shift, IVec2::new(7, 0));
        assert_eq!(shifted(ball, shift).x, paddle.right());
    }

    #[test]
    fn test_resolve_both() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(4, 6, 10, 10);
        let shift = resolve_overlap(&a, &b, Axis::Both);
        assert_eq!(shift, IVec2::new(-6, -4));
    }

    proptest! {
        #[test]
        fn prop_resolution_is_tangent_and_keeps_side(
            cx in 0i32..200,
            half_w in 1i32..20,
            other_half_w in 1i32..40,
            gap in 1i32..60,
            left in any::<bool>(),
        ) {
            // Even widths so centers and half extents are exact
            let other = Rect::new(cx - other_half_w, 0, other_half_w * 2, 10);
            let min_offset = half_w + other_half_w;
            let overlap = gap % min_offset;
            let offset = if left { -overlap } else { overlap.max(1) };
            let center = cx + offset;
            let current = Rect::new(center - half_w, 0, half_w * 2, 10);
            prop_assume!(current.intersects(&other));

            let before = current.center().x - other.center().x;
            let shift = resolve_overlap(&current, &other, Axis::X);
            let after_rect = shifted(current, shift);
            let after = after_rect.center().x - other.center().x;

            prop_assert!(!after_rect.intersects(&other));
            prop_assert_eq!(after.abs(), min_offset);
            prop_assert_eq!(sign(before), sign(after));
            prop_assert_eq!(shift.y, 0);
        }
    }
}
