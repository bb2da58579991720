//! Planar orientation predicates.
//!
//! All predicates are strict: a collinear triple is neither counter-clockwise
//! nor left of the line.

use super::core::Point2;

/// Twice the signed area of the triangle `p, q, r`, i.e. `(q - p) × (r - p)`.
#[must_use]
pub fn cross2(p: Point2, q: Point2, r: Point2) -> f64 {
    q.sub_point(p).cross(r.sub_point(p))
}

/// `true` when `p → q → r` turns counter-clockwise.
#[must_use]
pub fn ccw(p: Point2, q: Point2, r: Point2) -> bool {
    cross2(p, q, r) > 0.0
}

/// `true` when `r` lies strictly left of the directed line `p → q`.
#[must_use]
pub fn is_left(p: Point2, q: Point2, r: Point2) -> bool {
    cross2(p, q, r) > 0.0
}
