//! Drawable outline of a cone for external plotting.

use serde::Serialize;

use super::cone::{Cone, ConeKind};
use super::core::{Point2, Segment2};
use super::predicates::ccw;

/// Ray length used when the caller passes a non-positive or non-finite one.
pub const DEFAULT_RAY_LENGTH: f64 = 25.0;

/// Geometry needed to draw a cone. Holds vertices only; styling is up to the
/// consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryPolygon {
    /// Closed ring, first vertex repeated at the end.
    pub vertices: Vec<Point2>,
    pub right_ray: Option<Segment2>,
    pub left_ray: Option<Segment2>,
    /// Reconciled source segments, `[seg0, seg1]`.
    pub segments: Option<[Segment2; 2]>,
}

impl BoundaryPolygon {
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.vertices.len() > 1 && self.vertices.first() == self.vertices.last()
    }
}

impl Cone {
    /// Outline of the cone with rays drawn `length` units from the apex.
    ///
    /// A cone with an apex is drawn as the triangle apex, apex + length·u,
    /// apex + length·v. A degenerate segment cone is drawn as the
    /// quadrilateral spanned by its four segment endpoints.
    #[must_use]
    pub fn boundary_polygon(&self, length: f64) -> BoundaryPolygon {
        let length = if length.is_finite() && length > 0.0 {
            length
        } else {
            DEFAULT_RAY_LENGTH
        };

        let rays = self.apex().map(|apex| {
            (
                Segment2::new(apex, apex + self.u() * length),
                Segment2::new(apex, apex + self.v() * length),
            )
        });

        let vertices = match self.kind() {
            ConeKind::Vectors { apex } | ConeKind::Segments { apex, .. } => vec![
                *apex,
                *apex + self.u() * length,
                *apex + self.v() * length,
                *apex,
            ],
            ConeKind::DegenerateSegments { pair } => {
                let (a0, b0) = (pair.seg0.a, pair.seg0.b);
                let (a1, b1) = (pair.seg1.a, pair.seg1.b);
                if ccw(a0, b0, b1) ^ ccw(b0, b1, a1) {
                    vec![b0, a1, b1, a0, b0]
                } else {
                    vec![b0, b1, a1, a0, b0]
                }
            }
        };

        BoundaryPolygon {
            vertices,
            right_ray: rays.map(|(right, _)| right),
            left_ray: rays.map(|(_, left)| left),
            segments: self.segments().map(|(seg0, seg1)| [seg0, seg1]),
        }
    }
}
