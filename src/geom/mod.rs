mod batch;
mod cone;
mod core;
mod predicates;
mod render;

pub use cone::{Cone, ConeError, ConeKind, ConeTolerance, SectorSide, SegmentPair};
pub use core::{Point2, Segment2, Tolerance, Vec2};
pub use predicates::{ccw, cross2, is_left};
pub use render::{BoundaryPolygon, DEFAULT_RAY_LENGTH};

#[cfg(test)]
mod tests;
