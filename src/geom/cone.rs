//! Planar angular cones used to prune diffraction and shadowing candidates.
//!
//! A cone has an apex and two unit vectors bounding its aperture. The two
//! vectors are always stored as a right vector `u` and a left vector `v` such
//! that `u × v > 0`; the cone region is the open convex sector swept
//! counter-clockwise from `u` to `v`.
//!
//! Cones come from two sources:
//! - [`Cone::from_vectors`]: an apex and two arbitrary non-zero directions.
//! - [`Cone::from_segments`]: two directed segments; the rays through their
//!   endpoints define the aperture and the apex is where those rays meet.
//!   When the rays are parallel the cone is degenerate and membership falls
//!   back to a band test across the first segment.
//!
//! # Example
//! ```ignore
//! use raycone::geom::{Cone, Point2, Segment2};
//!
//! let seg0 = Segment2::from([[0.0, 0.0], [0.0, 1.0]]);
//! let seg1 = Segment2::from([[2.0, 0.0], [2.0, 1.0]]);
//! let cone = Cone::from_segments(seg0, seg1)?;
//! assert!(cone.contains_point(Point2::new(2.0, 0.5)));
//! ```

use std::cmp::Ordering;

use serde::Deserialize;

use super::batch::{map_batch, zip_batch};
use super::core::{Point2, Segment2, Tolerance, Vec2};
use super::predicates::{ccw, is_left};

// ============================================================================
// Errors and configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConeError {
    #[error("cone vectors must be non-zero")]
    ZeroLengthVector,
    #[error("segment {segment} has coincident endpoints")]
    CoincidentEndpoints { segment: usize },
    #[error("cone inputs must be finite")]
    NonFiniteInput,
    #[error("segment batch has {starts} start points but {ends} end points")]
    BatchLengthMismatch { starts: usize, ends: usize },
}

/// Threshold used when deciding whether a cone is degenerate.
///
/// Both construction paths use the same value. For unit `u`, `v` the apex
/// solve's determinant is `dot² - 1 = -cross²`, so the `cross` guard also
/// keeps that solve away from zero. Missing fields fall back to their
/// defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConeTolerance {
    /// `u × v` at or below this marks the cone degenerate. `u` and `v` are
    /// unit vectors, so this is independent of the input magnitudes.
    pub cross: f64,
}

impl Default for ConeTolerance {
    fn default() -> Self {
        Self {
            cross: Tolerance::CROSS.eps,
        }
    }
}

// ============================================================================
// Cone state
// ============================================================================

/// The two source segments of a cone, after orientation reconciliation.
///
/// `seg0` carries the `u` ray and `seg1` the `v` ray. `twisted` records that
/// the rays were built crosswise (`seg0.a → seg1.b`, `seg0.b → seg1.a`);
/// `inverted` that the candidate rays had to be swapped to keep `u × v > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPair {
    pub seg0: Segment2,
    pub seg1: Segment2,
    pub twisted: bool,
    pub inverted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConeKind {
    /// Built from two vectors. May still be degenerate if they were parallel.
    Vectors { apex: Point2 },
    /// Built from two segments whose rays meet at a finite apex.
    Segments { apex: Point2, pair: SegmentPair },
    /// Built from two segments whose rays are parallel; there is no apex.
    DegenerateSegments { pair: SegmentPair },
}

/// Position of a point relative to the two boundary lines of a cone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectorSide {
    /// Left of the `u` line and not left of the `v` line.
    Inside,
    /// Not left of either line: outside, past the right vector.
    BeyondRight,
    /// Left of both lines: outside, past the left vector.
    BeyondLeft,
    /// Left of the `v` line only: the reflected sector behind the apex.
    Opposite,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone {
    kind: ConeKind,
    u: Vec2,
    v: Vec2,
    dot: f64,
    cross: f64,
    degenerate: bool,
}

/// Normalized pair in counter-clockwise order.
struct Oriented {
    u: Vec2,
    v: Vec2,
    swapped: bool,
}

fn orient(a: Vec2, b: Vec2) -> Result<Oriented, ConeError> {
    let an = a.normalized().ok_or(ConeError::ZeroLengthVector)?;
    let bn = b.normalized().ok_or(ConeError::ZeroLengthVector)?;
    let cross = an.cross(bn);
    let swapped = match cross.partial_cmp(&0.0) {
        Some(Ordering::Greater) => false,
        Some(Ordering::Less) => true,
        // Collinear: the lexicographically smaller direction becomes `u`.
        _ => an.x.total_cmp(&bn.x).then(an.y.total_cmp(&bn.y)) == Ordering::Greater,
    };
    if swapped {
        Ok(Oriented { u: bn, v: an, swapped })
    } else {
        Ok(Oriented { u: an, v: bn, swapped })
    }
}

impl Default for Cone {
    /// The first quadrant: apex at the origin, `u = X`, `v = Y`.
    fn default() -> Self {
        Self {
            kind: ConeKind::Vectors { apex: Point2::ORIGIN },
            u: Vec2::X,
            v: Vec2::Y,
            dot: 0.0,
            cross: 1.0,
            degenerate: false,
        }
    }
}

impl Cone {
    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    /// Build a cone from two direction vectors and an apex.
    ///
    /// The argument order does not matter: the pair is normalized and stored
    /// so that `u × v > 0`. An exactly collinear pair stores the
    /// lexicographically smaller direction as `u`.
    pub fn from_vectors(a: Vec2, b: Vec2, apex: Point2) -> Result<Self, ConeError> {
        Self::from_vectors_with_tolerance(a, b, apex, ConeTolerance::default())
    }

    pub fn from_vectors_with_tolerance(
        a: Vec2,
        b: Vec2,
        apex: Point2,
        tol: ConeTolerance,
    ) -> Result<Self, ConeError> {
        if !a.is_finite() || !b.is_finite() || !apex.is_finite() {
            return Err(ConeError::NonFiniteInput);
        }

        let Oriented { u, v, .. } = orient(a, b)?;
        let dot = u.dot(v);
        let cross = u.cross(v);
        let degenerate = cross <= tol.cross;
        if degenerate {
            log::debug!("cone from vectors is degenerate (cross = {cross:e})");
        }

        Ok(Self {
            kind: ConeKind::Vectors { apex },
            u,
            v,
            dot,
            cross,
            degenerate,
        })
    }

    /// Build the cone whose rays pass through the endpoints of two segments.
    ///
    /// The segments are stored reconciled so that `seg0` carries the `u` ray
    /// and `seg1` the `v` ray; see [`SegmentPair`].
    pub fn from_segments(seg0: Segment2, seg1: Segment2) -> Result<Self, ConeError> {
        Self::from_segments_with_tolerance(seg0, seg1, ConeTolerance::default())
    }

    pub fn from_segments_with_tolerance(
        seg0: Segment2,
        seg1: Segment2,
        tol: ConeTolerance,
    ) -> Result<Self, ConeError> {
        if !seg0.is_finite() || !seg1.is_finite() {
            return Err(ConeError::NonFiniteInput);
        }
        if seg0.is_degenerate(Tolerance::ZERO_LENGTH) {
            return Err(ConeError::CoincidentEndpoints { segment: 0 });
        }
        if seg1.is_degenerate(Tolerance::ZERO_LENGTH) {
            return Err(ConeError::CoincidentEndpoints { segment: 1 });
        }

        let (a0, b0) = (seg0.a, seg0.b);
        let (a1, b1) = (seg1.a, seg1.b);

        // Matching turns around a0 b0 b1 a1: pair the endpoints crosswise.
        let twisted = ccw(a0, b0, b1) == ccw(b0, b1, a1);
        let (r0, r1) = if twisted {
            (b1 - a0, a1 - b0)
        } else {
            (a1 - a0, b1 - b0)
        };

        let Oriented { u, v, swapped: inverted } = orient(r0, r1)?;

        let (seg0, seg1) = match (twisted, inverted) {
            (false, false) => {
                log::debug!("cone from segments: reversing seg1");
                (seg0, seg1.reversed())
            }
            (false, true) => {
                log::debug!("cone from segments: reversing seg0");
                (seg0.reversed(), seg1)
            }
            (true, true) => {
                log::debug!("cone from segments: reversing seg0 and seg1");
                (seg0.reversed(), seg1.reversed())
            }
            (true, false) => (seg0, seg1),
        };
        let pair = SegmentPair {
            seg0,
            seg1,
            twisted,
            inverted,
        };

        let dot = u.dot(v);
        let cross = u.cross(v);
        let degenerate_cone = Self {
            kind: ConeKind::DegenerateSegments { pair },
            u,
            v,
            dot,
            cross,
            degenerate: true,
        };

        if cross <= tol.cross {
            log::debug!("cone from segments is degenerate (cross = {cross:e})");
            return Ok(degenerate_cone);
        }

        // Apex = intersection of the u line through a0 and the v line through b0.
        // With unit u, v the determinant dot² - 1 equals -cross².
        let denominator = -(cross * cross);
        let d = b0 - a0;
        let k = (d.dot(v) - dot * d.dot(u)) / denominator;
        let apex = b0 + v * k;
        if !apex.is_finite() {
            log::debug!("cone from segments: apex solve did not converge to a finite point");
            return Ok(degenerate_cone);
        }
        log::trace!("cone from segments: apex = ({}, {})", apex.x, apex.y);

        Ok(Self {
            kind: ConeKind::Segments { apex, pair },
            degenerate: false,
            ..degenerate_cone
        })
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[must_use]
    pub const fn kind(&self) -> &ConeKind {
        &self.kind
    }

    /// `None` only for a degenerate cone built from segments.
    #[must_use]
    pub fn apex(&self) -> Option<Point2> {
        match self.kind {
            ConeKind::Vectors { apex } | ConeKind::Segments { apex, .. } => Some(apex),
            ConeKind::DegenerateSegments { .. } => None,
        }
    }

    /// Right unit vector.
    #[must_use]
    pub const fn u(&self) -> Vec2 {
        self.u
    }

    /// Left unit vector.
    #[must_use]
    pub const fn v(&self) -> Vec2 {
        self.v
    }

    #[must_use]
    pub const fn dot(&self) -> f64 {
        self.dot
    }

    #[must_use]
    pub const fn cross(&self) -> f64 {
        self.cross
    }

    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    #[must_use]
    pub fn segment_pair(&self) -> Option<&SegmentPair> {
        match &self.kind {
            ConeKind::Vectors { .. } => None,
            ConeKind::Segments { pair, .. } | ConeKind::DegenerateSegments { pair } => Some(pair),
        }
    }

    /// Reconciled `(seg0, seg1)` for cones built from segments.
    #[must_use]
    pub fn segments(&self) -> Option<(Segment2, Segment2)> {
        self.segment_pair().map(|pair| (pair.seg0, pair.seg1))
    }

    #[must_use]
    pub fn is_twisted(&self) -> bool {
        self.segment_pair().is_some_and(|pair| pair.twisted)
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.segment_pair().is_some_and(|pair| pair.inverted)
    }

    // ------------------------------------------------------------------------
    // Point queries
    // ------------------------------------------------------------------------

    /// Open-sector membership. Points on either boundary ray are outside.
    #[must_use]
    pub fn contains_point(&self, p: Point2) -> bool {
        match &self.kind {
            ConeKind::DegenerateSegments { pair } => self.band_contains(pair.seg0, p),
            ConeKind::Vectors { apex } if self.degenerate => {
                // Opposite rays bound a half-plane; equal rays bound nothing.
                self.dot < 0.0 && is_left(*apex, *apex + self.u, p)
            }
            ConeKind::Vectors { apex } | ConeKind::Segments { apex, .. } => {
                self.sector_contains(*apex, p)
            }
        }
    }

    #[must_use]
    pub fn contains_points(&self, points: &[Point2]) -> Vec<bool> {
        map_batch(points, |p| self.contains_point(*p))
    }

    /// Which side of the two boundary lines `p` falls on.
    #[must_use]
    pub fn classify_point(&self, p: Point2) -> SectorSide {
        let (right_origin, left_origin) = self.line_origins();
        let left_of_u = self.u.cross(p - right_origin) > 0.0;
        let left_of_v = self.v.cross(p - left_origin) > 0.0;
        match (left_of_u, left_of_v) {
            (true, false) => SectorSide::Inside,
            (false, false) => SectorSide::BeyondRight,
            (true, true) => SectorSide::BeyondLeft,
            (false, true) => SectorSide::Opposite,
        }
    }

    #[must_use]
    pub fn classify_points(&self, points: &[Point2]) -> Vec<SectorSide> {
        map_batch(points, |p| self.classify_point(*p))
    }

    /// Membership in the double cone: the sector and its reflection through
    /// the apex.
    #[must_use]
    pub fn contains_point_double(&self, p: Point2) -> bool {
        matches!(
            self.classify_point(p),
            SectorSide::Inside | SectorSide::Opposite
        )
    }

    #[must_use]
    pub fn double_cone_mask(&self, points: &[Point2]) -> Vec<bool> {
        map_batch(points, |p| self.contains_point_double(*p))
    }

    // ------------------------------------------------------------------------
    // Segment queries
    // ------------------------------------------------------------------------

    /// Whether `seg` can still be reached through the cone.
    ///
    /// Both endpoints must lie strictly left of the reference line: the `u`
    /// line through the apex, or the reconciled `seg1` when the cone has no
    /// apex. Such a segment is rejected only when both endpoints are outside
    /// on the same side.
    #[must_use]
    pub fn contains_segment(&self, seg: Segment2) -> bool {
        let (from, to) = self.reference_line();
        if !(is_left(from, to, seg.a) && is_left(from, to, seg.b)) {
            return false;
        }

        let side_a = self.classify_point(seg.a);
        let side_b = self.classify_point(seg.b);
        let clipped = side_a == side_b
            && matches!(side_a, SectorSide::BeyondRight | SectorSide::BeyondLeft);
        !clipped
    }

    /// Batch form of [`Cone::contains_segment`] over aligned endpoint slices.
    pub fn contains_segments(
        &self,
        starts: &[Point2],
        ends: &[Point2],
    ) -> Result<Vec<bool>, ConeError> {
        if starts.len() != ends.len() {
            return Err(ConeError::BatchLengthMismatch {
                starts: starts.len(),
                ends: ends.len(),
            });
        }
        Ok(zip_batch(starts, ends, |a, b| {
            self.contains_segment(Segment2::new(*a, *b))
        }))
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn sector_contains(&self, apex: Point2, p: Point2) -> bool {
        let pt = p - apex;
        let pu = self.u.dot(pt);
        let pv = self.v.dot(pt);
        // Oblique (u, v) coordinates scaled by 1 - dot².
        let alpha = pu - self.dot * pv;
        let beta = pv - self.dot * pu;
        alpha > 0.0 && beta > 0.0
    }

    /// Strictly between the two lines parallel to `u` through `seg0`'s endpoints.
    fn band_contains(&self, seg0: Segment2, p: Point2) -> bool {
        let (a0, b0) = (seg0.a, seg0.b);
        if Tolerance::ZERO_LENGTH.approx_zero_f64(self.u.x) {
            let (lo, hi) = (a0.x.min(b0.x), a0.x.max(b0.x));
            return p.x > lo && p.x < hi;
        }

        let slope = self.u.y / self.u.x;
        let y0 = a0.y - slope * a0.x;
        let y1 = b0.y - slope * b0.x;
        let line = slope * p.x;
        p.y > line + y0.min(y1) && p.y < line + y0.max(y1)
    }

    /// Points the `u` and `v` lines pass through.
    fn line_origins(&self) -> (Point2, Point2) {
        match &self.kind {
            ConeKind::Vectors { apex } | ConeKind::Segments { apex, .. } => (*apex, *apex),
            ConeKind::DegenerateSegments { pair } => {
                let (a, b) = (pair.seg0.a, pair.seg0.b);
                if self.u.cross(a.to_vec2()) <= self.u.cross(b.to_vec2()) {
                    (a, b)
                } else {
                    (b, a)
                }
            }
        }
    }

    fn reference_line(&self) -> (Point2, Point2) {
        match &self.kind {
            ConeKind::Vectors { apex } | ConeKind::Segments { apex, .. } => {
                (*apex, *apex + self.u)
            }
            ConeKind::DegenerateSegments { pair } => (pair.seg1.a, pair.seg1.b),
        }
    }
}
