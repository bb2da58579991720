mod test_cone_vectors_basic;

use crate::geom::{Point2, Vec2};

const EPS: f64 = 1e-9;

#[track_caller]
fn assert_near(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= EPS,
        "expected {expected}, got {actual}"
    );
}

#[track_caller]
fn assert_vec_near(actual: Vec2, expected: Vec2) {
    assert!(
        (actual - expected).length() <= EPS,
        "expected {expected:?}, got {actual:?}"
    );
}

#[track_caller]
fn assert_point_near(actual: Point2, expected: Point2) {
    assert!(
        (actual - expected).length() <= EPS,
        "expected {expected:?}, got {actual:?}"
    );
}
