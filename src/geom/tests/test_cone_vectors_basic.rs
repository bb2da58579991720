use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use serde::de::value::{Error as ValueError, MapDeserializer};

use super::{assert_near, assert_vec_near};
use crate::geom::{Cone, ConeError, ConeKind, ConeTolerance, Point2, SectorSide, Tolerance, Vec2};

fn random_vec(rng: &mut StdRng) -> Vec2 {
    loop {
        let v = Vec2::new(rng.random_range(-10.0..10.0), rng.random_range(-10.0..10.0));
        if v.length() > 1e-3 {
            return v;
        }
    }
}

#[test]
fn quadrant_cone_contains_first_quadrant_only() {
    let cone = Cone::from_vectors(Vec2::X, Vec2::Y, Point2::ORIGIN).unwrap();

    assert!(!cone.is_degenerate());
    assert_eq!(cone.u(), Vec2::X);
    assert_eq!(cone.v(), Vec2::Y);
    assert_eq!(cone.dot(), 0.0);
    assert_eq!(cone.cross(), 1.0);
    assert_eq!(cone.apex(), Some(Point2::ORIGIN));
    assert!(cone.segments().is_none());

    assert!(cone.contains_point(Point2::new(1.0, 1.0)));
    assert!(!cone.contains_point(Point2::new(-1.0, 1.0)));
    assert!(!cone.contains_point(Point2::new(1.0, -1.0)));
    assert!(!cone.contains_point(Point2::new(-1.0, -1.0)));
}

#[test]
fn boundary_and_apex_are_outside() {
    let cone = Cone::from_vectors(Vec2::X, Vec2::Y, Point2::ORIGIN).unwrap();

    assert!(!cone.contains_point(Point2::ORIGIN));
    assert!(!cone.contains_point(Point2::new(3.0, 0.0)));
    assert!(!cone.contains_point(Point2::new(0.0, 3.0)));
    assert!(!cone.contains_point(Point2::new(-3.0, 0.0)));
}

#[test]
fn swapped_arguments_give_the_same_cone() {
    let apex = Point2::new(1.5, -2.0);
    let a = Vec2::new(3.0, 1.0);
    let b = Vec2::new(-1.0, 2.0);

    let ab = Cone::from_vectors(a, b, apex).unwrap();
    let ba = Cone::from_vectors(b, a, apex).unwrap();

    assert_eq!(ab.u(), ba.u());
    assert_eq!(ab.v(), ba.v());
    assert_eq!(ab.apex(), ba.apex());
    assert_eq!(ab.dot(), ba.dot());
    assert_eq!(ab.cross(), ba.cross());
}

#[test]
fn random_pairs_are_stored_counter_clockwise() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let apex = Point2::new(0.25, -0.75);

    for _ in 0..500 {
        let a = random_vec(&mut rng);
        let b = random_vec(&mut rng);

        let ab = Cone::from_vectors(a, b, apex).unwrap();
        let ba = Cone::from_vectors(b, a, apex).unwrap();

        assert!((ab.u().length() - 1.0).abs() < 1e-12);
        assert!((ab.v().length() - 1.0).abs() < 1e-12);

        if !ab.is_degenerate() {
            assert!(ab.cross() > 0.0);
            assert!(ab.u().cross(ab.v()) > 0.0);
            assert_eq!(ab.u(), ba.u());
            assert_eq!(ab.v(), ba.v());
            assert_eq!(ab.apex(), ba.apex());
        }
    }
}

#[test]
fn parallel_vectors_are_degenerate() {
    let a = Vec2::new(2.0, -1.0);
    for k in [0.5, 1.0, 3.0, 1e6] {
        let cone = Cone::from_vectors(a, a * k, Point2::ORIGIN).unwrap();
        assert!(cone.is_degenerate(), "k = {k}");
    }

    let opposite = Cone::from_vectors(a, -a, Point2::ORIGIN).unwrap();
    assert!(opposite.is_degenerate());
    assert!(opposite.dot() < 0.0);
}

#[test]
fn collinear_pairs_ignore_argument_order() {
    let probes: Vec<Point2> = [(0.0, 1.0), (0.0, -1.0), (3.0, 0.5), (-2.0, -0.5), (1.0, 0.0)]
        .into_iter()
        .map(|(x, y)| Point2::new(x, y))
        .collect();

    for a in [Vec2::X, Vec2::Y, Vec2::new(2.0, -1.0), Vec2::new(-0.5, -3.0)] {
        for b in [-a, a * 4.0, -a * 0.25] {
            let ab = Cone::from_vectors(a, b, Point2::ORIGIN).unwrap();
            let ba = Cone::from_vectors(b, a, Point2::ORIGIN).unwrap();

            assert!(ab.is_degenerate());
            assert_eq!(ab.u(), ba.u(), "a = {a:?}, b = {b:?}");
            assert_eq!(ab.v(), ba.v(), "a = {a:?}, b = {b:?}");
            assert_eq!(ab.contains_points(&probes), ba.contains_points(&probes));
        }
    }

    let forward = Cone::from_vectors(Vec2::X, -Vec2::X, Point2::ORIGIN).unwrap();
    let backward = Cone::from_vectors(-Vec2::X, Vec2::X, Point2::ORIGIN).unwrap();
    assert_eq!(forward.u(), backward.u());
    assert!(!forward.contains_point(Point2::new(0.0, 1.0)));
    assert!(!backward.contains_point(Point2::new(0.0, 1.0)));
    assert!(backward.contains_point(Point2::new(0.0, -1.0)));
}

#[test]
fn degenerate_vector_cones_use_half_plane_or_nothing() {
    let same = Cone::from_vectors(Vec2::X, Vec2::new(2.0, 0.0), Point2::ORIGIN).unwrap();
    assert!(!same.contains_point(Point2::new(5.0, 1e-4)));
    assert!(!same.contains_point(Point2::new(5.0, -1e-4)));
    assert!(!same.contains_point(Point2::new(0.0, 1.0)));

    // u = -X after canonicalization, so "left of u" is the lower half-plane.
    let opposite = Cone::from_vectors(Vec2::X, -Vec2::X, Point2::ORIGIN).unwrap();
    assert_eq!(opposite.u(), Vec2::new(-1.0, 0.0));
    assert!(opposite.contains_point(Point2::new(0.0, -1.0)));
    assert!(opposite.contains_point(Point2::new(7.0, -0.5)));
    assert!(!opposite.contains_point(Point2::new(0.0, 1.0)));
    assert!(!opposite.contains_point(Point2::new(4.0, 0.0)));
}

#[test]
fn custom_tolerance_widens_the_degenerate_band() {
    let a = Vec2::X;
    let b = Vec2::new(1.0, 0.01);

    let strict = Cone::from_vectors(a, b, Point2::ORIGIN).unwrap();
    assert!(!strict.is_degenerate());

    let loose = ConeTolerance { cross: 0.1 };
    let coarse = Cone::from_vectors_with_tolerance(a, b, Point2::ORIGIN, loose).unwrap();
    assert!(coarse.is_degenerate());
}

#[test]
fn tolerance_config_falls_back_to_defaults() {
    let empty = MapDeserializer::<_, ValueError>::new(Vec::<(&str, f64)>::new().into_iter());
    assert_eq!(ConeTolerance::deserialize(empty).unwrap(), ConeTolerance::default());
    assert_eq!(ConeTolerance::default().cross, Tolerance::CROSS.eps);

    let loose = MapDeserializer::<_, ValueError>::new(vec![("cross", 0.1)].into_iter());
    let tol = ConeTolerance::deserialize(loose).unwrap();
    assert_eq!(tol, ConeTolerance { cross: 0.1 });

    let coarse = Cone::from_vectors_with_tolerance(
        Vec2::X,
        Vec2::new(1.0, 0.01),
        Point2::ORIGIN,
        tol,
    )
    .unwrap();
    assert!(coarse.is_degenerate());
}

#[test]
fn zero_and_non_finite_inputs_are_rejected() {
    assert_eq!(
        Cone::from_vectors(Vec2::ZERO, Vec2::Y, Point2::ORIGIN),
        Err(ConeError::ZeroLengthVector)
    );
    assert_eq!(
        Cone::from_vectors(Vec2::X, Vec2::ZERO, Point2::ORIGIN),
        Err(ConeError::ZeroLengthVector)
    );
    assert_eq!(
        Cone::from_vectors(Vec2::new(f64::NAN, 0.0), Vec2::Y, Point2::ORIGIN),
        Err(ConeError::NonFiniteInput)
    );
    assert_eq!(
        Cone::from_vectors(Vec2::X, Vec2::Y, Point2::new(0.0, f64::INFINITY)),
        Err(ConeError::NonFiniteInput)
    );
}

#[test]
fn points_along_the_bisector_are_inside_at_any_distance() {
    let apex = Point2::new(-3.0, 4.0);
    let cone = Cone::from_vectors(Vec2::new(1.0, 2.0), Vec2::new(-2.0, 1.0), apex).unwrap();
    let bisector = (cone.u() + cone.v()).normalized().unwrap();

    for distance in [1e-6, 0.5, 1.0, 10.0, 1e6] {
        assert!(cone.contains_point(apex + bisector * distance), "d = {distance}");
        assert!(!cone.contains_point(apex - bisector * distance), "d = {distance}");
        assert!(!cone.contains_point(apex - cone.u() * distance), "d = {distance}");
        assert!(!cone.contains_point(apex - cone.v() * distance), "d = {distance}");
    }
}

#[test]
fn containment_ignores_construction_vector_magnitudes() {
    let apex = Point2::new(0.5, 0.5);
    let a = Vec2::new(2.0, 1.0);
    let b = Vec2::new(-1.0, 3.0);
    let base = Cone::from_vectors(a, b, apex).unwrap();

    let points: Vec<Point2> = (-10..10)
        .flat_map(|i| {
            (-10..10).map(move |j| {
                Point2::new(0.37 * f64::from(i) + 0.11, 0.53 * f64::from(j) - 0.07)
            })
        })
        .collect();
    let expected = base.contains_points(&points);
    assert!(expected.iter().any(|&inside| inside));
    assert!(expected.iter().any(|&inside| !inside));

    for (s, t) in [(0.1, 0.1), (3.0, 3.0), (250.0, 0.02)] {
        let scaled = Cone::from_vectors(a * s, b * t, apex).unwrap();
        assert_eq!(scaled.contains_points(&points), expected, "s = {s}, t = {t}");
    }
}

#[test]
fn rebuilding_from_own_rays_reproduces_the_cone() {
    let cone = Cone::from_vectors(Vec2::new(4.0, -1.0), Vec2::new(1.0, 5.0), Point2::new(2.0, 2.0))
        .unwrap();
    let apex = cone.apex().unwrap();

    let rebuilt = Cone::from_vectors(cone.u(), cone.v(), apex).unwrap();
    assert_vec_near(rebuilt.u(), cone.u());
    assert_vec_near(rebuilt.v(), cone.v());
    assert_near(rebuilt.dot(), cone.dot());
    assert_near(rebuilt.cross(), cone.cross());
    assert_eq!(rebuilt.apex(), Some(apex));
}

#[test]
fn classify_point_reports_all_four_sides() {
    let cone = Cone::default();
    assert!(matches!(cone.kind(), ConeKind::Vectors { .. }));

    assert_eq!(cone.classify_point(Point2::new(1.0, 1.0)), SectorSide::Inside);
    assert_eq!(cone.classify_point(Point2::new(1.0, -1.0)), SectorSide::BeyondRight);
    assert_eq!(cone.classify_point(Point2::new(-1.0, 1.0)), SectorSide::BeyondLeft);
    assert_eq!(cone.classify_point(Point2::new(-1.0, -1.0)), SectorSide::Opposite);
}

#[test]
fn double_cone_includes_the_reflected_sector() {
    let cone = Cone::default();
    let points = [
        Point2::new(1.0, 1.0),
        Point2::new(-1.0, -1.0),
        Point2::new(1.0, -1.0),
        Point2::new(-1.0, 1.0),
    ];

    assert_eq!(cone.double_cone_mask(&points), vec![true, true, false, false]);
    assert_eq!(cone.contains_points(&points), vec![true, false, false, false]);
}

#[test]
fn batch_queries_keep_length_and_order() {
    let cone = Cone::default();
    assert!(cone.contains_points(&[]).is_empty());

    let points: Vec<Point2> = (0..64)
        .map(|i| {
            let angle = f64::from(i) * std::f64::consts::TAU / 64.0 + 0.01;
            Point2::new(angle.cos(), angle.sin())
        })
        .collect();
    let mask = cone.contains_points(&points);
    assert_eq!(mask.len(), points.len());
    for (point, inside) in points.iter().zip(&mask) {
        assert_eq!(*inside, cone.contains_point(*point));
        assert_eq!(*inside, point.x > 0.0 && point.y > 0.0);
    }

    let sides = cone.classify_points(&points);
    assert_eq!(sides.len(), points.len());
    assert_eq!(sides[0], SectorSide::Inside);
}
