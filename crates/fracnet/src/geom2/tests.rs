use super::*;
use nalgebra::vector;
use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

#[test]
fn right_angle_in_degrees_is_exactly_half_pi() {
    assert_eq!(deg_to_rad(90.0), FRAC_PI_2);
    assert!((deg_to_rad(180.0) - PI).abs() < 1e-15);
    assert_eq!(deg_to_rad(0.0), 0.0);
}

#[test]
fn standardize_folds_axial_angles() {
    assert!((standardize_theta(PI + 0.25) - 0.25).abs() < 1e-12);
    assert!((standardize_theta(-FRAC_PI_4) - 3.0 * FRAC_PI_4).abs() < 1e-12);
    assert_eq!(standardize_theta(PI), 0.0);
    assert_eq!(standardize_theta(FRAC_PI_2), FRAC_PI_2);
    assert_eq!(standardize_theta(-1e-20), 0.0);
}

#[test]
fn endpoints_from_center_angle_length() {
    let s = Segment::new(vector![5.0, 5.0], 0.0, 4.0);
    let (p, q) = s.endpoints();
    assert!((p - vector![7.0, 5.0]).norm() < 1e-12);
    assert!((q - vector![3.0, 5.0]).norm() < 1e-12);
    let b = s.bounds();
    // Horizontal segment: degenerate y extent.
    assert_eq!(b.min.y, b.max.y);
    assert!(!b.contains_strict(vector![5.0, 5.0]));
}

#[test]
fn from_endpoints_recovers_both_ends() {
    let p = vector![0.0, 10.0];
    let q = vector![10.0, 0.0];
    let s = Segment::from_endpoints(p, q);
    assert!((s.endpoint1() - p).norm() < 1e-9);
    assert!((s.endpoint2() - q).norm() < 1e-9);
    assert!((s.center - vector![5.0, 5.0]).norm() < 1e-12);
    assert!((s.length - 200f64.sqrt()).abs() < 1e-12);
}

#[test]
fn bounds_exclude_their_boundary() {
    let b = Bounds2::from_corners(vector![4.0, 0.0], vector![0.0, 2.0]);
    assert_eq!(b.min, vector![0.0, 0.0]);
    assert_eq!(b.max, vector![4.0, 2.0]);
    assert!(b.contains_strict(vector![2.0, 1.0]));
    // Corners and edges (e.g. a shared endpoint) are outside.
    assert!(!b.contains_strict(vector![4.0, 2.0]));
    assert!(!b.contains_strict(vector![2.0, 0.0]));
}

#[test]
fn canvas_validation_and_containment() {
    assert!(Canvas::new(0.0, 10.0).is_err());
    assert!(Canvas::new(f64::NAN, 10.0).is_err());
    let c = Canvas::new(60.0, 60.0).unwrap();
    assert!(c.contains(vector![0.0, 60.0]));
    assert!(!c.contains(vector![-0.1, 30.0]));
    assert_eq!(Canvas::default(), Canvas::new(100.0, 100.0).unwrap());
}

#[test]
fn centroid_of_points() {
    assert!(centroid(&[]).is_none());
    let c = centroid(&[vector![0.0, 0.0], vector![2.0, 4.0]]).unwrap();
    assert!((c - vector![1.0, 2.0]).norm() < 1e-12);
}

proptest! {
    #[test]
    fn standardize_is_idempotent_and_in_range(theta in -50.0f64..50.0) {
        let s = standardize_theta(theta);
        prop_assert!((0.0..PI).contains(&s));
        prop_assert_eq!(standardize_theta(s), s);
    }

    #[test]
    fn endpoints_match_formula(
        x in -100.0f64..100.0,
        y in -100.0f64..100.0,
        theta in -10.0f64..10.0,
        length in 0.1f64..50.0,
    ) {
        let s = Segment::new(vector![x, y], theta, length);
        let (p, q) = s.endpoints();
        let h = vector![theta.cos(), theta.sin()] * (length / 2.0);
        prop_assert!((p - (s.center + h)).norm() < 1e-9);
        prop_assert!((q - (s.center - h)).norm() < 1e-9);
        prop_assert!((p - q).norm() > 0.0);
        prop_assert!(((p - q).norm() - length).abs() < 1e-9);
    }
}
