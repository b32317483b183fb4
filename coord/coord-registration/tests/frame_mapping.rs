//! End-to-end tests: estimate a frame transform, then map points with it.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use approx::assert_relative_eq;
use coord_measure::{ErrorKind, distance_3d};
use coord_registration::{
    AffineTransform, CoordinateMapper, EstimationParams, RegistrationError, estimate_transform,
    estimate_transform_with_params, map_point, points_from_rows,
};
use nalgebra::{Matrix3, Point3, Vector3};

fn unit_tetrahedron() -> Vec<Point3<f64>> {
    points_from_rows(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
        .unwrap()
}

/// Survey-style control points: a small grid plus an elevated point.
fn control_points() -> Vec<Point3<f64>> {
    let mut points = Vec::new();
    for i in 0..3 {
        for j in 0..3 {
            points.push(Point3::new(f64::from(i) * 10.0, f64::from(j) * 10.0, 0.0));
        }
    }
    points.push(Point3::new(5.0, 5.0, 8.0));
    points.push(Point3::new(15.0, 12.0, -3.0));
    points
}

#[test]
fn translated_tetrahedron_maps_test_point() {
    let source = unit_tetrahedron();
    let target: Vec<_> = source.iter().map(|p| p + Vector3::new(5.0, 5.0, 5.0)).collect();

    let transform = estimate_transform(&source, &target).unwrap();
    let mapped = map_point(&Point3::new(2.0, 2.0, 2.0), &transform).unwrap();

    assert_relative_eq!(mapped.coords, Vector3::new(7.0, 7.0, 7.0), epsilon = 1e-9);
}

#[test]
fn rotation_scale_and_shift_round_trip() {
    let angle = 30.0_f64.to_radians();
    let (sin, cos) = angle.sin_cos();
    #[rustfmt::skip]
    let rotation_z = Matrix3::new(
        cos, -sin, 0.0,
        sin,  cos, 0.0,
        0.0,  0.0, 1.0,
    );
    let truth =
        AffineTransform::from_parts(&(rotation_z * 1.25), &Vector3::new(100.0, -40.0, 12.0));

    let source = control_points();
    let target = truth.map_points(&source).unwrap();

    let fit = estimate_transform_with_params(&source, &target, &EstimationParams::default())
        .unwrap();

    for (s, t) in source.iter().zip(&target) {
        let mapped = fit.transform.map_point(s).unwrap();
        assert!(distance_3d(&mapped, t) < 1e-6);
    }
    assert!(fit.max_error < 1e-6);
    assert_relative_eq!(*fit.transform.matrix(), *truth.matrix(), epsilon = 1e-8);
}

#[test]
fn identity_estimate_maps_points_to_themselves() {
    let points = control_points();
    let transform = estimate_transform(&points, &points).unwrap();

    for p in [Point3::new(-50.0, 3.0, 7.0), Point3::origin(), Point3::new(1e3, 1e3, 1e3)] {
        let mapped = transform.map_point(&p).unwrap();
        assert_relative_eq!(mapped.coords, p.coords, epsilon = 1e-6);
    }
}

#[test]
fn least_squares_averages_inconsistent_translation() {
    // Half the targets are shifted by +1 in z, half by -1: the best fit
    // keeps the linear part and splits the difference.
    let source = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
    ];
    let target: Vec<_> = source
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let dz = if i % 2 == 0 { 1.0 } else { -1.0 };
            p + Vector3::new(0.0, 0.0, dz)
        })
        .collect();

    let fit = estimate_transform_with_params(&source, &target, &EstimationParams::default())
        .unwrap();

    assert!(fit.rms_error > 0.1);
    assert!(fit.transform.is_affine(0.0));
    assert!(fit.homogeneous_deviation < 1e-9);
}

#[test]
fn collinear_source_is_degenerate() {
    let source: Vec<_> = (0..6).map(|i| Point3::new(f64::from(i), 0.0, 0.0)).collect();
    let target = source.clone();

    let err = estimate_transform(&source, &target).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DegenerateGeometry);
    assert!(matches!(err, RegistrationError::SingularSystem { .. }));
}

#[test]
fn mapper_construction_is_all_or_nothing() {
    let three = unit_tetrahedron()[..3].to_vec();
    let err = CoordinateMapper::new(three.clone(), three).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let mapper = CoordinateMapper::new(control_points(), control_points()).unwrap();
    assert!(mapper.map_point(&Point3::new(1.0, 2.0, 3.0)).is_ok());
}

#[test]
fn wrong_dimension_rows_rejected() {
    let err = points_from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0]]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(format!("{err}").contains("got 2"));
}

#[cfg(feature = "serde")]
#[test]
fn transform_serde_round_trip() {
    let source = unit_tetrahedron();
    let target: Vec<_> = source.iter().map(|p| Point3::from(p.coords * 3.0)).collect();
    let fit = estimate_transform_with_params(&source, &target, &EstimationParams::default())
        .unwrap();

    let json = serde_json::to_string(&fit).unwrap();
    let restored: coord_registration::AffineFit = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.point_count, fit.point_count);
    assert_relative_eq!(
        *restored.transform.matrix(),
        *fit.transform.matrix(),
        epsilon = 1e-12
    );

    let params: EstimationParams = serde_json::from_str(r#"{"min_points": 7}"#).unwrap();
    assert_eq!(params.min_points, 7);
    assert_eq!(params.max_homogeneous_deviation, None);
}
