//! Least-squares estimation of an affine transform from point correspondences.
//!
//! Each point list becomes an N x 4 homogeneous matrix (a column of ones
//! appended). With `S` the source matrix and `T` the target matrix the
//! transform `M` solving `S * M ~ T` in the least-squares sense satisfies the
//! normal equations `(S^T S) M = S^T T`, so `M = (S^T S)^-1 (S^T T)`.
//!
//! `M` comes out in row-vector layout (`h' = h * M`). Its homogeneous column
//! is pinned to `[0, 0, 0, 1]` before it is stored as an [`AffineTransform`].

use crate::{AffineTransform, EstimationParams, RegistrationError, RegistrationResult};
use coord_measure::point_from_slice;
use nalgebra::{Matrix4, MatrixXx4, Point3, Vector4};
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a least-squares transform estimate, with fit diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AffineFit {
    /// The estimated transform (last row exactly `[0, 0, 0, 1]`).
    pub transform: AffineTransform,
    /// Largest absolute deviation of the solved homogeneous row from
    /// `[0, 0, 0, 1]` before it was overwritten.
    pub homogeneous_deviation: f64,
    /// Ratio of smallest to largest singular value of `S^T S`.
    pub reciprocal_condition: f64,
    /// RMS distance between mapped source points and their targets.
    pub rms_error: f64,
    /// Largest distance between a mapped source point and its target.
    pub max_error: f64,
    /// Number of correspondences used.
    pub point_count: usize,
}

/// Estimates the affine transform mapping `source_points` onto `target_points`.
///
/// Uses default [`EstimationParams`]. See
/// [`estimate_transform_with_params`] for diagnostics and tuning.
///
/// # Errors
///
/// Returns an error if:
/// - Either point set is empty or they differ in length
/// - Fewer than 4 correspondences are given
/// - Any coordinate is NaN or infinite
/// - The source points are collinear, coplanar or coincident
///   ([`RegistrationError::SingularSystem`])
///
/// # Example
///
/// ```
/// use coord_registration::estimate_transform;
/// use nalgebra::Point3;
///
/// let source = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
/// ];
/// let target: Vec<_> = source
///     .iter()
///     .map(|p| Point3::new(p.x + 5.0, p.y + 5.0, p.z + 5.0))
///     .collect();
///
/// let transform = estimate_transform(&source, &target).unwrap();
/// let mapped = transform.map_point(&Point3::new(2.0, 2.0, 2.0)).unwrap();
///
/// assert!((mapped - Point3::new(7.0, 7.0, 7.0)).norm() < 1e-9);
/// ```
pub fn estimate_transform(
    source_points: &[Point3<f64>],
    target_points: &[Point3<f64>],
) -> RegistrationResult<AffineTransform> {
    estimate_transform_with_params(source_points, target_points, &EstimationParams::default())
        .map(|fit| fit.transform)
}

/// Estimates the affine transform and reports fit diagnostics.
///
/// # Errors
///
/// Same conditions as [`estimate_transform`], plus
/// [`RegistrationError::InvalidParameter`] for unusable parameters and
/// [`RegistrationError::HomogeneousRowDeviation`] when
/// `params.max_homogeneous_deviation` is set and exceeded.
pub fn estimate_transform_with_params(
    source_points: &[Point3<f64>],
    target_points: &[Point3<f64>],
    params: &EstimationParams,
) -> RegistrationResult<AffineFit> {
    params.validate()?;
    validate_correspondences(source_points, target_points, params.required_points())?;

    let point_count = source_points.len();
    debug!(points = point_count, "Estimating affine transform");

    let s = homogeneous_matrix(source_points);
    let t = homogeneous_matrix(target_points);
    let s_transposed = s.transpose();

    let a: Matrix4<f64> = &s_transposed * &s;
    let b: Matrix4<f64> = &s_transposed * &t;

    let reciprocal_condition = reciprocal_condition(&a);
    let singular = || RegistrationError::SingularSystem {
        rows: 4,
        cols: 4,
        reciprocal_condition,
    };
    if reciprocal_condition.is_nan() || reciprocal_condition < params.rcond_tolerance {
        debug!(reciprocal_condition, "Normal matrix rejected as singular");
        return Err(singular());
    }

    let a_inv = a.try_inverse().ok_or_else(singular)?;
    let mut solved = a_inv * b;
    if solved.iter().any(|v| !v.is_finite()) {
        return Err(singular());
    }

    let homogeneous_deviation = pin_homogeneous_column(&mut solved);
    if homogeneous_deviation > params.homogeneous_warn_threshold {
        warn!(
            deviation = homogeneous_deviation,
            threshold = params.homogeneous_warn_threshold,
            "Solved homogeneous row deviates from [0, 0, 0, 1]"
        );
    }
    if let Some(limit) = params.max_homogeneous_deviation
        && homogeneous_deviation > limit
    {
        return Err(RegistrationError::HomogeneousRowDeviation {
            deviation: homogeneous_deviation,
            limit,
        });
    }

    let transform = AffineTransform::from_row_vector_layout(&solved);
    let (rms_error, max_error) = transform.alignment_error(source_points, target_points)?;

    debug!(
        points = point_count,
        reciprocal_condition,
        rms_error,
        max_error,
        "Affine transform estimated"
    );

    Ok(AffineFit {
        transform,
        homogeneous_deviation,
        reciprocal_condition,
        rms_error,
        max_error,
        point_count,
    })
}

/// Converts coordinate rows (each of length 3) into points.
///
/// # Errors
///
/// Returns [`RegistrationError::Measure`] wrapping
/// [`WrongDimension`](coord_measure::MeasureError::WrongDimension) for the
/// first row that does not hold exactly 3 coordinates.
///
/// # Example
///
/// ```
/// use coord_registration::points_from_rows;
///
/// let points = points_from_rows(&[vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]).unwrap();
/// assert_eq!(points.len(), 2);
///
/// assert!(points_from_rows(&[vec![0.0, 1.0]]).is_err());
/// ```
pub fn points_from_rows<R: AsRef<[f64]>>(rows: &[R]) -> RegistrationResult<Vec<Point3<f64>>> {
    rows.iter()
        .map(|row| point_from_slice(row.as_ref()).map_err(RegistrationError::from))
        .collect()
}

fn validate_correspondences(
    source_points: &[Point3<f64>],
    target_points: &[Point3<f64>],
    required: usize,
) -> RegistrationResult<()> {
    if source_points.is_empty() {
        return Err(RegistrationError::EmptySource);
    }
    if target_points.is_empty() {
        return Err(RegistrationError::EmptyTarget);
    }
    if source_points.len() != target_points.len() {
        return Err(RegistrationError::LengthMismatch {
            source_len: source_points.len(),
            target_len: target_points.len(),
        });
    }
    if source_points.len() < required {
        return Err(RegistrationError::InsufficientPoints {
            required,
            provided: source_points.len(),
        });
    }

    for (set, points) in [("source", source_points), ("target", target_points)] {
        if let Some(index) = points
            .iter()
            .position(|p| p.coords.iter().any(|c| !c.is_finite()))
        {
            return Err(RegistrationError::NonFiniteCoordinate { set, index });
        }
    }

    Ok(())
}

/// N x 4 matrix whose rows are `[x, y, z, 1]`.
fn homogeneous_matrix(points: &[Point3<f64>]) -> MatrixXx4<f64> {
    MatrixXx4::from_fn(points.len(), |i, j| if j < 3 { points[i][j] } else { 1.0 })
}

/// Smallest over largest singular value; 0 for the zero matrix.
fn reciprocal_condition(matrix: &Matrix4<f64>) -> f64 {
    let singular_values = matrix.singular_values();
    let largest = singular_values.max();
    if largest > 0.0 {
        singular_values.min() / largest
    } else {
        0.0
    }
}

/// Forces the homogeneous column of a row-vector-layout solve to
/// `[0, 0, 0, 1]` and returns how far it was from that before.
fn pin_homogeneous_column(solved: &mut Matrix4<f64>) -> f64 {
    let expected = Vector4::new(0.0, 0.0, 0.0, 1.0);
    let deviation = (solved.column(3) - expected).amax();
    solved.set_column(3, &expected);
    deviation
}
