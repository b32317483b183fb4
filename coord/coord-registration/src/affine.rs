//! Homogeneous 4x4 transforms between coordinate frames.

use crate::{RegistrationError, RegistrationResult};
use coord_measure::distance_3d;
use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3D transform in homogeneous coordinates.
///
/// The matrix uses the column-vector convention: a point maps as
/// `h' = M * [x, y, z, 1]^T`, so each row holds the coefficients of one
/// output coordinate. Transforms produced by the estimator are affine and
/// their last row is exactly `[0, 0, 0, 1]`; matrices supplied through
/// [`AffineTransform::from_matrix`] may carry an arbitrary last row, in
/// which case mapping performs the perspective division.
///
/// # Example
///
/// ```
/// use coord_registration::AffineTransform;
/// use nalgebra::{Point3, Vector3};
///
/// let shift = AffineTransform::from_translation(Vector3::new(5.0, 5.0, 5.0));
/// let mapped = shift.map_point(&Point3::new(2.0, 2.0, 2.0)).unwrap();
///
/// assert_eq!(mapped, Point3::new(7.0, 7.0, 7.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AffineTransform {
    matrix: Matrix4<f64>,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    /// Creates a transform from a 4x4 matrix in column-vector convention.
    #[must_use]
    pub const fn from_matrix(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }

    /// Creates a transform from a matrix in row-vector convention, where a
    /// point maps as `h' = [x, y, z, 1] * M`.
    ///
    /// This is the layout the normal-equation solve produces; it is the
    /// transpose of the stored matrix.
    #[must_use]
    pub fn from_row_vector_layout(matrix: &Matrix4<f64>) -> Self {
        Self {
            matrix: matrix.transpose(),
        }
    }

    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// A pure translation.
    #[must_use]
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// An affine transform `p -> linear * p + translation`.
    #[must_use]
    pub fn from_parts(linear: &Matrix3<f64>, translation: &Vector3<f64>) -> Self {
        let mut matrix = linear.to_homogeneous();
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(translation);
        Self { matrix }
    }

    /// Get the underlying 4x4 matrix (column-vector convention).
    #[must_use]
    pub const fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// The matrix in row-vector convention (`h' = h * M`).
    #[must_use]
    pub fn to_row_vector_layout(&self) -> Matrix4<f64> {
        self.matrix.transpose()
    }

    /// The matrix as row-major nested arrays, one output equation per row.
    #[must_use]
    pub fn to_rows(&self) -> [[f64; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = self.matrix[(i, j)];
            }
        }
        rows
    }

    /// Translation component (last column, first three rows).
    #[must_use]
    pub fn translation(&self) -> Vector3<f64> {
        self.matrix.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// Linear component (upper-left 3x3 block): rotation, scale and shear.
    #[must_use]
    pub fn linear_part(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// Returns true if the last row is `[0, 0, 0, 1]` within `epsilon`.
    #[must_use]
    pub fn is_affine(&self, epsilon: f64) -> bool {
        let expected = Vector4::new(0.0, 0.0, 0.0, 1.0);
        (0..4).all(|j| (self.matrix[(3, j)] - expected[j]).abs() <= epsilon)
    }

    /// Maps a point through the transform.
    ///
    /// Forms `h = [x, y, z, 1]`, computes `h' = M * h` and returns
    /// `h'[0..3] / h'[3]`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::ZeroHomogeneousScale`] if `h'[3]` is zero
    /// or not finite.
    pub fn map_point(&self, point: &Point3<f64>) -> RegistrationResult<Point3<f64>> {
        let mapped = self.matrix * point.to_homogeneous();
        let w = mapped.w;
        if !w.is_finite() || w.abs() < f64::EPSILON {
            return Err(RegistrationError::ZeroHomogeneousScale);
        }
        Ok(Point3::new(mapped.x / w, mapped.y / w, mapped.z / w))
    }

    /// Maps every point, failing on the first point that cannot be mapped.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::ZeroHomogeneousScale`] if any point maps
    /// to a zero homogeneous scale.
    pub fn map_points(&self, points: &[Point3<f64>]) -> RegistrationResult<Vec<Point3<f64>>> {
        points.iter().map(|p| self.map_point(p)).collect()
    }

    /// Compose this transformation with another (self then other).
    ///
    /// The result applies `self` first, then `other`.
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }

    /// Compute the inverse transformation.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::NotInvertible`] if the matrix is singular.
    pub fn inverse(&self) -> RegistrationResult<Self> {
        self.matrix
            .try_inverse()
            .filter(|m| m.iter().all(|v| v.is_finite()))
            .map(|matrix| Self { matrix })
            .ok_or(RegistrationError::NotInvertible)
    }

    /// Distance between each mapped source point and its target.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::LengthMismatch`] if the slices differ in
    /// length, or any mapping error.
    pub fn residuals(
        &self,
        source: &[Point3<f64>],
        target: &[Point3<f64>],
    ) -> RegistrationResult<Vec<f64>> {
        if source.len() != target.len() {
            return Err(RegistrationError::LengthMismatch {
                source_len: source.len(),
                target_len: target.len(),
            });
        }

        source
            .iter()
            .zip(target)
            .map(|(s, t)| self.map_point(s).map(|mapped| distance_3d(&mapped, t)))
            .collect()
    }

    /// Computes `(rms error, max error)` of mapping `source` onto `target`.
    ///
    /// Empty inputs give `(0.0, 0.0)`.
    ///
    /// # Errors
    ///
    /// Same as [`AffineTransform::residuals`].
    pub fn alignment_error(
        &self,
        source: &[Point3<f64>],
        target: &[Point3<f64>],
    ) -> RegistrationResult<(f64, f64)> {
        let residuals = self.residuals(source, target)?;
        if residuals.is_empty() {
            return Ok((0.0, 0.0));
        }

        let sum_sq: f64 = residuals.iter().map(|r| r * r).sum();
        let max = residuals.iter().copied().fold(0.0, f64::max);

        #[allow(clippy::cast_precision_loss)]
        let rms = (sum_sq / residuals.len() as f64).sqrt();

        Ok((rms, max))
    }
}

/// Maps `point` through `transform`.
///
/// Free-function form of [`AffineTransform::map_point`].
///
/// # Errors
///
/// Returns [`RegistrationError::ZeroHomogeneousScale`] if the mapped
/// homogeneous scale is zero.
pub fn map_point(
    point: &Point3<f64>,
    transform: &AffineTransform,
) -> RegistrationResult<Point3<f64>> {
    transform.map_point(point)
}
