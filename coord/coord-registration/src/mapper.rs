//! Stateful mapping between two coordinate frames.

use crate::{
    AffineFit, AffineTransform, EstimationParams, RegistrationError, RegistrationResult,
    estimate_transform_with_params,
};
use nalgebra::Point3;

/// Maps points from a source frame into a target frame.
///
/// Built once from a correspondence set; the transform (and its inverse, when
/// one exists) are computed at construction and reused for every call. A
/// mapper that exists is always usable for forward mapping: invalid
/// correspondences fail in [`CoordinateMapper::new`]. A transform that
/// flattens the source frame (for example onto a plan at z = 0) still builds
/// a mapper; only the inverse operations report
/// [`RegistrationError::NotInvertible`]. When the correspondences change,
/// build a new mapper.
///
/// # Example
///
/// ```
/// use coord_registration::CoordinateMapper;
/// use nalgebra::Point3;
///
/// let source = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
/// ];
/// let target: Vec<_> = source.iter().map(|p| Point3::from(p.coords * 10.0)).collect();
///
/// let mapper = CoordinateMapper::new(source, target).unwrap();
/// let mapped = mapper.map_point(&Point3::new(0.5, 0.5, 0.5)).unwrap();
///
/// assert!((mapped - Point3::new(5.0, 5.0, 5.0)).norm() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    source_points: Vec<Point3<f64>>,
    target_points: Vec<Point3<f64>>,
    fit: AffineFit,
    inverse: Option<AffineTransform>,
}

impl CoordinateMapper {
    /// Estimates the source-to-target transform with default parameters.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as
    /// [`estimate_transform`](crate::estimate_transform).
    pub fn new(
        source_points: Vec<Point3<f64>>,
        target_points: Vec<Point3<f64>>,
    ) -> RegistrationResult<Self> {
        Self::with_params(source_points, target_points, &EstimationParams::default())
    }

    /// Estimates the source-to-target transform with explicit parameters.
    ///
    /// # Errors
    ///
    /// See [`CoordinateMapper::new`].
    pub fn with_params(
        source_points: Vec<Point3<f64>>,
        target_points: Vec<Point3<f64>>,
        params: &EstimationParams,
    ) -> RegistrationResult<Self> {
        let fit = estimate_transform_with_params(&source_points, &target_points, params)?;
        let inverse = fit.transform.inverse().ok();
        Ok(Self {
            source_points,
            target_points,
            fit,
            inverse,
        })
    }

    /// Maps a source-frame point into the target frame.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::ZeroHomogeneousScale`](crate::RegistrationError::ZeroHomogeneousScale)
    /// if the homogeneous scale vanishes.
    pub fn map_point(&self, point: &Point3<f64>) -> RegistrationResult<Point3<f64>> {
        self.fit.transform.map_point(point)
    }

    /// Maps a point through `transform` instead of the stored one.
    ///
    /// # Errors
    ///
    /// Same as [`CoordinateMapper::map_point`].
    #[allow(clippy::unused_self)]
    pub fn map_point_with(
        &self,
        point: &Point3<f64>,
        transform: &AffineTransform,
    ) -> RegistrationResult<Point3<f64>> {
        transform.map_point(point)
    }

    /// Maps several source-frame points; all or nothing.
    ///
    /// # Errors
    ///
    /// Same as [`CoordinateMapper::map_point`].
    pub fn map_points(&self, points: &[Point3<f64>]) -> RegistrationResult<Vec<Point3<f64>>> {
        self.fit.transform.map_points(points)
    }

    /// Maps a target-frame point back into the source frame.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::NotInvertible`] if the stored transform
    /// has no inverse, otherwise same as [`CoordinateMapper::map_point`].
    pub fn unmap_point(&self, point: &Point3<f64>) -> RegistrationResult<Point3<f64>> {
        self.inverse_transform()?.map_point(point)
    }

    /// The stored source-to-target transform.
    #[must_use]
    pub const fn transform(&self) -> &AffineTransform {
        &self.fit.transform
    }

    /// The stored target-to-source transform.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::NotInvertible`] if the stored transform
    /// is singular.
    pub fn inverse_transform(&self) -> RegistrationResult<&AffineTransform> {
        self.inverse.as_ref().ok_or(RegistrationError::NotInvertible)
    }

    /// Fit diagnostics from construction.
    #[must_use]
    pub const fn fit(&self) -> &AffineFit {
        &self.fit
    }

    /// Correspondence points in the source frame.
    #[must_use]
    pub fn source_points(&self) -> &[Point3<f64>] {
        &self.source_points
    }

    /// Correspondence points in the target frame.
    #[must_use]
    pub fn target_points(&self) -> &[Point3<f64>] {
        &self.target_points
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn corner_points() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(2.0, 2.0, 2.0),
        ]
    }

    fn shifted(points: &[Point3<f64>], shift: Vector3<f64>) -> Vec<Point3<f64>> {
        points.iter().map(|p| p + shift).collect()
    }

    #[test]
    fn test_mapper_maps_and_unmaps() {
        let source = corner_points();
        let target = shifted(&source, Vector3::new(-1.0, 4.0, 2.5));
        let mapper = CoordinateMapper::new(source, target).unwrap();

        let p = Point3::new(10.0, -3.0, 0.5);
        let mapped = mapper.map_point(&p).unwrap();
        assert_relative_eq!(mapped.coords, Vector3::new(9.0, 1.0, 3.0), epsilon = 1e-9);

        let back = mapper.unmap_point(&mapped).unwrap();
        assert_relative_eq!(back.coords, p.coords, epsilon = 1e-9);
    }

    #[test]
    fn test_mapper_reproduces_correspondences() {
        let source = corner_points();
        let target = shifted(&source, Vector3::new(1.0, 2.0, 3.0));
        let mapper = CoordinateMapper::new(source.clone(), target.clone()).unwrap();

        let mapped = mapper.map_points(mapper.source_points()).unwrap();
        for (m, t) in mapped.iter().zip(mapper.target_points()) {
            assert_relative_eq!(m.coords, t.coords, epsilon = 1e-9);
        }
        assert!(mapper.fit().rms_error < 1e-9);
        assert_eq!(mapper.source_points(), source.as_slice());
    }

    #[test]
    fn test_map_point_with_override() {
        let source = corner_points();
        let mapper = CoordinateMapper::new(source.clone(), source).unwrap();
        let other = AffineTransform::from_translation(Vector3::new(0.0, 0.0, 9.0));

        let p = Point3::new(1.0, 1.0, 1.0);
        assert_relative_eq!(mapper.map_point(&p).unwrap().coords, p.coords, epsilon = 1e-9);
        assert_eq!(mapper.map_point_with(&p, &other).unwrap(), Point3::new(1.0, 1.0, 10.0));
    }

    #[test]
    fn test_inverse_transform_composes_to_identity() {
        let source = corner_points();
        let target: Vec<_> = source
            .iter()
            .map(|p| Point3::new(3.0 * p.x + p.y, p.y, 0.5 * p.z - 1.0))
            .collect();
        let mapper = CoordinateMapper::new(source, target).unwrap();

        let round_trip = mapper.transform().then(mapper.inverse_transform().unwrap());
        assert_relative_eq!(
            *round_trip.matrix(),
            nalgebra::Matrix4::identity(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_empty_construction_fails() {
        let result = CoordinateMapper::new(Vec::new(), corner_points());
        assert!(matches!(result, Err(RegistrationError::EmptySource)));

        let result = CoordinateMapper::new(corner_points(), Vec::new());
        assert!(matches!(result, Err(RegistrationError::EmptyTarget)));
    }

    #[test]
    fn test_degenerate_construction_fails() {
        let line: Vec<_> = (0..6)
            .map(|i| Point3::new(0.0, f64::from(i), f64::from(i)))
            .collect();
        let result = CoordinateMapper::new(line.clone(), line);
        assert!(result.unwrap_err().is_degenerate());
    }

    #[test]
    fn test_with_params() {
        let source = corner_points();
        let params = EstimationParams::new().with_min_points(6);
        let result = CoordinateMapper::with_params(source.clone(), source, &params);
        assert!(matches!(
            result,
            Err(RegistrationError::InsufficientPoints {
                required: 6,
                provided: 5
            })
        ));
    }

    #[test]
    fn test_flattening_transform_maps_forward_only() {
        let mut source = corner_points();
        source.push(Point3::new(1.0, 1.0, 1.0));
        let target: Vec<_> = source.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect();

        let mapper = CoordinateMapper::new(source, target).unwrap();

        let mapped = mapper.map_point(&Point3::new(3.0, -2.0, 7.0)).unwrap();
        assert_relative_eq!(mapped.coords, Vector3::new(3.0, -2.0, 0.0), epsilon = 1e-9);

        assert!(matches!(
            mapper.inverse_transform(),
            Err(RegistrationError::NotInvertible)
        ));
        let err = mapper.unmap_point(&mapped).unwrap_err();
        assert!(matches!(err, RegistrationError::NotInvertible));
        assert!(err.is_degenerate());
    }
}
