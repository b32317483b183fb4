//! Point-to-point and point-to-line distance calculations.

use crate::{Line, MeasureError, MeasureResult, round_to_places};
use nalgebra::{Point3, Vector3};

/// Euclidean distance between two points.
///
/// # Example
///
/// ```
/// use coord_measure::distance_3d;
/// use nalgebra::Point3;
///
/// let d = distance_3d(&Point3::origin(), &Point3::new(3.0, 4.0, 0.0));
/// assert!((d - 5.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn distance_3d(p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    (p2 - p1).norm()
}

/// Euclidean distance between `(x1, y1, z1)` and `(x2, y2, z2)`.
///
/// Same result as [`distance_3d`] for callers holding bare coordinates.
#[must_use]
pub fn distance_3d_coords(x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) -> f64 {
    distance_3d(&Point3::new(x1, y1, z1), &Point3::new(x2, y2, z2))
}

/// Builds a point from a coordinate slice of length exactly 3.
///
/// # Errors
///
/// Returns [`MeasureError::WrongDimension`] for any other length.
///
/// # Example
///
/// ```
/// use coord_measure::point_from_slice;
///
/// let p = point_from_slice(&[1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(p.y, 2.0);
/// assert!(point_from_slice(&[1.0, 2.0]).is_err());
/// ```
pub fn point_from_slice(coords: &[f64]) -> MeasureResult<Point3<f64>> {
    match *coords {
        [x, y, z] => Ok(Point3::new(x, y, z)),
        _ => Err(MeasureError::WrongDimension {
            expected: 3,
            actual: coords.len(),
        }),
    }
}

/// Projection of `point - line_start` onto the direction `line_end - line_start`.
///
/// With `v = line_end - line_start` and `w = point - line_start` this is
/// `((w·v) / (v·v)) v`.
///
/// # Errors
///
/// Returns [`MeasureError::DegenerateLine`] if `line_start` and `line_end`
/// coincide.
pub fn point_to_line_projection(
    point: &Point3<f64>,
    line_start: &Point3<f64>,
    line_end: &Point3<f64>,
) -> MeasureResult<Vector3<f64>> {
    Ok(Line::new(*line_start, *line_end)?.project(point))
}

/// Shortest distance from `point` to the infinite line through
/// `line_start` and `line_end`, rounded to `decimal_places` digits.
///
/// Pass [`DEFAULT_DECIMAL_PLACES`](crate::DEFAULT_DECIMAL_PLACES) for the
/// customary two digits.
///
/// This is the perpendicular distance. For the distance along the line from
/// `line_start` to the foot of the perpendicular, use
/// [`point_to_line_projection`]`(..).norm()`.
///
/// # Errors
///
/// Returns [`MeasureError::DegenerateLine`] for a zero-length line and
/// [`MeasureError::DecimalPlacesOutOfRange`] if `decimal_places` is too large.
///
/// # Example
///
/// ```
/// use coord_measure::{point_to_line_distance, DEFAULT_DECIMAL_PLACES};
/// use nalgebra::Point3;
///
/// let d = point_to_line_distance(
///     &Point3::new(1.0, 2.0, 3.0),
///     &Point3::origin(),
///     &Point3::new(1.0, 1.0, 1.0),
///     DEFAULT_DECIMAL_PLACES,
/// )
/// .unwrap();
///
/// assert_eq!(d, 1.41);
/// ```
pub fn point_to_line_distance(
    point: &Point3<f64>,
    line_start: &Point3<f64>,
    line_end: &Point3<f64>,
    decimal_places: u32,
) -> MeasureResult<f64> {
    let line = Line::new(*line_start, *line_end)?;
    round_to_places(line.distance_to(point), decimal_places)
}

/// Closest point to `point` on the infinite line through `line_start` and
/// `line_end`, each coordinate rounded to `decimal_places` digits.
///
/// # Errors
///
/// Returns [`MeasureError::DegenerateLine`] for a zero-length line and
/// [`MeasureError::DecimalPlacesOutOfRange`] if `decimal_places` is too large.
///
/// # Example
///
/// ```
/// use coord_measure::projection_point_on_line;
/// use nalgebra::Point3;
///
/// let foot = projection_point_on_line(
///     &Point3::new(2.0, 5.0, 0.0),
///     &Point3::origin(),
///     &Point3::new(4.0, 0.0, 0.0),
///     2,
/// )
/// .unwrap();
///
/// assert_eq!(foot, Point3::new(2.0, 0.0, 0.0));
/// ```
pub fn projection_point_on_line(
    point: &Point3<f64>,
    line_start: &Point3<f64>,
    line_end: &Point3<f64>,
    decimal_places: u32,
) -> MeasureResult<Point3<f64>> {
    let closest = Line::new(*line_start, *line_end)?.closest_point(point);
    Ok(Point3::new(
        round_to_places(closest.x, decimal_places)?,
        round_to_places(closest.y, decimal_places)?,
        round_to_places(closest.z, decimal_places)?,
    ))
}
