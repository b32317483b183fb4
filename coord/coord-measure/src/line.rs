//! Infinite lines through two points.

use crate::{MeasureError, MeasureResult};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An infinite line in 3D space through two distinct points.
///
/// The endpoints only fix the line's position and direction; projections
/// and distances are measured against the whole infinite line, not the
/// segment between them.
///
/// # Example
///
/// ```
/// use coord_measure::Line;
/// use nalgebra::Point3;
///
/// let line = Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap();
/// let closest = line.closest_point(&Point3::new(5.0, 3.0, 0.0));
///
/// assert!((closest - Point3::new(5.0, 0.0, 0.0)).norm() < 1e-12);
/// assert!((line.distance_to(&Point3::new(5.0, 3.0, 0.0)) - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "[Point3<f64>; 2]", into = "[Point3<f64>; 2]")
)]
pub struct Line {
    start: Point3<f64>,
    end: Point3<f64>,
}

impl Line {
    /// Creates a line through `start` and `end`.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::DegenerateLine`] if the two points coincide
    /// (their separation is below `f64::EPSILON`) or either is non-finite.
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> MeasureResult<Self> {
        let length = (end - start).norm();
        if !length.is_finite() || length < f64::EPSILON {
            return Err(MeasureError::DegenerateLine);
        }
        Ok(Self { start, end })
    }

    /// The first defining point.
    #[must_use]
    pub const fn start(&self) -> Point3<f64> {
        self.start
    }

    /// The second defining point.
    #[must_use]
    pub const fn end(&self) -> Point3<f64> {
        self.end
    }

    /// Direction vector `end - start` (not normalized).
    #[must_use]
    pub fn direction(&self) -> Vector3<f64> {
        self.end - self.start
    }

    /// Distance between the two defining points.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Line parameter `t` of the orthogonal projection of `point`.
    ///
    /// `t = 0` at `start`, `t = 1` at `end`.
    #[must_use]
    pub fn parameter(&self, point: &Point3<f64>) -> f64 {
        let v = self.direction();
        let w = point - self.start;
        w.dot(&v) / v.norm_squared()
    }

    /// Projection of `point - start` onto the line direction.
    ///
    /// This is the component of the offset from `start` that runs along the
    /// line; adding it to `start` gives [`Line::closest_point`].
    #[must_use]
    pub fn project(&self, point: &Point3<f64>) -> Vector3<f64> {
        self.direction() * self.parameter(point)
    }

    /// The point on the line closest to `point`.
    #[must_use]
    pub fn closest_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.start + self.project(point)
    }

    /// Perpendicular distance from `point` to the line.
    #[must_use]
    pub fn distance_to(&self, point: &Point3<f64>) -> f64 {
        let w = point - self.start;
        (w - self.project(point)).norm()
    }

    /// Returns true if `point` is within `tolerance` of the line.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        self.distance_to(point) <= tolerance
    }
}

impl TryFrom<[Point3<f64>; 2]> for Line {
    type Error = MeasureError;

    fn try_from([start, end]: [Point3<f64>; 2]) -> MeasureResult<Self> {
        Self::new(start, end)
    }
}

impl From<Line> for [Point3<f64>; 2] {
    fn from(line: Line) -> Self {
        [line.start, line.end]
    }
}
