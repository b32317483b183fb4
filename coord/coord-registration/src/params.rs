//! Parameters controlling transform estimation.

use crate::{RegistrationError, RegistrationResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fewest correspondences that can determine a 3D affine transform.
pub const MIN_CORRESPONDENCES: usize = 4;

/// Parameters for least-squares transform estimation.
///
/// # Example
///
/// ```
/// use coord_registration::EstimationParams;
///
/// let params = EstimationParams::new()
///     .with_min_points(6)
///     .with_max_homogeneous_deviation(Some(1e-6));
///
/// assert_eq!(params.min_points, 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EstimationParams {
    /// Minimum number of correspondences accepted (never below 4).
    pub min_points: usize,

    /// Smallest accepted ratio of smallest to largest singular value of the
    /// normal-equation matrix. Anything below is treated as singular.
    pub rcond_tolerance: f64,

    /// Deviation of the solved homogeneous row above which a warning is logged.
    pub homogeneous_warn_threshold: f64,

    /// If set, deviation above this limit fails the estimate instead of
    /// being overwritten.
    pub max_homogeneous_deviation: Option<f64>,
}

impl Default for EstimationParams {
    fn default() -> Self {
        Self {
            min_points: MIN_CORRESPONDENCES,
            rcond_tolerance: 1e-12,
            homogeneous_warn_threshold: 1e-6,
            max_homogeneous_deviation: None,
        }
    }
}

impl EstimationParams {
    /// Creates default estimation parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum number of correspondences.
    #[must_use]
    pub const fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    /// Sets the reciprocal condition number tolerance.
    #[must_use]
    pub const fn with_rcond_tolerance(mut self, tolerance: f64) -> Self {
        self.rcond_tolerance = tolerance;
        self
    }

    /// Sets the deviation that triggers a warning.
    #[must_use]
    pub const fn with_homogeneous_warn_threshold(mut self, threshold: f64) -> Self {
        self.homogeneous_warn_threshold = threshold;
        self
    }

    /// Sets the hard limit on homogeneous row deviation.
    #[must_use]
    pub const fn with_max_homogeneous_deviation(mut self, limit: Option<f64>) -> Self {
        self.max_homogeneous_deviation = limit;
        self
    }

    /// Effective minimum, clamped so it never drops below [`MIN_CORRESPONDENCES`].
    #[must_use]
    pub fn required_points(&self) -> usize {
        self.min_points.max(MIN_CORRESPONDENCES)
    }

    /// Checks that every tolerance is usable.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::InvalidParameter`] for negative or
    /// non-finite tolerances.
    pub fn validate(&self) -> RegistrationResult<()> {
        if !self.rcond_tolerance.is_finite() || self.rcond_tolerance < 0.0 {
            return Err(RegistrationError::InvalidParameter(format!(
                "rcond_tolerance must be finite and non-negative, got {}",
                self.rcond_tolerance
            )));
        }
        if self.homogeneous_warn_threshold.is_nan() || self.homogeneous_warn_threshold < 0.0 {
            return Err(RegistrationError::InvalidParameter(format!(
                "homogeneous_warn_threshold must be non-negative, got {}",
                self.homogeneous_warn_threshold
            )));
        }
        if let Some(limit) = self.max_homogeneous_deviation
            && (limit.is_nan() || limit < 0.0)
        {
            return Err(RegistrationError::InvalidParameter(format!(
                "max_homogeneous_deviation must be non-negative, got {limit}"
            )));
        }
        Ok(())
    }
}
