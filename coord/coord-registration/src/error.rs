//! Error types for coordinate registration operations.

use coord_measure::{ErrorKind, MeasureError};
use thiserror::Error;

/// Errors that can occur while estimating or applying a frame transform.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Source point set is empty.
    #[error("source point set is empty")]
    EmptySource,

    /// Target point set is empty.
    #[error("target point set is empty")]
    EmptyTarget,

    /// Source and target point sets have different lengths.
    #[error("point sets must have equal length: {source_len} source vs {target_len} target")]
    LengthMismatch {
        /// Number of source points.
        source_len: usize,
        /// Number of target points.
        target_len: usize,
    },

    /// Not enough correspondences for a determined solve.
    #[error("at least {required} correspondences required, got {provided}")]
    InsufficientPoints {
        /// Number of correspondences required.
        required: usize,
        /// Number of correspondences provided.
        provided: usize,
    },

    /// A point has a NaN or infinite coordinate.
    #[error("{set} point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Which point set the point belongs to (`"source"` or `"target"`).
        set: &'static str,
        /// Index of the offending point.
        index: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The normal-equation matrix is singular or too ill-conditioned to invert.
    ///
    /// Raised for collinear, coplanar or coincident source points. The
    /// normal equations are formed from raw coordinates, so a well-spread
    /// set sitting far from the origin (map-grid or UTM-sized offsets) can
    /// also fall below the tolerance; subtract a common origin from both
    /// sets before estimating.
    #[error(
        "{rows}x{cols} normal matrix is singular or ill-conditioned \
         (reciprocal condition {reciprocal_condition:e}): source points are \
         degenerate or far from the origin"
    )]
    SingularSystem {
        /// Rows of the normal-equation matrix.
        rows: usize,
        /// Columns of the normal-equation matrix.
        cols: usize,
        /// Ratio of smallest to largest singular value.
        reciprocal_condition: f64,
    },

    /// The solved homogeneous row strayed further from `[0, 0, 0, 1]` than allowed.
    #[error(
        "solved homogeneous row deviates from [0, 0, 0, 1] by {deviation:e} (limit {limit:e})"
    )]
    HomogeneousRowDeviation {
        /// Largest absolute deviation of any entry.
        deviation: f64,
        /// Configured limit.
        limit: f64,
    },

    /// Mapping produced a zero (or non-finite) homogeneous scale.
    #[error("degenerate transform: zero homogeneous scale")]
    ZeroHomogeneousScale,

    /// Transform matrix has no inverse.
    #[error("transform matrix is not invertible")]
    NotInvertible,

    /// Error from a measurement operation.
    #[error(transparent)]
    Measure(#[from] MeasureError),
}

impl RegistrationError {
    /// Returns the broad category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptySource
            | Self::EmptyTarget
            | Self::LengthMismatch { .. }
            | Self::InsufficientPoints { .. }
            | Self::NonFiniteCoordinate { .. }
            | Self::InvalidParameter(_) => ErrorKind::InvalidInput,
            Self::SingularSystem { .. }
            | Self::HomogeneousRowDeviation { .. }
            | Self::ZeroHomogeneousScale
            | Self::NotInvertible => ErrorKind::DegenerateGeometry,
            Self::Measure(err) => err.kind(),
        }
    }

    /// Returns true if the error stems from unusable geometry.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        matches!(self.kind(), ErrorKind::DegenerateGeometry)
    }
}

/// Result type for registration operations.
pub type RegistrationResult<T> = Result<T, RegistrationError>;
