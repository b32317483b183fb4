//! Error types for measurement operations.

use thiserror::Error;

/// Result type alias for measurement operations.
pub type MeasureResult<T> = Result<T, MeasureError>;

/// Broad classification shared by every error in the coordinate crates.
///
/// Callers that only care whether the input was malformed or the geometry
/// was unusable can match on this instead of individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed arguments: wrong lengths, wrong dimensions, out-of-range options.
    InvalidInput,
    /// Well-formed arguments describing geometry the operation cannot handle.
    DegenerateGeometry,
}

/// Errors that can occur during measurement operations.
#[derive(Debug, Error)]
pub enum MeasureError {
    /// Line start and end coincide, so the line has no direction.
    #[error("degenerate line: start and end points coincide")]
    DegenerateLine,

    /// Requested more fractional digits than an `f64` can carry.
    #[error("decimal places {requested} exceeds maximum of {max}")]
    DecimalPlacesOutOfRange {
        /// Number of decimal places requested.
        requested: u32,
        /// Largest supported number of decimal places.
        max: u32,
    },

    /// A raw coordinate slice did not have the expected length.
    #[error("expected a point with {expected} coordinates, got {actual}")]
    WrongDimension {
        /// Required number of coordinates.
        expected: usize,
        /// Number of coordinates provided.
        actual: usize,
    },
}

impl MeasureError {
    /// Returns the broad category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DegenerateLine => ErrorKind::DegenerateGeometry,
            Self::DecimalPlacesOutOfRange { .. } | Self::WrongDimension { .. } => {
                ErrorKind::InvalidInput
            }
        }
    }

    /// Returns true if the error stems from unusable geometry.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        matches!(self.kind(), ErrorKind::DegenerateGeometry)
    }
}
