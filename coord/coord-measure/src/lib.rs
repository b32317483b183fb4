//! Distance measurement between points and lines in 3D.
//!
//! This crate provides:
//! - **Point-to-point distance** - Euclidean distance, with a flat-coordinate variant
//! - **Point-to-line projection** - Projection vector, closest point, and
//!   perpendicular distance against an infinite line
//! - **Fixed-decimal rounding** - One pinned rounding rule for reported values
//!
//! # Layer 0
//!
//! This is a Layer 0 crate: pure computation over `nalgebra` types, no I/O.
//!
//! # Example
//!
//! ```
//! use coord_measure::{distance_3d, point_to_line_distance, projection_point_on_line};
//! use nalgebra::Point3;
//!
//! let a = Point3::new(0.0, 0.0, 0.0);
//! let b = Point3::new(10.0, 0.0, 0.0);
//! let p = Point3::new(4.0, 3.0, 0.0);
//!
//! assert!((distance_3d(&a, &p) - 5.0).abs() < 1e-12);
//! assert_eq!(point_to_line_distance(&p, &a, &b, 2).unwrap(), 3.0);
//! assert_eq!(projection_point_on_line(&p, &a, &b, 2).unwrap(), Point3::new(4.0, 0.0, 0.0));
//! ```
//!
//! # Rounding
//!
//! Functions taking `decimal_places` round half away from zero. See
//! [`round_to_places`] and [`format_fixed`].

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod distance;
mod error;
mod line;
mod rounding;

pub use distance::{
    distance_3d, distance_3d_coords, point_from_slice, point_to_line_distance,
    point_to_line_projection, projection_point_on_line,
};
pub use error::{ErrorKind, MeasureError, MeasureResult};
pub use line::Line;
pub use rounding::{DEFAULT_DECIMAL_PLACES, MAX_DECIMAL_PLACES, format_fixed, round_to_places};
