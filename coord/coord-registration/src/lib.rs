//! Affine registration between 3D coordinate frames.
//!
//! This crate provides tools for relating two coordinate systems from
//! corresponding points:
//! - **Least-squares estimation** - 4x4 homogeneous affine transform from
//!   four or more point correspondences via the normal equations
//! - **Point mapping** - Homogeneous multiply plus perspective division
//! - **Stateful mapper** - Estimate once, map (and unmap) many points
//!
//! # Layer 0
//!
//! This is a Layer 0 crate: pure computation over `nalgebra` types, no I/O.
//!
//! # Quick Start
//!
//! ## One-off estimate
//!
//! ```
//! use coord_registration::{estimate_transform, map_point};
//! use nalgebra::Point3;
//!
//! let source = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! ];
//! let target = vec![
//!     Point3::new(5.0, 5.0, 5.0),
//!     Point3::new(6.0, 5.0, 5.0),
//!     Point3::new(5.0, 6.0, 5.0),
//!     Point3::new(5.0, 5.0, 6.0),
//! ];
//!
//! let transform = estimate_transform(&source, &target).unwrap();
//! let mapped = map_point(&Point3::new(2.0, 2.0, 2.0), &transform).unwrap();
//! assert!((mapped - Point3::new(7.0, 7.0, 7.0)).norm() < 1e-9);
//! ```
//!
//! ## Diagnostics
//!
//! ```
//! use coord_registration::{EstimationParams, estimate_transform_with_params};
//! use nalgebra::Point3;
//!
//! let source = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! ];
//!
//! let params = EstimationParams::new().with_max_homogeneous_deviation(Some(1e-6));
//! let fit = estimate_transform_with_params(&source, &source, &params).unwrap();
//! assert!(fit.rms_error < 1e-9);
//! ```
//!
//! # Degenerate input
//!
//! Source points that are collinear, coplanar or coincident make the normal
//! equations singular; estimation then fails with
//! [`RegistrationError::SingularSystem`] rather than returning a matrix of
//! NaN or infinite entries. Use [`RegistrationError::kind`] to separate
//! malformed input from degenerate geometry.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod affine;
mod error;
mod estimate;
mod mapper;
mod params;

pub use affine::{AffineTransform, map_point};
pub use coord_measure::ErrorKind;
pub use error::{RegistrationError, RegistrationResult};
pub use estimate::{AffineFit, estimate_transform, estimate_transform_with_params, points_from_rows};
pub use mapper::CoordinateMapper;
pub use params::{EstimationParams, MIN_CORRESPONDENCES};
