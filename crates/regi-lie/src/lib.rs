#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Regi Lie Groups
//!
//! Double precision implementations of the two groups needed to perturb a camera pose:
//!
//! - **SO(3)**: 3D rotations, built from axis-angle vectors with Rodrigues' formula.
//! - **SE(3)**: 3D rigid transformations (rotation + translation), stored as a rotation block
//!   and a translation block of a 4x4 homogeneous matrix.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use regi_lie::so3::SO3;
//!
//! let rotation = SO3::exp(DVec3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2));
//! let rotated = rotation.transform(DVec3::X);
//! assert!((rotated - DVec3::Y).length() < 1e-12);
//! ```

mod error;
pub use error::LieError;

/// Special Euclidean group SE(3) for 3D rigid transformations.
pub mod se3;

/// Special Orthogonal group SO(3) for 3D rotations.
pub mod so3;
