//! # hdrpq-math
//!
//! Small linear algebra for gamut conversion:
//!
//! - [`Mat3`] - 3x3 matrices (primaries to XYZ, source to BT.2100)
//! - [`Vec3`] - RGB / XYZ triplets
//!
//! All matrices are **row-major** and act on **column vectors**:
//!
//! ```text
//! out[i] = sum_j m[i][j] * in[j]
//! ```
//!
//! # Usage
//!
//! ```rust
//! use hdrpq_math::{Mat3, Vec3};
//!
//! let m = Mat3::scale(0.5);
//! let rgb = m * Vec3::new(1.0, 2.0, 4.0);
//! assert_eq!(rgb.to_array(), [0.5, 1.0, 2.0]);
//! ```
//!
//! # Used By
//!
//! - `hdrpq-primaries` - RGB/XYZ matrix generation
//! - `hdrpq-engine` - per-pixel color transform

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod mat3;
mod vec3;

pub use mat3::*;
pub use vec3::*;
