//! # hdrpq-core
//!
//! Core types for converting linear HDR images to BT.2100 PQ.
//!
//! - [`SourceImage`] - borrowed view of decoded float pixels (f16 or f32)
//! - [`ConvertedImage`] - owned PQ-encoded integer samples
//! - [`ContentLightLevel`] - MaxCLL / MaxPALL metadata
//! - [`ColorInfo`], [`OutputLayout`], [`EncoderHints`] - what the encoder signals
//! - [`Error`], [`Result`] - error handling for every hdrpq crate
//!
//! ## Crate Structure
//!
//! ```text
//! hdrpq-math        hdrpq-transfer      hdrpq-core (this crate)
//!     ^                   ^                   ^
//!     |                   |                   |
//! hdrpq-primaries         |                   |
//!     ^                   |                   |
//!     +---------- hdrpq-engine ---------------+
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod format;
pub mod image;
pub mod metadata;

pub use error::{Error, Result};
pub use format::{DataFormat, Sample};
pub use image::{ConvertedImage, SourceImage};
pub use metadata::{
    ColorInfo, ColorPrimaries, ContentLightLevel, EncoderHints, MatrixCoefficients,
    OutputLayout, TransferCharacteristics,
};

/// Re-export of the half-float type accepted by [`SourceImage::from_f16`].
pub use half::f16;
