//! Error types for hdrpq operations.
//!
//! Every failure in a conversion is terminal: the caller gets an [`Error`]
//! and may retry the whole conversion from scratch. Nothing is retried
//! internally and no partially converted buffer is ever returned.
//!
//! # Categories
//!
//! - **Input errors**: [`UnsupportedFormat`](Error::UnsupportedFormat),
//!   [`ChannelMismatch`](Error::ChannelMismatch),
//!   [`InvalidDimensions`](Error::InvalidDimensions),
//!   [`InvalidStride`](Error::InvalidStride),
//!   [`BufferTooSmall`](Error::BufferTooSmall)
//! - **Configuration errors**: [`InvalidConfig`](Error::InvalidConfig)
//! - **Resource errors**: [`AllocationFailed`](Error::AllocationFailed),
//!   [`WorkerSpawn`](Error::WorkerSpawn)
//!
//! # Usage
//!
//! ```rust
//! use hdrpq_core::{Error, Result};
//!
//! fn check_bits(bits: u8) -> Result<()> {
//!     if bits == 0 || bits > 16 {
//!         return Err(Error::invalid_config(format!("bit depth {bits} not in 1..=16")));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_bits(17).unwrap_err().is_config_error());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting an HDR image.
#[derive(Debug, Error)]
pub enum Error {
    /// Memory allocation failed.
    ///
    /// Returned when the converted buffer or a per-worker histogram cannot
    /// be reserved. Raised before any worker is started.
    #[error("failed to allocate {requested} bytes: {reason}")]
    AllocationFailed {
        /// Bytes requested
        requested: usize,
        /// Failure reason
        reason: String,
    },

    /// The worker pool could not be created.
    ///
    /// Aborts the conversion; no pixel has been written at that point.
    #[error("failed to start {workers} worker threads: {reason}")]
    WorkerSpawn {
        /// Requested worker count
        workers: usize,
        /// Failure reason
        reason: String,
    },

    /// Sample precision is not supported.
    ///
    /// Only 16-bit and 32-bit float sources can be converted.
    #[error("unsupported sample format: {format}")]
    UnsupportedFormat {
        /// Format name or description
        format: String,
    },

    /// Channel count is not usable as RGB or RGBA.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Expected channel count
        expected: &'static str,
        /// Actual channel count
        got: u8,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, or dimensions would cause
    /// integer overflow in buffer size calculations.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Stride is too small for the given width and pixel size.
    #[error("stride {stride} is less than minimum {min_stride} for width {width}")]
    InvalidStride {
        /// Provided stride in bytes
        stride: usize,
        /// Minimum required stride in bytes
        min_stride: usize,
        /// Image width
        width: u32,
    },

    /// Source buffer is shorter than its declared layout.
    #[error("buffer too small: need {required} bytes, got {actual}")]
    BufferTooSmall {
        /// Bytes required by width, height and stride
        required: usize,
        /// Bytes provided
        actual: usize,
    },

    /// Conversion settings are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Creates an [`Error::AllocationFailed`] error.
    #[inline]
    pub fn allocation_failed(requested: usize, reason: impl Into<String>) -> Self {
        Self::AllocationFailed {
            requested,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::WorkerSpawn`] error.
    #[inline]
    pub fn worker_spawn(workers: usize, reason: impl Into<String>) -> Self {
        Self::WorkerSpawn {
            workers,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::UnsupportedFormat`] error.
    #[inline]
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidConfig`] error.
    #[inline]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Returns `true` if the source image description was rejected.
    #[inline]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. }
                | Self::ChannelMismatch { .. }
                | Self::InvalidDimensions { .. }
                | Self::InvalidStride { .. }
                | Self::BufferTooSmall { .. }
        )
    }

    /// Returns `true` if this is an allocation or worker start failure.
    #[inline]
    pub fn is_resource_error(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. } | Self::WorkerSpawn { .. })
    }

    /// Returns `true` if the conversion settings were rejected.
    #[inline]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}
