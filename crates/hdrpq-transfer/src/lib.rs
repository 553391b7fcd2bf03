//! # hdrpq-transfer
//!
//! The SMPTE ST 2084 Perceptual Quantizer and the integer quantization of
//! its output.
//!
//! | Function | Input | Output |
//! |----------|-------|--------|
//! | [`pq::encode`] | linear [0, 1] (1.0 = 10000 nits) | signal [0, 1] |
//! | [`pq::decode`] | signal [0, 1] | linear [0, 1] |
//! | [`pq::oetf`] | nits [0, 10000] | signal [0, 1] |
//! | [`pq::eotf`] | signal [0, 1] | nits [0, 10000] |
//! | [`quantize`] | signal [0, 1] | code value [0, 2^bits - 1] |
//!
//! # Usage
//!
//! ```rust
//! use hdrpq_transfer::{pq, quantize};
//!
//! let code = quantize(pq::encode(1.0), 16);
//! assert_eq!(code, 65535);
//! ```
//!
//! # Used By
//!
//! - `hdrpq-engine` - per-channel encoding of the converted buffer

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod pq;
mod quantize;

pub use pq::{decode as pq_decode, encode as pq_encode};
pub use quantize::{max_code, quantize, MAX_BITS};
