//! # hdrpq-engine
//!
//! Parallel conversion of linear scRGB float images to BT.2100 PQ samples,
//! with MaxCLL and MaxPALL computed in the same pass.
//!
//! Rows are split into contiguous ranges, one per worker. Each worker owns
//! its slice of the output buffer and its own statistics, so nothing is
//! locked while pixels are converted. Statistics are merged only after every
//! worker has finished.
//!
//! # Quick Start
//!
//! ```rust
//! use hdrpq_core::SourceImage;
//! use hdrpq_engine::{ConvertConfig, MaxCllPolicy, convert};
//!
//! // 2x2 scRGB image, 1.0 = 80 nits.
//! let pixels = [1.0f32; 2 * 2 * 3];
//! let src = SourceImage::from_f32(&pixels, 2, 2, 3).unwrap();
//!
//! let config = ConvertConfig::default().with_max_cll(MaxCllPolicy::Maximum);
//! let out = convert(&src, &config).unwrap();
//! assert_eq!(out.light_level.max_cll, 80);
//! assert_eq!(out.light_level.max_pall, 80);
//! ```
//!
//! # Modules
//!
//! - [`config`] - [`ConvertConfig`] and [`MaxCllPolicy`]
//! - [`transform`] - gamut matrix and clip
//! - [`partition`] - row ranges per worker
//! - [`worker`] - per-range conversion
//! - [`stats`] - per-worker statistics and histograms
//! - [`aggregate`] - MaxCLL / MaxPALL from worker statistics
//! - [`convert`](mod@convert) - the whole pipeline

#![warn(missing_docs)]

pub mod aggregate;
pub mod config;
pub mod convert;
pub mod partition;
pub mod stats;
pub mod transform;
pub mod worker;

pub use aggregate::{ImageStats, aggregate};
pub use config::{ConvertConfig, DEFAULT_PERCENTILE, MAX_WORKERS, MaxCllPolicy};
pub use convert::{Conversion, Converter, convert};
pub use partition::{RowRange, partition};
pub use stats::{LightHistogram, WorkerStats};
pub use transform::ColorTransform;
pub use worker::PixelEncoder;
