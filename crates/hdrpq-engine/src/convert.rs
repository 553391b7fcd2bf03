//! Whole-image conversion: allocate, partition, run workers, aggregate.
//!
//! The pipeline for one image:
//!
//! ```text
//! validate -> allocate buffer + worker stats -> build pool
//!          -> split buffer per row range -> workers (parallel)
//!          -> join -> aggregate MaxCLL / MaxPALL
//! ```
//!
//! Every fallible step happens before the first pixel is written, so an
//! error never leaves a half-converted buffer behind.

use hdrpq_core::{
    ColorInfo, ContentLightLevel, ConvertedImage, DataFormat, EncoderHints, Error, Result,
    SourceImage, f16,
};
use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::aggregate::aggregate;
use crate::config::ConvertConfig;
use crate::partition::{RowRange, partition};
use crate::stats::WorkerStats;
use crate::transform::ColorTransform;
use crate::worker::{PixelEncoder, process_rows};

type RowsFn = fn(&SourceImage<'_>, RowRange, &mut [u16], &PixelEncoder, WorkerStats) -> WorkerStats;

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// PQ-encoded BT.2100 samples, 3 per pixel.
    pub image: ConvertedImage,
    /// MaxCLL and MaxPALL.
    pub light_level: ContentLightLevel,
    /// CICP tags describing `image`.
    pub color: ColorInfo,
    /// Settings for the encoder.
    pub hints: EncoderHints,
}

/// Converts images with a fixed configuration and color transform.
///
/// # Example
///
/// ```rust
/// use hdrpq_core::SourceImage;
/// use hdrpq_engine::{ConvertConfig, Converter};
///
/// let pixels = vec![0.5f32; 4 * 2 * 3];
/// let src = SourceImage::from_f32(&pixels, 4, 2, 3).unwrap();
///
/// let converter = Converter::new(ConvertConfig::default().with_workers(2)).unwrap();
/// let out = converter.convert(&src).unwrap();
/// assert_eq!(out.image.data().len(), 4 * 2 * 3);
/// assert_eq!(out.light_level.max_cll, out.light_level.max_pall);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Converter {
    config: ConvertConfig,
    transform: ColorTransform,
}

impl Converter {
    /// Creates a converter for scRGB input, validating `config`.
    pub fn new(config: ConvertConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            transform: ColorTransform::scrgb(),
        })
    }

    /// Replaces the source color transform.
    pub fn with_transform(mut self, transform: ColorTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Active color transform.
    #[inline]
    pub fn transform(&self) -> &ColorTransform {
        &self.transform
    }

    /// Converts `src` to PQ and computes its light level metadata.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedFormat`] for non-float sources
    /// - [`Error::AllocationFailed`] if the buffer or a histogram cannot be reserved
    /// - [`Error::WorkerSpawn`] if the thread pool cannot be built
    pub fn convert(&self, src: &SourceImage<'_>) -> Result<Conversion> {
        let (width, height) = (src.width(), src.height());
        let format = src.format();
        trace!(width, height, %format, channels = src.channels(), "convert");

        let run: RowsFn = match format {
            DataFormat::F32 => process_rows::<f32>,
            DataFormat::F16 => process_rows::<f16>,
            other => return Err(Error::unsupported_format(other.name())),
        };

        let row_samples = (width as usize)
            .checked_mul(ConvertedImage::CHANNELS)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "row size overflows"))?;
        let samples = row_samples
            .checked_mul(height as usize)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))?;

        let mut data: Vec<u16> = Vec::new();
        data.try_reserve_exact(samples).map_err(|e| {
            Error::allocation_failed(samples.saturating_mul(std::mem::size_of::<u16>()), e.to_string())
        })?;
        data.resize(samples, 0);

        let ranges = partition(height, self.config.resolved_workers());
        let workers = ranges.len();
        let with_histogram = self.config.max_cll.needs_histogram();
        let stats = ranges
            .iter()
            .map(|_| WorkerStats::try_new(with_histogram))
            .collect::<Result<Vec<_>>>()?;
        debug!(workers, ?ranges, with_histogram, "Partitioned rows");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("hdrpq-worker-{i}"))
            .build()
            .map_err(|e| Error::worker_spawn(workers, e.to_string()))?;
        info!("Using {workers} workers");

        let mut jobs = Vec::with_capacity(workers);
        let mut rest = data.as_mut_slice();
        for (range, stats) in ranges.into_iter().zip(stats) {
            let (out, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * row_samples);
            jobs.push((range, out, stats));
            rest = tail;
        }

        let encoder = PixelEncoder::new(self.transform, self.config.intermediate_bits);
        let results: Vec<WorkerStats> = pool.install(|| {
            jobs.into_par_iter()
                .map(|(range, out, stats)| run(src, range, out, &encoder, stats))
                .collect()
        });

        let light_level = aggregate(&results, self.config.max_cll);
        info!("Computed HDR metadata: {light_level}");

        let image = ConvertedImage::from_vec(data, width, height, self.config.intermediate_bits);
        let hints = EncoderHints {
            layout: self.config.output,
            target_bits: self.config.target_bits,
            intermediate_bits: self.config.intermediate_bits,
            row_bytes: image.row_bytes(),
        };
        Ok(Conversion {
            image,
            light_level,
            color: ColorInfo::bt2100_pq(self.config.output),
            hints,
        })
    }
}

/// Converts `src` with `config` and the scRGB transform.
///
/// Shorthand for `Converter::new(*config)?.convert(src)`.
pub fn convert(src: &SourceImage<'_>, config: &ConvertConfig) -> Result<Conversion> {
    Converter::new(*config)?.convert(src)
}
