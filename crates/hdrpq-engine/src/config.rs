//! Conversion settings.
//!
//! [`ConvertConfig`] is a plain value: build it with [`Default`] and the
//! `with_*` methods, or deserialize it from the caller's own config file.
//!
//! ```rust
//! use hdrpq_engine::{ConvertConfig, MaxCllPolicy};
//!
//! let config = ConvertConfig::default()
//!     .with_workers(4)
//!     .with_max_cll(MaxCllPolicy::Maximum);
//! assert!(config.validate().is_ok());
//! ```

use hdrpq_core::{Error, OutputLayout, Result};
use hdrpq_transfer::MAX_BITS;
use serde::{Deserialize, Serialize};

/// Upper bound on worker threads, whatever the hardware reports.
pub const MAX_WORKERS: usize = 64;

/// Percentile used by [`MaxCllPolicy::default`].
pub const DEFAULT_PERCENTILE: f64 = 0.9999;

/// How MaxCLL is derived from the per-pixel peak values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxCllPolicy {
    /// Brightest pixel in the image.
    Maximum,
    /// Light level below which the given fraction of pixels fall, so a
    /// handful of outliers cannot inflate the value. Must be in (0, 1].
    Percentile(f64),
}

impl MaxCllPolicy {
    /// Whether a per-worker light level histogram is needed.
    #[inline]
    pub fn needs_histogram(&self) -> bool {
        matches!(self, Self::Percentile(_))
    }
}

impl Default for MaxCllPolicy {
    fn default() -> Self {
        Self::Percentile(DEFAULT_PERCENTILE)
    }
}

/// Settings for one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Worker count. `None` uses the available parallelism.
    /// Always capped at [`MAX_WORKERS`].
    pub workers: Option<usize>,
    /// MaxCLL policy.
    pub max_cll: MaxCllPolicy,
    /// Bit depth of the converted buffer (1..=16).
    pub intermediate_bits: u8,
    /// RGB or YUV output, selects the signaled matrix coefficients.
    pub output: OutputLayout,
    /// Bit depth the encoder should produce (10 or 12).
    pub target_bits: u8,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            workers: None,
            max_cll: MaxCllPolicy::default(),
            intermediate_bits: MAX_BITS,
            output: OutputLayout::default(),
            target_bits: 12,
        }
    }
}

impl ConvertConfig {
    /// Sets a fixed worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Sets the MaxCLL policy.
    pub fn with_max_cll(mut self, policy: MaxCllPolicy) -> Self {
        self.max_cll = policy;
        self
    }

    /// Sets the bit depth of the converted buffer.
    pub fn with_intermediate_bits(mut self, bits: u8) -> Self {
        self.intermediate_bits = bits;
        self
    }

    /// Sets the output layout.
    pub fn with_output(mut self, output: OutputLayout) -> Self {
        self.output = output;
        self
    }

    /// Sets the encoder target bit depth.
    pub fn with_target_bits(mut self, bits: u8) -> Self {
        self.target_bits = bits;
        self
    }

    /// Checks every field against its allowed range.
    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(Error::invalid_config("worker count must be at least 1"));
        }
        if self.intermediate_bits == 0 || self.intermediate_bits > MAX_BITS {
            return Err(Error::invalid_config(format!(
                "intermediate bit depth {} not in 1..={MAX_BITS}",
                self.intermediate_bits
            )));
        }
        if let MaxCllPolicy::Percentile(p) = self.max_cll {
            if !(p > 0.0 && p <= 1.0) {
                return Err(Error::invalid_config(format!("percentile {p} not in (0, 1]")));
            }
        }
        if self.target_bits != 10 && self.target_bits != 12 {
            return Err(Error::invalid_config(format!(
                "target bit depth {} must be 10 or 12",
                self.target_bits
            )));
        }
        Ok(())
    }

    /// Worker count to request: the configured value or the size of the
    /// global rayon pool, clamped to `1..=MAX_WORKERS`.
    pub fn resolved_workers(&self) -> usize {
        self.workers
            .unwrap_or_else(rayon::current_num_threads)
            .clamp(1, MAX_WORKERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConvertConfig::default();
        assert_eq!(config.intermediate_bits, 16);
        assert_eq!(config.max_cll, MaxCllPolicy::Percentile(0.9999));
        assert_eq!(config.output, OutputLayout::Yuv);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let base = ConvertConfig::default();
        assert!(base.with_workers(0).validate().unwrap_err().is_config_error());
        assert!(base.with_intermediate_bits(0).validate().is_err());
        assert!(base.with_intermediate_bits(17).validate().is_err());
        assert!(base.with_target_bits(8).validate().is_err());
        for p in [0.0, -0.5, 1.5, f64::NAN] {
            assert!(base.with_max_cll(MaxCllPolicy::Percentile(p)).validate().is_err());
        }
        assert!(base.with_max_cll(MaxCllPolicy::Percentile(1.0)).validate().is_ok());
    }

    #[test]
    fn test_resolved_workers_capped() {
        assert_eq!(ConvertConfig::default().with_workers(500).resolved_workers(), MAX_WORKERS);
        assert_eq!(ConvertConfig::default().with_workers(3).resolved_workers(), 3);
        let auto = ConvertConfig::default().resolved_workers();
        assert!((1..=MAX_WORKERS).contains(&auto));
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{ "workers": 8, "max_cll": "maximum", "output": "rgb" }"#;
        let config: ConvertConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.workers, Some(8));
        assert_eq!(config.max_cll, MaxCllPolicy::Maximum);
        assert_eq!(config.output, OutputLayout::Rgb);
        assert_eq!(config.intermediate_bits, 16);

        let json = r#"{ "max_cll": { "percentile": 0.999 } }"#;
        let config: ConvertConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_cll, MaxCllPolicy::Percentile(0.999));
    }
}
