//! Per-worker light level statistics.
//!
//! Each worker owns one [`WorkerStats`] for the duration of its range and
//! hands it back by value; nothing is shared while workers run.

use hdrpq_core::{Error, Result};

/// Light level of a normalized peak value, in whole nits.
///
/// `round(peak * 10000)`, half away from zero. `peak` is expected in [0, 1].
#[inline]
pub fn peak_to_nits(peak: f32) -> u16 {
    (peak * 10000.0).round() as u16
}

/// Count of pixels per integer light level, 0 to 10,000 nits inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightHistogram {
    counts: Vec<u64>,
}

impl LightHistogram {
    /// Number of buckets: one per nit from 0 to 10,000.
    pub const BUCKETS: usize = 10001;

    /// Allocates an empty histogram, reporting allocation failure.
    pub fn try_new() -> Result<Self> {
        let mut counts = Vec::new();
        counts.try_reserve_exact(Self::BUCKETS).map_err(|e| {
            Error::allocation_failed(Self::BUCKETS * std::mem::size_of::<u64>(), e.to_string())
        })?;
        counts.resize(Self::BUCKETS, 0);
        Ok(Self { counts })
    }

    /// Counts one pixel at `nits`. Levels above 10,000 land in the top bucket.
    #[inline]
    pub fn add(&mut self, nits: u16) {
        let i = (nits as usize).min(Self::BUCKETS - 1);
        self.counts[i] += 1;
    }

    /// Pixels counted at `nits`.
    #[inline]
    pub fn count(&self, nits: usize) -> u64 {
        self.counts.get(nits).copied().unwrap_or(0)
    }

    /// Total pixels counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Adds every bucket of `other` into this histogram.
    pub fn merge(&mut self, other: &Self) {
        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            *a += b;
        }
    }
}

/// Running statistics of one worker's range.
///
/// Tracks the peak channel value of every pixel: the maximum, the sum (for
/// the frame average) and, when enabled, a histogram of light levels.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerStats {
    /// Largest peak channel value seen.
    pub max_peak: f32,
    /// Sum of peak channel values.
    pub sum_peak: f64,
    /// Pixels processed.
    pub pixels: u64,
    /// Light level histogram, when percentile MaxCLL is enabled.
    pub histogram: Option<LightHistogram>,
}

impl WorkerStats {
    /// Creates empty statistics, allocating a histogram if requested.
    pub fn try_new(with_histogram: bool) -> Result<Self> {
        let histogram = if with_histogram {
            Some(LightHistogram::try_new()?)
        } else {
            None
        };
        Ok(Self {
            max_peak: 0.0,
            sum_peak: 0.0,
            pixels: 0,
            histogram,
        })
    }

    /// Records one pixel's peak channel value.
    #[inline]
    pub fn record(&mut self, peak: f32) {
        if peak > self.max_peak {
            self.max_peak = peak;
        }
        self.sum_peak += peak as f64;
        self.pixels += 1;
        if let Some(h) = self.histogram.as_mut() {
            h.add(peak_to_nits(peak));
        }
    }

    /// Light level of the brightest pixel, in nits.
    #[inline]
    pub fn max_nits(&self) -> u16 {
        peak_to_nits(self.max_peak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_to_nits() {
        assert_eq!(peak_to_nits(0.0), 0);
        assert_eq!(peak_to_nits(1.0), 10000);
        assert_eq!(peak_to_nits(0.008), 80);
        assert_eq!(peak_to_nits(0.25), 2500);
    }

    #[test]
    fn test_record() {
        let mut stats = WorkerStats::try_new(true).unwrap();
        for peak in [0.1, 0.5, 0.2, 1.0] {
            stats.record(peak);
        }
        assert_eq!(stats.max_peak, 1.0);
        assert_eq!(stats.max_nits(), 10000);
        assert!((stats.sum_peak - 1.8).abs() < 1e-6);
        assert_eq!(stats.pixels, 4);

        let h = stats.histogram.as_ref().unwrap();
        assert_eq!(h.count(1000), 1);
        assert_eq!(h.count(5000), 1);
        assert_eq!(h.count(10000), 1);
        assert_eq!(h.total(), 4);
    }

    #[test]
    fn test_no_histogram() {
        let mut stats = WorkerStats::try_new(false).unwrap();
        stats.record(0.3);
        assert!(stats.histogram.is_none());
        assert_eq!(stats.pixels, 1);
    }

    #[test]
    fn test_histogram_merge_and_clamp() {
        let mut a = LightHistogram::try_new().unwrap();
        let mut b = LightHistogram::try_new().unwrap();
        a.add(42);
        b.add(42);
        b.add(u16::MAX);
        a.merge(&b);
        assert_eq!(a.count(42), 2);
        assert_eq!(a.count(10000), 1);
        assert_eq!(a.count(20000), 0);
        assert_eq!(a.total(), 3);
    }
}
