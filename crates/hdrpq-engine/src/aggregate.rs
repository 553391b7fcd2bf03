//! Merging worker statistics into MaxCLL and MaxPALL.
//!
//! Runs only after every worker has returned. Maxima and sums do not depend
//! on the order workers finished in, so the result is a pure function of the
//! collected [`WorkerStats`].

use hdrpq_core::ContentLightLevel;
use tracing::debug;

use crate::config::MaxCllPolicy;
use crate::stats::{LightHistogram, WorkerStats, peak_to_nits};

/// Statistics of the whole image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageStats {
    /// Largest peak channel value.
    pub max_peak: f32,
    /// Sum of all peak channel values.
    pub sum_peak: f64,
    /// Pixels seen.
    pub pixels: u64,
    /// Merged histogram, present only if every worker kept one.
    pub histogram: Option<LightHistogram>,
}

impl ImageStats {
    /// Merges per-worker statistics.
    pub fn merge(workers: &[WorkerStats]) -> Self {
        let max_peak = workers.iter().map(|w| w.max_peak).fold(0.0, f32::max);
        let sum_peak = workers.iter().map(|w| w.sum_peak).sum();
        let pixels = workers.iter().map(|w| w.pixels).sum();

        let histogram = if workers.iter().all(|w| w.histogram.is_some()) {
            let mut hists = workers.iter().filter_map(|w| w.histogram.as_ref());
            hists.next().map(|first| {
                let mut merged = first.clone();
                hists.for_each(|h| merged.merge(h));
                merged
            })
        } else {
            None
        };

        Self {
            max_peak,
            sum_peak,
            pixels,
            histogram,
        }
    }

    /// MaxCLL of the brightest pixel, in nits.
    #[inline]
    pub fn max_nits(&self) -> u16 {
        peak_to_nits(self.max_peak)
    }

    /// Frame-average light level: `round(10000 * sum / pixels)`.
    ///
    /// Always the exact average, whatever the MaxCLL policy.
    pub fn max_pall(&self) -> u16 {
        if self.pixels == 0 {
            return 0;
        }
        (10000.0 * (self.sum_peak / self.pixels as f64)).round() as u16
    }

    /// MaxCLL under `policy`.
    ///
    /// For a percentile `p`, walks the histogram down from the brightest
    /// pixel's bucket until at least `round((1 - p) * pixels)` pixels have
    /// been passed, and reports that bucket. Without a histogram the
    /// brightest pixel is reported.
    pub fn max_cll(&self, policy: MaxCllPolicy) -> u16 {
        let max = self.max_nits();
        let (MaxCllPolicy::Percentile(p), Some(hist)) = (policy, self.histogram.as_ref()) else {
            return max;
        };

        let target = ((1.0 - p) * self.pixels as f64).round() as u64;
        let mut passed = 0u64;
        for nits in (0..=max).rev() {
            passed += hist.count(nits as usize);
            if passed >= target {
                return nits;
            }
        }
        // Only reachable if the histogram holds fewer pixels than counted.
        0
    }

    /// MaxCLL and MaxPALL under `policy`.
    pub fn light_level(&self, policy: MaxCllPolicy) -> ContentLightLevel {
        let level = ContentLightLevel::new(self.max_cll(policy), self.max_pall());
        debug!(
            max_nits = self.max_nits(),
            max_cll = level.max_cll,
            max_pall = level.max_pall,
            ?policy,
            "Aggregated light levels"
        );
        level
    }
}

/// Merges worker statistics and derives the light level metadata.
pub fn aggregate(workers: &[WorkerStats], policy: MaxCllPolicy) -> ContentLightLevel {
    ImageStats::merge(workers).light_level(policy)
}
