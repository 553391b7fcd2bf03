//! Scanline partitioning across workers.
//!
//! `chunk = height / workers`. When there are more workers than rows, the
//! worker count drops to `height` and every worker gets one row. The last
//! range absorbs the remainder, so ranges are contiguous, disjoint, never
//! empty and cover `[0, height)` exactly once.
//!
//! ```text
//! height = 10, workers = 3  ->  [0,3) [3,6) [6,10)
//! height = 2,  workers = 8  ->  [0,1) [1,2)
//! ```

use std::ops::Range;

/// Half-open scanline range `[start, stop)` owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowRange {
    /// First row.
    pub start: u32,
    /// One past the last row.
    pub stop: u32,
}

impl RowRange {
    /// Creates a range.
    #[inline]
    pub const fn new(start: u32, stop: u32) -> Self {
        Self { start, stop }
    }

    /// Number of rows.
    #[inline]
    pub const fn len(&self) -> usize {
        (self.stop - self.start) as usize
    }

    /// Whether the range has no rows.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.stop
    }

    /// Rows as a std range.
    #[inline]
    pub fn rows(&self) -> Range<u32> {
        self.start..self.stop
    }
}

/// Splits `[0, height)` into at most `workers` row ranges.
///
/// # Panics
///
/// Panics if `height` or `workers` is zero.
///
/// # Example
///
/// ```rust
/// use hdrpq_engine::partition::{partition, RowRange};
///
/// let ranges = partition(10, 3);
/// assert_eq!(ranges, [RowRange::new(0, 3), RowRange::new(3, 6), RowRange::new(6, 10)]);
/// ```
pub fn partition(height: u32, workers: usize) -> Vec<RowRange> {
    assert!(height > 0, "cannot partition an empty image");
    assert!(workers > 0, "need at least one worker");

    let mut count = u32::try_from(workers).unwrap_or(u32::MAX);
    let mut chunk = height / count;
    if chunk == 0 {
        count = height;
        chunk = 1;
    }

    (0..count)
        .map(|i| {
            let start = i * chunk;
            let stop = if i + 1 == count { height } else { start + chunk };
            RowRange::new(start, stop)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exhaustive(height: u32, ranges: &[RowRange]) {
        let mut next = 0;
        for r in ranges {
            assert_eq!(r.start, next, "gap or overlap at {r:?}");
            assert!(!r.is_empty(), "empty range {r:?}");
            next = r.stop;
        }
        assert_eq!(next, height);
    }

    #[test]
    fn test_even_split() {
        let ranges = partition(8, 4);
        assert_eq!(ranges.len(), 4);
        assert!(ranges.iter().all(|r| r.len() == 2));
    }

    #[test]
    fn test_remainder_goes_last() {
        let ranges = partition(10, 4);
        assert_eq!(ranges.last(), Some(&RowRange::new(6, 10)));
        assert_exhaustive(10, &ranges);
    }

    #[test]
    fn test_more_workers_than_rows() {
        let ranges = partition(3, 64);
        assert_eq!(ranges, [RowRange::new(0, 1), RowRange::new(1, 2), RowRange::new(2, 3)]);
    }

    #[test]
    fn test_single_worker() {
        assert_eq!(partition(1080, 1), [RowRange::new(0, 1080)]);
        assert_eq!(partition(1, 1), [RowRange::new(0, 1)]);
    }

    #[test]
    fn test_exhaustive_grid() {
        for height in 1..=70 {
            for workers in 1..=70 {
                let ranges = partition(height, workers);
                assert_eq!(ranges.len(), workers.min(height as usize));
                assert_exhaustive(height, &ranges);
            }
        }
    }

    #[test]
    fn test_rows_iter() {
        let r = RowRange::new(4, 7);
        assert_eq!(r.rows().collect::<Vec<_>>(), [4, 5, 6]);
        assert_eq!(r.len(), 3);
    }
}
