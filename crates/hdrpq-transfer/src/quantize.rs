//! Integer quantization of encoded signals.
//!
//! Rounding is round-half-away-from-zero (`f32::round`). Since signals are
//! non-negative this is round-half-up, and a value exactly halfway between
//! two codes always lands on the larger one.

/// Largest supported intermediate bit depth (samples are stored as `u16`).
pub const MAX_BITS: u8 = 16;

/// Largest code value at `bits` precision: `2^bits - 1`.
///
/// # Panics
///
/// Panics in debug builds if `bits` is 0 or above [`MAX_BITS`].
#[inline]
pub const fn max_code(bits: u8) -> u32 {
    debug_assert!(bits >= 1 && bits <= MAX_BITS);
    (1u32 << bits) - 1
}

/// Quantizes a signal in [0, 1] to a `bits`-bit code value.
///
/// The input is clamped first, so the result always fits in `bits` bits.
///
/// # Example
///
/// ```rust
/// use hdrpq_transfer::quantize;
///
/// assert_eq!(quantize(0.0, 16), 0);
/// assert_eq!(quantize(1.0, 10), 1023);
/// assert_eq!(quantize(0.5, 1), 1); // half rounds away from zero
/// ```
#[inline]
pub fn quantize(signal: f32, bits: u8) -> u16 {
    (signal.clamp(0.0, 1.0) * max_code(bits) as f32).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pq;

    #[test]
    fn test_max_code() {
        assert_eq!(max_code(1), 1);
        assert_eq!(max_code(10), 1023);
        assert_eq!(max_code(16), 65535);
    }

    #[test]
    fn test_half_rounds_up() {
        // 0.5 -> 1 (half-to-even would give 0), 1.5 -> 2.
        assert_eq!(quantize(0.5, 1), 1);
        assert_eq!(quantize(0.5, 2), 2);
    }

    #[test]
    fn test_clamps() {
        assert_eq!(quantize(-1.0, 16), 0);
        assert_eq!(quantize(2.0, 16), 65535);
    }

    #[test]
    fn test_pq_endpoints() {
        assert_eq!(quantize(pq::encode(0.0), 16), 0);
        assert_eq!(quantize(pq::encode(1.0), 16), 65535);
        assert_eq!(quantize(pq::encode(1.0), 12), 4095);
    }

    #[test]
    fn test_pq_monotonic() {
        let mut prev = 0u16;
        for i in 0..=4096 {
            let code = quantize(pq::encode(i as f32 / 4096.0), 16);
            assert!(code >= prev, "code {code} < {prev} at step {i}");
            prev = code;
        }
        assert_eq!(prev, 65535);
    }
}
