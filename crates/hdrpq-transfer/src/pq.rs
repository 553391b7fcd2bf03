//! SMPTE ST 2084 Perceptual Quantizer (PQ) transfer function.
//!
//! PQ encodes absolute luminance up to 10,000 cd/m2 in a perceptually
//! uniform way. The normalized functions work on linear values where 1.0 is
//! 10,000 nits, which is what the BT.2100 conversion matrix produces.
//!
//! # Range
//!
//! - Encoded: [0, 1]
//! - Linear: [0, 1] normalized, or [0, 10000] cd/m2
//!
//! # Reference
//!
//! SMPTE ST 2084:2014, ITU-R BT.2100-2 Table 4
//!
//! # Usage
//!
//! ```rust
//! use hdrpq_transfer::pq;
//!
//! // 100 nits reference white
//! let signal = pq::oetf(100.0);
//! assert!((signal - 0.508).abs() < 0.01);
//! assert!((pq::eotf(signal) - 100.0).abs() < 0.1);
//! ```

/// Maximum luminance in cd/m2 (nits).
pub const L_MAX: f32 = 10000.0;

/// `m1 = 1305 / 8192`
pub const M1: f32 = 1305.0 / 8192.0;
/// `m2 = 2523 / 32`
pub const M2: f32 = 2523.0 / 32.0;
/// `c1 = 107 / 128`
pub const C1: f32 = 107.0 / 128.0;
/// `c2 = 2413 / 128`
pub const C2: f32 = 2413.0 / 128.0;
/// `c3 = 2392 / 128`
pub const C3: f32 = 2392.0 / 128.0;

/// Inverse EOTF on normalized linear light.
///
/// `((c1 + c2 * y^m1) / (1 + c3 * y^m1)) ^ m2`, with `y` clamped to [0, 1].
/// Returns exactly 0.0 for `y <= 0` and exactly 1.0 for `y >= 1`.
///
/// # Example
///
/// ```rust
/// use hdrpq_transfer::pq::encode;
///
/// assert_eq!(encode(0.0), 0.0);
/// assert_eq!(encode(1.0), 1.0);
/// assert!(encode(0.25) < encode(0.5));
/// ```
#[inline]
pub fn encode(y: f32) -> f32 {
    if y <= 0.0 {
        return 0.0;
    }

    let yp = y.min(1.0).powf(M1);
    ((C1 + C2 * yp) / (1.0 + C3 * yp)).powf(M2)
}

/// EOTF on normalized linear light: inverse of [`encode`].
#[inline]
pub fn decode(v: f32) -> f32 {
    if v <= 0.0 {
        return 0.0;
    }

    let vp = v.min(1.0).powf(1.0 / M2);
    let num = (vp - C1).max(0.0);
    let den = C2 - C3 * vp;

    (num / den).powf(1.0 / M1)
}

/// PQ OETF: encodes absolute luminance (nits) to a PQ signal.
#[inline]
pub fn oetf(nits: f32) -> f32 {
    encode(nits / L_MAX)
}

/// PQ EOTF: decodes a PQ signal to absolute luminance (nits).
#[inline]
pub fn eotf(v: f32) -> f32 {
    L_MAX * decode(v)
}

/// Applies [`encode`] to each channel of an RGB triplet.
#[inline]
pub fn encode_rgb(rgb: [f32; 3]) -> [f32; 3] {
    [encode(rgb[0]), encode(rgb[1]), encode(rgb[2])]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constants_match_st2084() {
        assert_eq!(M1, 2610.0 / 16384.0);
        assert_eq!(M2, 2523.0 / 4096.0 * 128.0);
        assert_eq!(C1, C3 - C2 + 1.0);
    }

    #[test]
    fn test_roundtrip() {
        for &l in &[0.0, 0.1, 0.5, 1.0, 10.0, 100.0, 1000.0, 10000.0] {
            let decoded = eotf(oetf(l));
            assert!((l - decoded).abs() < l * 0.001 + 0.001, "l={l}, decoded={decoded}");
        }
    }

    #[test]
    fn test_reference_white() {
        assert_relative_eq!(encode(0.01), 0.5081, epsilon = 1e-3);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(encode(0.0), 0.0);
        assert_eq!(encode(-5.0), 0.0);
        assert_eq!(encode(1.0), 1.0);
        assert_eq!(encode(3.0), 1.0);
        assert_eq!(decode(0.0), 0.0);
        assert!((eotf(1.0) - L_MAX).abs() < 1.0);
    }

    #[test]
    fn test_encode_rgb() {
        let out = encode_rgb([0.0, 0.01, 1.0]);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], encode(0.01));
        assert_eq!(out[2], 1.0);
    }
}
