//! Per-pixel color transform: source primaries to clipped BT.2100.

use hdrpq_math::{Mat3, Vec3};
use hdrpq_primaries::{Primaries, REC2020, SCRGB_TO_BT2100, gamut_matrix};

/// Fixed 3x3 gamut transform followed by a hard clip to [0, 1].
///
/// The output is linear BT.2100 where 1.0 is 10,000 nits. Anything outside
/// the Rec.2020 gamut or above peak is clipped, not compressed.
///
/// # Example
///
/// ```rust
/// use hdrpq_engine::ColorTransform;
///
/// let t = ColorTransform::scrgb();
/// let out = t.apply([1000.0, 1000.0, 1000.0]);
/// assert_eq!(out.to_array(), [1.0, 1.0, 1.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTransform {
    matrix: Mat3,
}

impl ColorTransform {
    /// scRGB (Rec.709, 1.0 = 80 nits) to BT.2100.
    pub const fn scrgb() -> Self {
        Self {
            matrix: SCRGB_TO_BT2100,
        }
    }

    /// Linear `src` (1.0 = `white_nits`) to BT.2100.
    pub fn from_primaries(src: &Primaries, white_nits: f32) -> Self {
        Self {
            matrix: gamut_matrix(src, &REC2020, white_nits),
        }
    }

    /// Uses an arbitrary row-major matrix.
    pub const fn from_matrix(matrix: Mat3) -> Self {
        Self { matrix }
    }

    /// The row-major matrix applied before clipping.
    #[inline]
    pub fn matrix(&self) -> &Mat3 {
        &self.matrix
    }

    /// Transforms one linear RGB triplet and clips each channel to [0, 1].
    ///
    /// A NaN channel becomes 0.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3]) -> Vec3 {
        (self.matrix * Vec3::from_array(rgb)).clamp01()
    }
}

impl Default for ColorTransform {
    fn default() -> Self {
        Self::scrgb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hdrpq_primaries::{DISPLAY_P3, REC709, SCRGB_WHITE_NITS};

    #[test]
    fn test_output_in_unit_cube() {
        let t = ColorTransform::scrgb();
        let inputs = [
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0],
            [125.0, 0.0, 0.0],
            [-4.0, 2.0, 9000.0],
            [0.0, -1e6, 1e6],
            [0.18, 0.5, 0.02],
        ];
        for rgb in inputs {
            let out = t.apply(rgb);
            for c in out.to_array() {
                assert!((0.0..=1.0).contains(&c), "{rgb:?} -> {out:?}");
            }
        }
    }

    #[test]
    fn test_scrgb_white_is_80_nits() {
        let out = ColorTransform::scrgb().apply([1.0, 1.0, 1.0]);
        for c in out.to_array() {
            assert_relative_eq!(c, 0.008, max_relative = 1e-4);
        }
    }

    #[test]
    fn test_negative_clipped_to_zero() {
        let out = ColorTransform::scrgb().apply([-1.0, -1.0, -1.0]);
        assert_eq!(out, Vec3::ZERO);
    }

    #[test]
    fn test_from_primaries_matches_scrgb() {
        let derived = ColorTransform::from_primaries(&REC709, SCRGB_WHITE_NITS);
        assert!(derived.matrix().max_abs_diff(ColorTransform::scrgb().matrix()) < 5e-6);
    }

    #[test]
    fn test_display_p3_source() {
        // 10,000-nit-white P3 green: inside Rec.2020, nothing negative to clip.
        let t = ColorTransform::from_primaries(&DISPLAY_P3, 10000.0);
        let out = t.apply([0.0, 1.0, 0.0]);
        assert!(out.y > out.x && out.y > out.z);
        assert!(out.x > 0.0);
    }
}
