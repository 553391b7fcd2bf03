//! # hdrpq-primaries
//!
//! Color primaries, white points and the RGB-to-RGB matrices used to move
//! linear source pixels into BT.2100 (Rec.2020) primaries.
//!
//! The conversion matrices here do two things at once: change primaries and
//! rescale from the source's reference white to the PQ range, where 1.0 is
//! 10,000 nits. For scRGB (1.0 = 80 nits) that scale is `80 / 10000`.
//!
//! # Usage
//!
//! ```rust
//! use hdrpq_primaries::{SCRGB_TO_BT2100, REC709, REC2020, gamut_matrix};
//! use hdrpq_math::Vec3;
//!
//! // scRGB 1.0 white lands at 80 nits, i.e. 0.008 of the PQ range.
//! let white = SCRGB_TO_BT2100 * Vec3::ONE;
//! assert!((white.y - 0.008).abs() < 1e-5);
//!
//! // The same matrix, derived from chromaticities.
//! let derived = gamut_matrix(&REC709, &REC2020, 80.0);
//! assert!(derived.max_abs_diff(&SCRGB_TO_BT2100) < 5e-6);
//! ```
//!
//! # Dependencies
//!
//! - `hdrpq-math` - Matrix operations
//!
//! # Used By
//!
//! - `hdrpq-engine` - per-pixel color transform

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use hdrpq_math::{Mat3, Vec3};

/// Peak luminance of the PQ range in nits.
pub const PQ_PEAK_NITS: f32 = 10000.0;

/// Luminance of scRGB 1.0 in nits.
pub const SCRGB_WHITE_NITS: f32 = 80.0;

/// RGB color space primaries definition.
///
/// Primaries and white point as CIE xy chromaticity coordinates.
///
/// # Example
///
/// ```rust
/// use hdrpq_primaries::{Primaries, D65_XY};
///
/// let my_space = Primaries {
///     r: (0.64, 0.33),
///     g: (0.30, 0.60),
///     b: (0.15, 0.06),
///     w: D65_XY,
///     name: "Custom",
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y) chromaticity
    pub r: (f32, f32),
    /// Green primary (x, y) chromaticity
    pub g: (f32, f32),
    /// Blue primary (x, y) chromaticity
    pub b: (f32, f32),
    /// White point (x, y) chromaticity
    pub w: (f32, f32),
    /// Color space name
    pub name: &'static str,
}

impl Primaries {
    /// White point as XYZ (Y=1).
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w.0, self.w.1)
    }
}

/// D65 white point chromaticity (daylight, ~6500K).
pub const D65_XY: (f32, f32) = (0.31270, 0.32900);

/// sRGB / Rec.709 primaries (D65). scRGB shares these.
pub const SRGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "sRGB",
};

/// Rec.709 primaries (identical to sRGB).
pub const REC709: Primaries = SRGB;

/// Rec.2020 / BT.2100 primaries (D65).
pub const REC2020: Primaries = Primaries {
    r: (0.7080, 0.2920),
    g: (0.1700, 0.7970),
    b: (0.1310, 0.0460),
    w: D65_XY,
    name: "Rec.2020",
};

/// Display P3 primaries (D65).
pub const DISPLAY_P3: Primaries = Primaries {
    r: (0.6800, 0.3200),
    g: (0.2650, 0.6900),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "Display P3",
};

/// Converts xy chromaticity to XYZ (with Y=1).
fn xy_to_xyz(x: f32, y: f32) -> Vec3 {
    if y.abs() < 1e-10 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Computes the RGB to XYZ matrix for a set of primaries.
///
/// Primaries become the matrix columns, scaled so that RGB (1, 1, 1) maps
/// to the white point with Y = 1.
pub fn rgb_to_xyz_matrix(primaries: &Primaries) -> Mat3 {
    let r_xyz = xy_to_xyz(primaries.r.0, primaries.r.1);
    let g_xyz = xy_to_xyz(primaries.g.0, primaries.g.1);
    let b_xyz = xy_to_xyz(primaries.b.0, primaries.b.1);
    let w_xyz = primaries.white_xyz();

    let m = Mat3::from_col_vecs(r_xyz, g_xyz, b_xyz);

    // S = M^-1 * W
    let s = m.inverse().unwrap_or(Mat3::IDENTITY) * w_xyz;

    Mat3::from_col_vecs(r_xyz * s.x, g_xyz * s.y, b_xyz * s.z)
}

/// Computes the XYZ to RGB matrix for a set of primaries.
pub fn xyz_to_rgb_matrix(primaries: &Primaries) -> Mat3 {
    rgb_to_xyz_matrix(primaries)
        .inverse()
        .unwrap_or(Mat3::IDENTITY)
}

/// Converts between two RGB spaces through XYZ: `RGB_src -> XYZ -> RGB_dst`.
///
/// No chromatic adaptation is applied; both spaces are expected to share
/// a white point.
pub fn rgb_to_rgb_matrix(src: &Primaries, dst: &Primaries) -> Mat3 {
    xyz_to_rgb_matrix(dst) * rgb_to_xyz_matrix(src)
}

/// Matrix from linear `src` (1.0 = `white_nits`) to `dst` normalized to
/// the PQ range (1.0 = 10,000 nits).
pub fn gamut_matrix(src: &Primaries, dst: &Primaries, white_nits: f32) -> Mat3 {
    rgb_to_rgb_matrix(src, dst) * (white_nits / PQ_PEAK_NITS)
}

/// scRGB (Rec.709 primaries, 1.0 = 80 nits) to BT.2100 (1.0 = 10,000 nits).
///
/// Exact rational coefficients, evaluated in `f64` and rounded once.
pub const SCRGB_TO_BT2100: Mat3 = Mat3::from_rows([
    [
        (2939026994.0f64 / 585553224375.0) as f32,
        (9255011753.0f64 / 3513319346250.0) as f32,
        (173911579.0f64 / 501902763750.0) as f32,
    ],
    [
        (76515593.0f64 / 138420033750.0) as f32,
        (6109575001.0f64 / 830520202500.0) as f32,
        (75493061.0f64 / 830520202500.0) as f32,
    ],
    [
        (12225392.0f64 / 93230009375.0) as f32,
        (1772384008.0f64 / 2517210253125.0) as f32,
        (18035212433.0f64 / 2517210253125.0) as f32,
    ],
]);
