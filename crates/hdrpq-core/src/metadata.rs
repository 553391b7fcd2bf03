//! HDR metadata handed to the encoder alongside the converted buffer.
//!
//! - [`ContentLightLevel`] - MaxCLL / MaxPALL in nits
//! - [`ColorInfo`] - CICP code points (ITU-T H.273) for the output
//! - [`OutputLayout`] - RGB or YUV output, selects the matrix coefficients
//! - [`EncoderHints`] - everything the encode collaborator needs in one value

use serde::{Deserialize, Serialize};

/// Content light level information, in nits (cd/m2).
///
/// Produced once per conversion and never modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContentLightLevel {
    /// Maximum content light level (peak pixel, or percentile cap).
    pub max_cll: u16,
    /// Maximum frame-average light level.
    pub max_pall: u16,
}

impl ContentLightLevel {
    /// Creates light level metadata.
    #[inline]
    pub const fn new(max_cll: u16, max_pall: u16) -> Self {
        Self { max_cll, max_pall }
    }
}

impl std::fmt::Display for ContentLightLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} MaxCLL, {} MaxPALL", self.max_cll, self.max_pall)
    }
}

/// Color primaries code point (H.273 Table 2).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorPrimaries {
    /// ITU-R BT.709
    Bt709 = 1,
    /// ITU-R BT.2020 / BT.2100
    Bt2020 = 9,
}

/// Transfer characteristics code point (H.273 Table 3).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferCharacteristics {
    /// Linear
    Linear = 8,
    /// SMPTE ST 2084 (PQ)
    Smpte2084 = 16,
}

/// Matrix coefficients code point (H.273 Table 4).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixCoefficients {
    /// Identity, samples are stored as RGB
    Identity = 0,
    /// ITU-R BT.2020 non-constant luminance
    Bt2020Ncl = 9,
}

/// Whether the encoder stores RGB samples or converts them to YUV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// YUV, BT.2020 non-constant luminance matrix.
    #[default]
    Yuv,
    /// RGB, identity matrix. Much larger files.
    Rgb,
}

impl OutputLayout {
    /// Matrix coefficients the encoder must signal for this layout.
    #[inline]
    pub const fn matrix_coefficients(&self) -> MatrixCoefficients {
        match self {
            Self::Yuv => MatrixCoefficients::Bt2020Ncl,
            Self::Rgb => MatrixCoefficients::Identity,
        }
    }
}

/// CICP color description of the converted buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorInfo {
    /// Output primaries.
    pub primaries: ColorPrimaries,
    /// Output transfer function.
    pub transfer: TransferCharacteristics,
    /// Matrix coefficients.
    pub matrix: MatrixCoefficients,
}

impl ColorInfo {
    /// BT.2100 PQ description for the given layout.
    pub const fn bt2100_pq(layout: OutputLayout) -> Self {
        Self {
            primaries: ColorPrimaries::Bt2020,
            transfer: TransferCharacteristics::Smpte2084,
            matrix: layout.matrix_coefficients(),
        }
    }

    /// Code points as `(primaries, transfer, matrix)`.
    #[inline]
    pub const fn code_points(&self) -> (u8, u8, u8) {
        (self.primaries as u8, self.transfer as u8, self.matrix as u8)
    }
}

/// Settings forwarded to the encode collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncoderHints {
    /// RGB or YUV output.
    pub layout: OutputLayout,
    /// Bit depth of the encoded image (10 or 12).
    pub target_bits: u8,
    /// Bit depth of the converted buffer.
    pub intermediate_bits: u8,
    /// Bytes per row of the converted buffer.
    pub row_bytes: usize,
}
