//! Sample formats of decoded source images.
//!
//! # Types
//!
//! - [`DataFormat`] - Runtime sample type tag reported by the decoder
//! - [`Sample`] - Float sample types the converter reads directly
//!
//! Only [`DataFormat::F16`] and [`DataFormat::F32`] carry linear HDR data;
//! integer tags exist so a decoder can describe what it produced and get a
//! proper [`Error::UnsupportedFormat`](crate::Error::UnsupportedFormat) back.
//!
//! # Usage
//!
//! ```rust
//! use hdrpq_core::format::{DataFormat, Sample};
//! use half::f16;
//!
//! assert!(DataFormat::F16.is_float());
//! assert_eq!(DataFormat::F32.bytes_per_channel(), 4);
//!
//! // Half samples are widened per pixel, no prior unification pass.
//! let h = f16::from_f32(0.5);
//! assert_eq!(Sample::to_f32(h), 0.5);
//! ```

use bytemuck::Pod;
use half::f16;

/// Runtime sample data format.
///
/// Represents the storage type of one channel value in the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataFormat {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit unsigned integer.
    U32,
    /// 16-bit half-precision float.
    F16,
    /// 32-bit single-precision float.
    #[default]
    F32,
}

impl DataFormat {
    /// Number of bytes per channel.
    #[inline]
    pub const fn bytes_per_channel(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::F16 => 2,
            Self::F32 => 4,
        }
    }

    /// Number of bits per channel.
    #[inline]
    pub const fn bits(&self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 | Self::F16 => 16,
            Self::U32 | Self::F32 => 32,
        }
    }

    /// Whether this is a floating-point format.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F16 | Self::F32)
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::F16 => "f16",
            Self::F32 => "f32",
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A float sample type that can be read from an unaligned byte buffer.
///
/// Implemented for `f32` and [`half::f16`]. The converter is monomorphized
/// over this trait so the per-pixel loop carries no format dispatch.
pub trait Sample: Pod + Send + Sync {
    /// Runtime tag of this sample type.
    const FORMAT: DataFormat;

    /// Widens to `f32`.
    fn to_f32(self) -> f32;

    /// Reads one sample from the start of `bytes`.
    ///
    /// `bytes` must hold at least `size_of::<Self>()` bytes.
    #[inline]
    fn read(bytes: &[u8]) -> f32 {
        bytemuck::pod_read_unaligned::<Self>(&bytes[..std::mem::size_of::<Self>()]).to_f32()
    }
}

impl Sample for f32 {
    const FORMAT: DataFormat = DataFormat::F32;

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }
}

impl Sample for f16 {
    const FORMAT: DataFormat = DataFormat::F16;

    #[inline]
    fn to_f32(self) -> f32 {
        f16::to_f32(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_channel() {
        assert_eq!(DataFormat::U8.bytes_per_channel(), 1);
        assert_eq!(DataFormat::F16.bytes_per_channel(), 2);
        assert_eq!(DataFormat::F32.bytes_per_channel(), 4);
        assert_eq!(DataFormat::F16.bits(), 16);
    }

    #[test]
    fn test_is_float() {
        assert!(DataFormat::F16.is_float());
        assert!(DataFormat::F32.is_float());
        assert!(!DataFormat::U16.is_float());
    }

    #[test]
    fn test_read_unaligned() {
        let value = 12.5f32;
        let mut bytes = vec![0u8];
        bytes.extend_from_slice(&value.to_ne_bytes());
        assert_eq!(<f32 as Sample>::read(&bytes[1..]), 12.5);

        let half = f16::from_f32(-0.25);
        let mut bytes = vec![0u8; 3];
        bytes.extend_from_slice(bytemuck::bytes_of(&half));
        assert_eq!(<f16 as Sample>::read(&bytes[3..]), -0.25);
    }

    #[test]
    fn test_sample_format_tags() {
        assert_eq!(<f32 as Sample>::FORMAT, DataFormat::F32);
        assert_eq!(<f16 as Sample>::FORMAT, DataFormat::F16);
    }
}
