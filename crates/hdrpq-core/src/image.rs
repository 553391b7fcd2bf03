//! Source and converted image buffers.
//!
//! - [`SourceImage`] - borrowed, read-only view of decoded linear float pixels
//! - [`ConvertedImage`] - owned, tightly packed PQ-encoded integer samples
//!
//! # Memory Layout
//!
//! Both buffers are row-major, top-to-bottom. The source may carry an alpha
//! channel and row padding; the converted buffer never does:
//!
//! ```text
//! Source:    [R G B (A) R G B (A) ... pad]  <- row 0, `stride` bytes
//! Converted: [R G B R G B ...]              <- row 0, `3 * width` samples
//! ```

use crate::error::{Error, Result};
use crate::format::DataFormat;
use half::f16;

/// Borrowed view of a decoded HDR image.
///
/// Holds raw bytes plus the layout needed to read them: dimensions, sample
/// format, channel count (3 for RGB, 4 for RGBA with alpha ignored) and row
/// stride in bytes. The layout is validated on construction.
///
/// # Example
///
/// ```rust
/// use hdrpq_core::SourceImage;
///
/// let pixels = vec![0.5f32; 4 * 2 * 3];
/// let src = SourceImage::from_f32(&pixels, 4, 2, 3).unwrap();
/// assert_eq!(src.stride(), 4 * 3 * 4);
/// assert_eq!(src.pixel_count(), 8);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SourceImage<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    format: DataFormat,
    channels: u8,
    stride: usize,
}

impl<'a> SourceImage<'a> {
    /// Creates a view over raw bytes with an explicit row stride.
    ///
    /// Integer formats are accepted here so the description can be carried
    /// around; the converter rejects them.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        format: DataFormat,
        channels: u8,
        stride: usize,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "zero-sized image"));
        }
        if channels != 3 && channels != 4 {
            return Err(Error::ChannelMismatch {
                expected: "3 or 4",
                got: channels,
            });
        }

        let min_stride = (width as usize)
            .checked_mul(channels as usize * format.bytes_per_channel())
            .ok_or_else(|| Error::invalid_dimensions(width, height, "row size overflows usize"))?;
        if stride < min_stride {
            return Err(Error::InvalidStride {
                stride,
                min_stride,
                width,
            });
        }

        // The last row only needs its pixels, not its padding.
        let required = stride
            .checked_mul(height as usize - 1)
            .and_then(|n| n.checked_add(min_stride))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows usize"))?;
        if data.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            format,
            channels,
            stride,
        })
    }

    /// Creates a tightly packed view over `f32` samples.
    pub fn from_f32(pixels: &'a [f32], width: u32, height: u32, channels: u8) -> Result<Self> {
        let stride = width as usize * channels as usize * 4;
        Self::new(
            bytemuck::cast_slice(pixels),
            width,
            height,
            DataFormat::F32,
            channels,
            stride,
        )
    }

    /// Creates a tightly packed view over half-float samples.
    pub fn from_f16(pixels: &'a [f16], width: u32, height: u32, channels: u8) -> Result<Self> {
        let stride = width as usize * channels as usize * 2;
        Self::new(
            bytemuck::cast_slice(pixels),
            width,
            height,
            DataFormat::F16,
            channels,
            stride,
        )
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample format.
    #[inline]
    pub fn format(&self) -> DataFormat {
        self.format
    }

    /// Channels per pixel (3 or 4).
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Row stride in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Bytes per pixel.
    #[inline]
    pub fn pixel_bytes(&self) -> usize {
        self.channels as usize * self.format.bytes_per_channel()
    }

    /// Total pixel count.
    #[inline]
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Pixel bytes of row `y`, without trailing padding.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &'a [u8] {
        assert!(y < self.height, "row {y} out of bounds for height {}", self.height);
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize * self.pixel_bytes()]
    }
}

/// Owned buffer of PQ-encoded samples.
///
/// `width * height * 3` samples, each in `[0, 2^bits - 1]`, row-major and
/// tightly packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedImage {
    data: Vec<u16>,
    width: u32,
    height: u32,
    bits: u8,
}

impl ConvertedImage {
    /// Channels per pixel in the converted buffer.
    pub const CHANNELS: usize = 3;

    /// Wraps an already filled sample buffer.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != width * height * 3`.
    pub fn from_vec(data: Vec<u16>, width: u32, height: u32, bits: u8) -> Self {
        assert_eq!(
            data.len(),
            width as usize * height as usize * Self::CHANNELS,
            "converted buffer length does not match {width}x{height}"
        );
        Self {
            data,
            width,
            height,
            bits,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bit depth of the samples.
    #[inline]
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Samples per row (`3 * width`).
    #[inline]
    pub fn row_samples(&self) -> usize {
        self.width as usize * Self::CHANNELS
    }

    /// Bytes per row as handed to the encoder.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.row_samples() * std::mem::size_of::<u16>()
    }

    /// All samples.
    #[inline]
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Returns the `[R, G, B]` samples at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u16; 3] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = y as usize * self.row_samples() + x as usize * Self::CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Consumes the image, returning the sample buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<u16> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f32_packed() {
        let px = vec![0.0f32; 5 * 3 * 4];
        let src = SourceImage::from_f32(&px, 5, 3, 4).unwrap();
        assert_eq!(src.stride(), 80);
        assert_eq!(src.pixel_bytes(), 16);
        assert_eq!(src.row(2).len(), 80);
    }

    #[test]
    fn test_padded_stride() {
        // 2x2 RGB f32 rows padded to 32 bytes; last row unpadded.
        let bytes = vec![0u8; 32 + 24];
        let src = SourceImage::new(&bytes, 2, 2, DataFormat::F32, 3, 32).unwrap();
        assert_eq!(src.row(1).len(), 24);
    }

    #[test]
    fn test_rejects_small_stride() {
        let bytes = vec![0u8; 64];
        let err = SourceImage::new(&bytes, 2, 2, DataFormat::F32, 3, 16).unwrap_err();
        assert!(matches!(err, Error::InvalidStride { min_stride: 24, .. }));
    }

    #[test]
    fn test_rejects_short_buffer() {
        let px = vec![0.0f32; 5];
        let err = SourceImage::from_f32(&px, 2, 1, 3).unwrap_err();
        assert!(matches!(err, Error::BufferTooSmall { required: 24, actual: 20 }));
    }

    #[test]
    fn test_rejects_channels_and_zero_size() {
        let px = vec![0.0f32; 8];
        assert!(matches!(
            SourceImage::from_f32(&px, 4, 1, 2),
            Err(Error::ChannelMismatch { got: 2, .. })
        ));
        assert!(SourceImage::from_f32(&px, 0, 1, 3).unwrap_err().is_input_error());
    }

    #[test]
    fn test_converted_layout() {
        let img = ConvertedImage::from_vec((0..18).collect(), 3, 2, 16);
        assert_eq!(img.row_samples(), 9);
        assert_eq!(img.row_bytes(), 18);
        assert_eq!(img.pixel(1, 1), [12, 13, 14]);
        assert_eq!(img.into_vec().len(), 18);
    }
}
