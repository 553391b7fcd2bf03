//! Worker body: convert one scanline range and gather its statistics.

use hdrpq_core::{ConvertedImage, Sample, SourceImage};
use hdrpq_transfer::{pq, quantize};
use tracing::{debug, trace};

use crate::partition::RowRange;
use crate::stats::WorkerStats;
use crate::transform::ColorTransform;

/// Color transform plus PQ quantization at a fixed bit depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelEncoder {
    transform: ColorTransform,
    bits: u8,
}

impl PixelEncoder {
    /// Creates an encoder writing `bits`-bit samples.
    pub fn new(transform: ColorTransform, bits: u8) -> Self {
        Self { transform, bits }
    }

    /// Output bit depth.
    #[inline]
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Converts one pixel into `out[0..3]`, returning its clipped peak
    /// channel value.
    #[inline]
    pub fn encode(&self, rgb: [f32; 3], out: &mut [u16]) -> f32 {
        let linear = self.transform.apply(rgb);
        for (dst, c) in out.iter_mut().zip(linear.to_array()) {
            *dst = quantize(pq::encode(c), self.bits);
        }
        linear.max_element()
    }
}

/// Converts rows `range` of `src` into `out` and records every pixel in
/// `stats`, which is handed back when the range is done.
///
/// `out` is this worker's exclusive slice of the converted buffer and must
/// hold exactly `range.len() * width * 3` samples.
pub fn process_rows<S: Sample>(
    src: &SourceImage<'_>,
    range: RowRange,
    out: &mut [u16],
    encoder: &PixelEncoder,
    mut stats: WorkerStats,
) -> WorkerStats {
    let format = S::FORMAT;
    trace!(start = range.start, stop = range.stop, %format, "process_rows");

    let row_samples = src.width() as usize * ConvertedImage::CHANNELS;
    assert_eq!(out.len(), range.len() * row_samples, "output slice does not match {range:?}");

    let size = std::mem::size_of::<S>();
    let pixel_bytes = src.pixel_bytes();

    for (y, out_row) in range.rows().zip(out.chunks_exact_mut(row_samples)) {
        let in_row = src.row(y);
        for (px, dst) in in_row
            .chunks_exact(pixel_bytes)
            .zip(out_row.chunks_exact_mut(ConvertedImage::CHANNELS))
        {
            // Alpha, if present, sits after the third sample and is skipped.
            let rgb = [S::read(px), S::read(&px[size..]), S::read(&px[2 * size..])];
            let peak = encoder.encode(rgb, dst);
            stats.record(peak);
        }
    }

    debug!(
        start = range.start,
        stop = range.stop,
        max_nits = stats.max_nits(),
        pixels = stats.pixels,
        "Worker range done"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdrpq_core::f16;

    #[test]
    fn test_encode_white_and_black() {
        let enc = PixelEncoder::new(ColorTransform::scrgb(), 16);
        let mut out = [0u16; 3];
        assert_eq!(enc.encode([1000.0, 1000.0, 1000.0], &mut out), 1.0);
        assert_eq!(out, [65535; 3]);
        assert_eq!(enc.encode([0.0, 0.0, 0.0], &mut out), 0.0);
        assert_eq!(out, [0; 3]);
    }

    #[test]
    fn test_encode_respects_bits() {
        let enc = PixelEncoder::new(ColorTransform::scrgb(), 10);
        let mut out = [0u16; 3];
        enc.encode([1000.0, 1000.0, 1000.0], &mut out);
        assert_eq!(out, [1023; 3]);
    }

    #[test]
    fn test_rows_rgba_f32() {
        // 2x3 RGBA, alpha set to garbage that must be ignored.
        let mut px = Vec::new();
        for y in 0..3 {
            for _ in 0..2 {
                let v = if y == 1 { 1000.0 } else { 0.0 };
                px.extend_from_slice(&[v, v, v, 12345.0]);
            }
        }
        let src = SourceImage::from_f32(&px, 2, 3, 4).unwrap();
        let enc = PixelEncoder::new(ColorTransform::scrgb(), 16);
        let mut out = vec![7u16; 2 * 2 * 3];
        let stats = process_rows::<f32>(
            &src,
            RowRange::new(1, 3),
            &mut out,
            &enc,
            WorkerStats::try_new(true).unwrap(),
        );

        assert_eq!(&out[..6], &[65535; 6]);
        assert_eq!(&out[6..], &[0; 6]);
        assert_eq!(stats.pixels, 4);
        assert_eq!(stats.max_nits(), 10000);
        assert_eq!(stats.histogram.as_ref().unwrap().count(10000), 2);
        assert_eq!(stats.histogram.as_ref().unwrap().count(0), 2);
    }

    #[test]
    fn test_rows_f16_matches_f32() {
        let values = [0.0f32, 0.25, 1.0, 4.0, 16.0, 64.0];
        let px32: Vec<f32> = values.iter().flat_map(|&v| [v, v * 0.5, v * 0.25]).collect();
        let px16: Vec<f16> = px32.iter().map(|&v| f16::from_f32(v)).collect();

        let enc = PixelEncoder::new(ColorTransform::scrgb(), 16);
        let range = RowRange::new(0, 2);

        let src32 = SourceImage::from_f32(&px32, 3, 2, 3).unwrap();
        let mut out32 = vec![0u16; 18];
        let s32 = process_rows::<f32>(&src32, range, &mut out32, &enc, WorkerStats::try_new(false).unwrap());

        let src16 = SourceImage::from_f16(&px16, 3, 2, 3).unwrap();
        let mut out16 = vec![0u16; 18];
        let s16 = process_rows::<f16>(&src16, range, &mut out16, &enc, WorkerStats::try_new(false).unwrap());

        // Every value above is exactly representable in half precision.
        assert_eq!(out32, out16);
        assert_eq!(s32, s16);
    }
}
