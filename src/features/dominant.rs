//! Dominant color by HSV quantization.
//!
//! Every opaque pixel is converted to HSV and dropped into one of
//! `HUE_BINS * SATURATION_BINS * VALUE_BINS` buckets. The most populated bucket wins
//! and its members' mean HSV is converted back to RGB.

use crate::features::error::ColorAnalysisError;
use crate::features::pixels::OpaquePixelSet;
use crate::structs::ColorResult;
use palette::{FromColor, Hsv, Srgb};

pub const HUE_BINS: usize = 10;
pub const SATURATION_BINS: usize = 10;
pub const VALUE_BINS: usize = 10;

const BUCKET_COUNT: usize = HUE_BINS * SATURATION_BINS * VALUE_BINS;

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    count: usize,
    /// Row-major index of the first opaque pixel that landed here.
    first_seen: usize,
    /// Running sums of hue (degrees), saturation and value.
    sums: [f64; 3],
}

fn bin(fraction: f32, bins: usize) -> usize {
    ((fraction * bins as f32) as usize).min(bins - 1)
}

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
fn to_hsv(rgb: [u8; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let hsv: Hsv = Hsv::from_color(Srgb::<u8>::new(r, g, b).into_format::<f32>());
    [
        hsv.hue.into_positive_degrees(),
        hsv.saturation,
        hsv.value,
    ]
}

fn bucket_index([hue, saturation, value]: [f32; 3]) -> usize {
    let h = bin(hue / 360.0, HUE_BINS);
    let s = bin(saturation, SATURATION_BINS);
    let v = bin(value, VALUE_BINS);
    (h * SATURATION_BINS + s) * VALUE_BINS + v
}

/// Finds the most common perceptual color among the opaque pixels.
///
/// Ties between equally large buckets go to the bucket whose first member comes
/// earliest in row-major order. Returns `Ok(None)` when there are no opaque pixels.
pub fn dominant_color(
    pixels: &OpaquePixelSet<'_>,
) -> Result<Option<ColorResult>, ColorAnalysisError> {
    if pixels.is_empty() {
        return Ok(None);
    }

    let mut buckets = vec![Bucket::default(); BUCKET_COUNT];
    for (i, rgb) in pixels.iter().enumerate() {
        let hsv = to_hsv(rgb);
        let bucket = &mut buckets[bucket_index(hsv)];
        if bucket.count == 0 {
            bucket.first_seen = i;
        }
        bucket.count += 1;
        for (sum, c) in bucket.sums.iter_mut().zip(hsv) {
            *sum += f64::from(c);
        }
    }

    let Some(winner) = buckets
        .iter()
        .filter(|b| b.count > 0)
        .min_by_key(|b| (std::cmp::Reverse(b.count), b.first_seen))
    else {
        return Ok(None);
    };

    let n = winner.count as f64;
    let [hue, saturation, value] = winner.sums.map(|sum| (sum / n) as f32);
    let hsv: Hsv = Hsv::new(hue, saturation, value);
    let rgb: Srgb = Srgb::from_color(hsv);
    let rgb = [rgb.red, rgb.green, rgb.blue].map(f64::from);

    if let Some(channel) = rgb.iter().position(|c| !c.is_finite()) {
        return Err(ColorAnalysisError::NonFiniteChannel {
            stage: "dominant",
            channel,
        });
    }
    Ok(Some(ColorResult::new(rgb, None)))
}
