use crate::config::AveragingMethod;
use crate::features::error::ColorAnalysisError;
use crate::features::pixels::OpaquePixelSet;
use crate::structs::ColorResult;

/// Floor applied to 0-255 channel values before taking a reciprocal or a logarithm,
/// so black channels neither divide by zero nor hit `ln(0)`.
pub const CHANNEL_EPSILON: f64 = 1e-8;

/// Reduces the opaque pixels to one color with the given per-channel mean.
///
/// Returns `Ok(None)` when there are no opaque pixels.
pub fn average_color(
    pixels: &OpaquePixelSet<'_>,
    method: AveragingMethod,
) -> Result<Option<ColorResult>, ColorAnalysisError> {
    if pixels.is_empty() {
        return Ok(None);
    }
    let n = pixels.len() as f64;

    let means = match method {
        AveragingMethod::Arithmetic => channel_sums(pixels, f64::from).map(|sum| sum / n),
        AveragingMethod::Harmonic => {
            channel_sums(pixels, |c| 1.0 / f64::from(c).max(CHANNEL_EPSILON)).map(|sum| n / sum)
        }
        AveragingMethod::Geometric => {
            channel_sums(pixels, |c| f64::from(c).max(CHANNEL_EPSILON).ln())
                .map(|sum| (sum / n).exp())
        }
    };

    let mut rgb = [0.0; 3];
    for (channel, mean) in means.into_iter().enumerate() {
        if !mean.is_finite() {
            return Err(ColorAnalysisError::NonFiniteChannel {
                stage: method.as_str(),
                channel,
            });
        }
        rgb[channel] = mean / 255.0;
    }
    Ok(Some(ColorResult::new(rgb, Some(method))))
}

/// Sums `f(channel)` per channel in pixel order, which keeps results bit-for-bit reproducible.
fn channel_sums(pixels: &OpaquePixelSet<'_>, f: impl Fn(u8) -> f64) -> [f64; 3] {
    pixels.iter().fold([0.0; 3], |mut acc, px| {
        for (sum, c) in acc.iter_mut().zip(px) {
            *sum += f(c);
        }
        acc
    })
}
