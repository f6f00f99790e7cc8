//! Opaque-pixel view over a normalized buffer, and hex color encoding.

use crate::features::error::ColorAnalysisError;
use image::RgbaImage;

/// The normalized, 4-channel pixel grid every color analysis works on.
pub type PixelBuffer = RgbaImage;

/// The pixels of a [`PixelBuffer`] whose alpha is above a threshold.
///
/// This is a filtered view; the pixels are never copied out of the buffer.
#[derive(Debug, Clone, Copy)]
pub struct OpaquePixelSet<'a> {
    raw: &'a [u8],
    threshold: u8,
    len: usize,
}

impl<'a> OpaquePixelSet<'a> {
    pub fn new(buffer: &'a PixelBuffer, threshold: u8) -> Result<Self, ColorAnalysisError> {
        Self::from_raw(buffer.width(), buffer.height(), buffer.as_raw(), threshold)
    }

    /// Builds the view over interleaved RGBA bytes, checking them against the dimensions.
    pub fn from_raw(
        width: u32,
        height: u32,
        raw: &'a [u8],
        threshold: u8,
    ) -> Result<Self, ColorAnalysisError> {
        let expected = width as usize * height as usize * 4;
        if raw.len() != expected {
            return Err(ColorAnalysisError::InvalidPixelBuffer {
                expected,
                actual: raw.len(),
            });
        }
        let len = raw
            .chunks_exact(4)
            .filter(|px| px[3] > threshold)
            .count();
        Ok(Self {
            raw,
            threshold,
            len,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// RGB triples of the opaque pixels in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = [u8; 3]> + 'a {
        let threshold = self.threshold;
        self.raw
            .chunks_exact(4)
            .filter(move |px| px[3] > threshold)
            .map(|px| [px[0], px[1], px[2]])
    }
}

fn channel_to_u8(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Formats `[0, 1]` channels as `#RRGGBB`.
pub fn rgb_to_hex(rgb: [f64; 3]) -> String {
    let [r, g, b] = rgb.map(channel_to_u8);
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Parses `#RRGGBB` (leading `#` optional) into 8-bit channels.
pub fn hex_to_rgb(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
