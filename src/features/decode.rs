use crate::features::error::DecodeError;
use crate::features::pixels::PixelBuffer;
use image::DynamicImage;
use image::imageops::FilterType;
use log::debug;

/// Decodes an in-memory image container (JPEG, PNG, WebP, ...) without touching the bytes.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    Ok(image::load_from_memory(bytes)?)
}

/// Dimensions an image must be scaled to so its longest edge is `max_dimension`.
///
/// Returns `None` when the image already fits. A `max_dimension` of 0 is treated as 1.
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> Option<(u32, u32)> {
    let max_dimension = max_dimension.max(1);
    let longest = width.max(height);
    if longest <= max_dimension {
        return None;
    }
    let scale = f64::from(max_dimension) / f64::from(longest);
    let shrink = |edge: u32| ((f64::from(edge) * scale).round() as u32).clamp(1, max_dimension);
    if width >= height {
        Some((max_dimension, shrink(height)))
    } else {
        Some((shrink(width), max_dimension))
    }
}

/// Downsamples oversized images and converts every color mode to RGBA8.
pub fn normalize(img: &DynamicImage, max_dimension: u32) -> PixelBuffer {
    match target_dimensions(img.width(), img.height(), max_dimension) {
        Some((width, height)) => {
            debug!(
                "Resizing {}x{} image to {}x{} for color processing",
                img.width(),
                img.height(),
                width,
                height
            );
            img.resize_exact(width, height, FilterType::Lanczos3)
                .into_rgba8()
        }
        None => img.to_rgba8(),
    }
}
