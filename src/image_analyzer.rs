use crate::config::Config;
use crate::error::ImageStatsError;
use crate::features::average::average_color;
use crate::features::decode::{decode, normalize};
use crate::features::dominant::dominant_color;
use crate::features::error::{ColorAnalysisError, DecodeError};
use crate::features::exif::extract_exif;
use crate::features::pixels::{OpaquePixelSet, PixelBuffer};
use crate::structs::{AnalysisResult, ColorData, ExifRecord};
use log::{debug, info, warn};

/// Analyzes one in-memory image.
///
/// Decoding is the only step that can fail. Exif extraction and color analysis are
/// independent of each other: a broken metadata block yields an empty `exif_data`,
/// and a color failure or an image without opaque pixels yields `color_data: None`.
///
/// # Errors
///
/// Returns [`DecodeError`] when `bytes` is empty or not a decodable image.
pub fn analyze(bytes: &[u8], config: &Config) -> Result<AnalysisResult, DecodeError> {
    let img = decode(bytes)?;
    info!(
        "Processing {}x{} image using {} averaging method",
        img.width(),
        img.height(),
        config.averaging_method
    );

    let (exif_data, pixels) = rayon::join(
        || exif_or_empty(bytes),
        || normalize(&img, config.max_dimension),
    );

    let color_data = analyze_colors(&pixels, config).unwrap_or_else(|e| {
        warn!("Color analysis failed, returning no color data: {e}");
        None
    });

    Ok(AnalysisResult {
        exif_data,
        color_data,
    })
}

fn exif_or_empty(bytes: &[u8]) -> ExifRecord {
    extract_exif(bytes).unwrap_or_else(|e| {
        warn!("Error extracting Exif data: {e}");
        ExifRecord::default()
    })
}

/// Runs the average and dominant color analyses over the opaque pixels of `pixels`.
///
/// `Ok(None)` means the image has no opaque pixels.
pub fn analyze_colors(
    pixels: &PixelBuffer,
    config: &Config,
) -> Result<Option<ColorData>, ColorAnalysisError> {
    let opaque = OpaquePixelSet::new(pixels, config.alpha_threshold)?;
    if opaque.is_empty() {
        debug!("No opaque pixels, skipping color analysis");
        return Ok(None);
    }

    let (avg_color, dominant_color) = rayon::join(
        || average_color(&opaque, config.averaging_method),
        || dominant_color(&opaque),
    );

    Ok(match (avg_color?, dominant_color?) {
        (Some(avg_color), Some(dominant_color)) => Some(ColorData {
            avg_color,
            dominant_color,
        }),
        _ => None,
    })
}

/// Owns the process configuration so callers don't have to thread it through.
///
/// ```rust
/// # use image_stats::{Config, ImageAnalyzer, AveragingMethod};
/// let analyzer = ImageAnalyzer::new(
///     Config::builder()
///         .averaging_method(AveragingMethod::Geometric)
///         .build(),
/// );
/// assert!(analyzer.analyze(b"not an image").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImageAnalyzer {
    config: Config,
}

impl ImageAnalyzer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Builds an analyzer from environment variables, see [`Config::from_env`].
    pub fn from_env() -> Result<Self, ImageStatsError> {
        Ok(Self::new(Config::from_env()?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn analyze(&self, bytes: &[u8]) -> Result<AnalysisResult, DecodeError> {
        analyze(bytes, &self.config)
    }
}
