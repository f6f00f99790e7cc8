//! # Image Stats
//!
//! Extract sanitized Exif metadata and color statistics from a single image.
//!
//! Given the raw bytes of an image, [`analyze`] produces an [`AnalysisResult`] holding:
//!
//! - **Exif Data**: every named tag of the primary image, coerced to numbers, text or lists,
//!   with the GPS block kept only when it holds real coordinates.
//! - **Average Color**: the per-channel arithmetic, harmonic or geometric mean of all
//!   opaque pixels.
//! - **Dominant Color**: the most populated region of a quantized HSV space.
//!
//! Images larger than 512 pixels on their longest edge are downsampled before the color
//! analysis. Only a failure to decode the image is reported as an error; broken metadata
//! or a fully transparent image degrade the result instead.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use image_stats::{Config, ImageAnalyzer};
//!
//! fn main() -> color_eyre::Result<()> {
//!     let analyzer = ImageAnalyzer::new(Config::from_env()?);
//!     let bytes = std::fs::read("assets/sunset.jpg")?;
//!
//!     let result = analyzer.analyze(&bytes)?;
//!     println!("{}", serde_json::to_string_pretty(&result)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod features;
pub mod image_analyzer;
pub mod source;
pub mod structs;

pub use config::{AveragingMethod, Config, ConfigError, HostRewrite};
pub use error::ImageStatsError;
pub use features::error::{ColorAnalysisError, DecodeError, ExifError};
pub use image_analyzer::{ImageAnalyzer, analyze};
pub use structs::{AnalysisResult, ColorData, ColorResult, ExifRecord, ExifValue};
