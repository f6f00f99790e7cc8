use thiserror::Error;

/// The primary error type for the image-stats crate.
#[derive(Error, Debug)]
pub enum ImageStatsError {
    #[error("Image decoding failed: {0}")]
    Decode(#[from] crate::features::error::DecodeError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Could not load image source: {0}")]
    Source(#[from] crate::source::SourceError),

    #[error("Analysis task did not complete")]
    Task(#[from] tokio::task::JoinError),
}
