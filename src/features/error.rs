use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("No image bytes were provided")]
    EmptyInput,

    #[error("Image could not be decoded: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Error, Debug)]
pub enum ExifError {
    #[error("Malformed Exif block: {0}")]
    Read(#[from] exif::Error),
}

#[derive(Error, Debug, PartialEq)]
pub enum ColorAnalysisError {
    #[error("{stage} produced a non-finite value for channel {channel}")]
    NonFiniteChannel { stage: &'static str, channel: usize },

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    InvalidPixelBuffer { expected: usize, actual: usize },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GpsError {
    #[error("Missing required GPS field: {0}")]
    MissingField(&'static str),

    #[error("GPS reference field is empty: {0}")]
    EmptyReference(&'static str),

    #[error("GPS coordinate is not a list of numbers: {0}")]
    MalformedCoordinate(&'static str),

    #[error("GPS coordinate holds the zero placeholder: {0}")]
    ZeroCoordinate(&'static str),
}
