pub mod average;
pub mod decode;
pub mod dominant;
pub mod error;
pub mod exif;
pub mod gps;
pub mod pixels;

#[cfg(test)]
pub(crate) mod fixtures;
