use crate::config::AveragingMethod;
use crate::features::pixels::rgb_to_hex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single scalar Exif value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ExifPrimitive {
    Int(i64),
    Float(f64),
    Text(String),
}

/// A sanitized Exif value. Anything that is not a number or a list of numbers
/// ends up as `Text`, so every value is guaranteed to serialize.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ExifValue {
    Int(i64),
    Float(f64),
    Text(String),
    Sequence(Vec<ExifPrimitive>),
}

impl From<ExifPrimitive> for ExifValue {
    fn from(value: ExifPrimitive) -> Self {
        match value {
            ExifPrimitive::Int(i) => Self::Int(i),
            ExifPrimitive::Float(f) => Self::Float(f),
            ExifPrimitive::Text(s) => Self::Text(s),
        }
    }
}

pub type ExifTags = BTreeMap<String, ExifValue>;

/// Sanitized metadata, keyed by Exif tag name.
///
/// The GPS sub-block is only present when it passed validation as a whole.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExifRecord {
    #[serde(flatten)]
    pub tags: ExifTags,
    #[serde(rename = "GPSInfo", default, skip_serializing_if = "Option::is_none")]
    pub gps_info: Option<ExifTags>,
}

impl ExifRecord {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.gps_info.is_none()
    }

    pub fn get(&self, tag: &str) -> Option<&ExifValue> {
        self.tags.get(tag)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ColorResult {
    /// Channels in the `[0, 1]` range.
    pub rgb: [f64; 3],
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<AveragingMethod>,
}

impl ColorResult {
    pub fn new(rgb: [f64; 3], method: Option<AveragingMethod>) -> Self {
        let rgb = rgb.map(|c| c.clamp(0.0, 1.0));
        Self {
            hex: rgb_to_hex(rgb),
            rgb,
            method,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ColorData {
    pub avg_color: ColorResult,
    pub dominant_color: ColorResult,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisResult {
    pub exif_data: ExifRecord,
    pub color_data: Option<ColorData>,
}
