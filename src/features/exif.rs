use crate::features::error::ExifError;
use crate::features::gps::validate_gps;
use crate::structs::{ExifPrimitive, ExifRecord, ExifTags, ExifValue};
use exif::{Context, Field, In, Tag, Value};
use log::debug;
use std::io::Cursor;

/// Reads the Exif block straight from the undecoded container bytes.
///
/// A file without Exif, or in a container format that cannot carry it (BMP, GIF),
/// yields an empty record. Only a block that exists but cannot be parsed is an error.
pub fn extract_exif(bytes: &[u8]) -> Result<ExifRecord, ExifError> {
    let mut cursor = Cursor::new(bytes);
    match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => Ok(sanitize_fields(exif.fields())),
        Err(exif::Error::NotFound(_)) => Ok(ExifRecord::default()),
        Err(exif::Error::InvalidFormat(reason)) => {
            debug!("No Exif container in image ({reason}), returning empty record");
            Ok(ExifRecord::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Turns raw Exif fields into a serializable record.
///
/// Only named tags of the primary image are kept. GPS tags are collected into a
/// separate block that is dropped entirely unless it validates.
pub fn sanitize_fields<'a>(fields: impl IntoIterator<Item = &'a Field>) -> ExifRecord {
    let mut tags = ExifTags::new();
    let mut gps = ExifTags::new();

    for field in fields {
        if field.ifd_num != In::PRIMARY || is_pointer(field.tag) {
            continue;
        }
        // Unnamed tags would only show up as "Tag(Exif, 12345)".
        if field.tag.description().is_none() {
            continue;
        }
        let name = field.tag.to_string();
        let value = sanitize_value(field);
        if field.tag.context() == Context::Gps {
            gps.insert(name, value);
        } else {
            tags.insert(name, value);
        }
    }

    let gps_info = if gps.is_empty() {
        None
    } else {
        validate_gps(gps)
            .map_err(|e| debug!("Dropping GPS block: {e}"))
            .ok()
    };

    ExifRecord { tags, gps_info }
}

fn is_pointer(tag: Tag) -> bool {
    matches!(
        tag,
        Tag::ExifIFDPointer | Tag::GPSInfoIFDPointer | Tag::InteropIFDPointer
    )
}

/// Numbers stay numbers, rationals become floats, and everything else falls back to text.
pub fn sanitize_value(field: &Field) -> ExifValue {
    let sanitized = match &field.value {
        Value::Byte(v) => Some(ints(v.iter().map(|&x| i64::from(x)))),
        Value::Short(v) => Some(ints(v.iter().map(|&x| i64::from(x)))),
        Value::Long(v) => Some(ints(v.iter().map(|&x| i64::from(x)))),
        Value::SByte(v) => Some(ints(v.iter().map(|&x| i64::from(x)))),
        Value::SShort(v) => Some(ints(v.iter().map(|&x| i64::from(x)))),
        Value::SLong(v) => Some(ints(v.iter().map(|&x| i64::from(x)))),
        Value::Rational(v) => floats(
            v.iter()
                .map(|r| ratio(f64::from(r.num), f64::from(r.denom))),
        ),
        Value::SRational(v) => floats(
            v.iter()
                .map(|r| ratio(f64::from(r.num), f64::from(r.denom))),
        ),
        Value::Float(v) => floats(v.iter().map(|&x| f64::from(x))),
        Value::Double(v) => floats(v.iter().copied()),
        Value::Ascii(v) => Some(texts(v)),
        _ => None,
    };
    sanitized.unwrap_or_else(|| ExifValue::Text(field.display_value().to_string()))
}

fn ratio(num: f64, denom: f64) -> f64 {
    if denom == 0.0 { 0.0 } else { num / denom }
}

fn collapse(mut items: Vec<ExifPrimitive>) -> ExifValue {
    if items.len() == 1 {
        if let Some(item) = items.pop() {
            return item.into();
        }
    }
    ExifValue::Sequence(items)
}

fn ints(values: impl Iterator<Item = i64>) -> ExifValue {
    collapse(values.map(ExifPrimitive::Int).collect())
}

/// `None` when any component is not finite, so the caller falls back to text.
fn floats(values: impl Iterator<Item = f64>) -> Option<ExifValue> {
    values
        .map(|f| f.is_finite().then_some(ExifPrimitive::Float(f)))
        .collect::<Option<Vec<_>>>()
        .map(collapse)
}

fn texts(values: &[Vec<u8>]) -> ExifValue {
    collapse(
        values
            .iter()
            .map(|bytes| {
                let s = String::from_utf8_lossy(bytes);
                ExifPrimitive::Text(s.trim_end_matches('\0').trim_end().to_string())
            })
            .collect(),
    )
}
