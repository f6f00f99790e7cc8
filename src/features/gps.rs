use crate::features::error::GpsError;
use crate::structs::{ExifPrimitive, ExifTags, ExifValue};

const COORDINATES: [(&str, &str); 2] = [
    ("GPSLatitude", "GPSLatitudeRef"),
    ("GPSLongitude", "GPSLongitudeRef"),
];

/// Accepts a sanitized GPS block only if latitude and longitude are fully usable.
///
/// Both coordinates need a non-empty hemisphere reference and a non-zero
/// degrees/minutes/seconds value. A block failing any check is rejected as a whole;
/// an accepted block is returned untouched.
pub fn validate_gps(gps: ExifTags) -> Result<ExifTags, GpsError> {
    for (coordinate, reference) in COORDINATES {
        match gps.get(reference) {
            None => return Err(GpsError::MissingField(reference)),
            Some(ExifValue::Text(s)) if !s.trim().is_empty() => {}
            Some(_) => return Err(GpsError::EmptyReference(reference)),
        }

        let components = gps
            .get(coordinate)
            .ok_or(GpsError::MissingField(coordinate))
            .and_then(|v| numeric_components(v).ok_or(GpsError::MalformedCoordinate(coordinate)))?;
        if components.iter().all(|c| *c == 0.0) {
            return Err(GpsError::ZeroCoordinate(coordinate));
        }
    }
    Ok(gps)
}

fn numeric_components(value: &ExifValue) -> Option<Vec<f64>> {
    let components: Vec<f64> = match value {
        ExifValue::Int(i) => vec![*i as f64],
        ExifValue::Float(f) => vec![*f],
        ExifValue::Text(_) => return None,
        ExifValue::Sequence(items) => items
            .iter()
            .map(|item| match item {
                ExifPrimitive::Int(i) => Some(*i as f64),
                ExifPrimitive::Float(f) => Some(*f),
                ExifPrimitive::Text(_) => None,
            })
            .collect::<Option<_>>()?,
    };
    (!components.is_empty() && components.iter().all(|c| c.is_finite())).then_some(components)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dms(d: f64, m: f64, s: f64) -> ExifValue {
        ExifValue::Sequence(vec![
            ExifPrimitive::Float(d),
            ExifPrimitive::Float(m),
            ExifPrimitive::Float(s),
        ])
    }

    fn text(s: &str) -> ExifValue {
        ExifValue::Text(s.to_string())
    }

    fn amsterdam() -> ExifTags {
        ExifTags::from([
            ("GPSLatitudeRef".to_string(), text("N")),
            ("GPSLatitude".to_string(), dms(52.0, 22.0, 45.08)),
            ("GPSLongitudeRef".to_string(), text("E")),
            ("GPSLongitude".to_string(), dms(4.0, 53.0, 57.95)),
            ("GPSAltitude".to_string(), ExifValue::Float(10.5)),
        ])
    }

    #[test]
    fn test_valid_block_is_returned_unchanged() {
        let gps = amsterdam();
        assert_eq!(validate_gps(gps.clone()), Ok(gps));
    }

    #[test]
    fn test_rejects_zero_placeholder_coordinates() {
        let mut gps = amsterdam();
        gps.insert("GPSLatitude".to_string(), dms(0.0, 0.0, 0.0));
        assert_eq!(
            validate_gps(gps),
            Err(GpsError::ZeroCoordinate("GPSLatitude"))
        );

        let mut gps = amsterdam();
        gps.insert("GPSLongitude".to_string(), dms(0.0, 0.0, 0.0));
        assert_eq!(
            validate_gps(gps),
            Err(GpsError::ZeroCoordinate("GPSLongitude"))
        );
    }

    #[test]
    fn test_a_single_zero_component_is_fine() {
        let mut gps = amsterdam();
        gps.insert("GPSLongitude".to_string(), dms(0.0, 7.0, 0.0));
        assert!(validate_gps(gps).is_ok(), "Only an all-zero triple is a placeholder");
    }

    #[test]
    fn test_rejects_missing_or_empty_references() {
        let mut gps = amsterdam();
        gps.remove("GPSLongitudeRef");
        assert_eq!(
            validate_gps(gps),
            Err(GpsError::MissingField("GPSLongitudeRef"))
        );

        let mut gps = amsterdam();
        gps.insert("GPSLatitudeRef".to_string(), text("  "));
        assert_eq!(
            validate_gps(gps),
            Err(GpsError::EmptyReference("GPSLatitudeRef"))
        );
    }

    #[test]
    fn test_rejects_missing_or_malformed_coordinates() {
        let mut gps = amsterdam();
        gps.remove("GPSLatitude");
        assert_eq!(validate_gps(gps), Err(GpsError::MissingField("GPSLatitude")));

        let mut gps = amsterdam();
        gps.insert("GPSLatitude".to_string(), ExifValue::Sequence(vec![]));
        assert_eq!(
            validate_gps(gps),
            Err(GpsError::MalformedCoordinate("GPSLatitude"))
        );

        let mut gps = amsterdam();
        gps.insert("GPSLongitude".to_string(), text("4 deg 53'"));
        assert_eq!(
            validate_gps(gps),
            Err(GpsError::MalformedCoordinate("GPSLongitude"))
        );
    }

    #[test]
    fn test_empty_block_is_rejected() {
        assert!(validate_gps(ExifTags::new()).is_err());
    }
}
