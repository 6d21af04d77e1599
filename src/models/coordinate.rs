//! Coordinate model and resolution of raw form input

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{NightSkyError, Result};

/// Latitude/longitude pair in signed decimal degrees.
///
/// Persisted as `{ "lat": .., "lon": .. }`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// One of the two user-supplied coordinate inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateField {
    Latitude,
    Longitude,
}

impl CoordinateField {
    /// Alert line shown when this field failed validation
    #[must_use]
    pub fn invalid_message(&self) -> String {
        format!("Your entered {self} is not a proper number or decimal.")
    }
}

impl fmt::Display for CoordinateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateField::Latitude => write!(f, "Latitude"),
            CoordinateField::Longitude => write!(f, "Longitude"),
        }
    }
}

/// Parse raw input: trimmed, non-empty, and a finite number.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[must_use]
pub fn is_number(raw: &str) -> bool {
    parse_number(raw).is_some()
}

/// Resolve raw latitude/longitude input to a coordinate.
///
/// Both parseable wins regardless of what is saved. Exactly one parseable is a
/// validation error naming the bad field. Neither parseable falls back to the
/// persisted coordinate, or fails with a missing-preference error listing both
/// fields when nothing is saved.
pub fn resolve_coordinates(
    raw_lat: &str,
    raw_lon: &str,
    persisted: Option<&Coordinate>,
) -> Result<Coordinate> {
    match (parse_number(raw_lat), parse_number(raw_lon)) {
        (Some(latitude), Some(longitude)) => Ok(Coordinate::new(latitude, longitude)),
        (None, Some(_)) => Err(NightSkyError::validation(vec![CoordinateField::Latitude])),
        (Some(_), None) => Err(NightSkyError::validation(vec![CoordinateField::Longitude])),
        (None, None) => persisted.copied().ok_or_else(|| {
            NightSkyError::missing_preference(vec![
                CoordinateField::Latitude,
                CoordinateField::Longitude,
            ])
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("40.7"), Some(40.7));
        assert_eq!(parse_number("  -74.0 "), Some(-74.0));
        assert_eq!(parse_number("1e1"), Some(10.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert!(!is_number("12,5"));
    }

    #[test]
    fn test_both_valid_ignores_persisted() {
        let saved = Coordinate::new(10.0, 20.0);
        let resolved = resolve_coordinates("40.7", "-74.0", Some(&saved)).unwrap();
        assert_eq!(resolved, Coordinate::new(40.7, -74.0));

        let resolved = resolve_coordinates("40.7", "-74.0", None).unwrap();
        assert_eq!(resolved, Coordinate::new(40.7, -74.0));
    }

    #[test]
    fn test_one_invalid_does_not_fall_back() {
        let saved = Coordinate::new(10.0, 20.0);
        let err = resolve_coordinates("abc", "-74.0", Some(&saved)).unwrap_err();
        match err {
            NightSkyError::Validation { fields } => {
                assert_eq!(fields, vec![CoordinateField::Latitude]);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = resolve_coordinates("40.7", "", Some(&saved)).unwrap_err();
        assert!(matches!(
            err,
            NightSkyError::Validation { ref fields } if fields == &vec![CoordinateField::Longitude]
        ));
    }

    #[test]
    fn test_blank_inputs_use_persisted() {
        let saved = Coordinate::new(10.0, 20.0);
        let resolved = resolve_coordinates("", "", Some(&saved)).unwrap();
        assert_eq!(resolved, Coordinate::new(10.0, 20.0));

        let resolved = resolve_coordinates("abc", "xyz", Some(&saved)).unwrap();
        assert_eq!(resolved, saved);
    }

    #[test]
    fn test_blank_inputs_without_persisted() {
        let err = resolve_coordinates("", "nope", None).unwrap_err();
        match err {
            NightSkyError::MissingPreference { fields } => {
                assert_eq!(
                    fields,
                    vec![CoordinateField::Latitude, CoordinateField::Longitude]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_coordinate_serializes_as_lat_lon() {
        let json = serde_json::to_value(Coordinate::new(40.7, -74.0)).unwrap();
        assert_eq!(json, serde_json::json!({ "lat": 40.7, "lon": -74.0 }));
    }
}
