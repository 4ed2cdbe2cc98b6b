//! Parser for the NOAA SWPC `ovation_aurora_latest.json` document.
//!
//! Expected shape:
//!
//! ```text
//! {
//!   "Observation Time": "2024-08-18T18:02:00Z",
//!   "Forecast Time": "2024-08-18T19:07:00Z",
//!   "Data Format": "[Longitude, Latitude, Aurora]",
//!   "coordinates": [[0, -90, 7], [0, -89, 0], ...]
//! }
//! ```

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::{
    error::{FeedError, SchemaViolation},
    model::{ForecastData, Location},
};

const OBSERVATION_TIME: &str = "Observation Time";
const FORECAST_TIME: &str = "Forecast Time";
const COORDINATES: &str = "coordinates";

/// Parse raw feed text into a forecast snapshot.
///
/// Elements of `coordinates` that are not arrays are skipped. When a
/// coordinate pair appears more than once, the later entry wins.
pub fn parse(json_text: &str) -> Result<ForecastData, FeedError> {
    let value: Value = serde_json::from_str(json_text)?;
    let Value::Object(doc) = value else {
        return Err(SchemaViolation::Document.into());
    };

    let observation_time =
        timestamp(&doc, OBSERVATION_TIME).ok_or(SchemaViolation::ObservationTime)?;
    let forecast_time = timestamp(&doc, FORECAST_TIME).ok_or(SchemaViolation::ForecastTime)?;

    let coordinates = doc
        .get(COORDINATES)
        .and_then(Value::as_array)
        .ok_or(SchemaViolation::CoordinateArray)?;

    let mut location_data = HashMap::with_capacity(coordinates.len());
    for (index, entry) in coordinates.iter().enumerate() {
        let Some(fields) = entry.as_array() else {
            continue;
        };

        let (location, intensity) =
            coordinate(fields).ok_or(SchemaViolation::CoordinateEntry { index })?;
        location_data.insert(location, intensity);
    }

    tracing::debug!(
        %observation_time,
        %forecast_time,
        locations = location_data.len(),
        "parsed aurora feed"
    );

    Ok(ForecastData::new(observation_time, forecast_time, location_data))
}

impl ForecastData {
    /// See [`parse`].
    pub fn parse(json_text: &str) -> Result<Self, FeedError> {
        parse(json_text)
    }
}

/// Strict RFC 3339; the offset is kept as the same instant in UTC.
fn timestamp(doc: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    let raw = doc.get(key)?.as_str()?;
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc))
}

/// `[longitude, latitude, intensity]`, all integers.
fn coordinate(fields: &[Value]) -> Option<(Location, i32)> {
    let [lon, lat, intensity] = fields else {
        return None;
    };

    Some((Location::new(int(lon)?, int(lat)?), int(intensity)?))
}

fn int(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|n| i32::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    const SAMPLE: &str = r#"{
        "Observation Time": "2024-08-18T18:02:00Z",
        "Forecast Time": "2024-08-18T19:07:00Z",
        "Data Format": "[Longitude, Latitude, Aurora]",
        "coordinates": [
            [0, -90, 7],
            [0, -89, 0],
            [0, -88, 9],
            [0, -87, 11],
            [0, -86, 12],
            [0, -85, 12],
            [0, -84, 12]
        ]
    }"#;

    fn schema_violation(text: &str) -> SchemaViolation {
        match parse(text) {
            Err(FeedError::Schema(violation)) => violation,
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    fn with_coordinates(coordinates: &str) -> String {
        format!(
            r#"{{"Observation Time":"2024-08-18T18:02:00Z","Forecast Time":"2024-08-18T19:07:00Z","coordinates":{coordinates}}}"#
        )
    }

    #[test]
    fn parses_sample_feed() {
        let data = parse(SAMPLE).expect("sample feed should parse");

        assert_eq!(data.observation_time().year(), 2024);
        assert_eq!(data.forecast_time().year(), 2024);
        assert_eq!(data.observation_time(), Utc.with_ymd_and_hms(2024, 8, 18, 18, 2, 0).unwrap());
        assert_eq!(data.forecast_time(), Utc.with_ymd_and_hms(2024, 8, 18, 19, 7, 0).unwrap());
        assert_eq!(data.len(), 7);
        assert_eq!(data.lookup(Location::new(0, -88)), Some(9));
    }

    #[test]
    fn missing_location_is_not_an_error() {
        let data = parse(SAMPLE).unwrap();
        assert_eq!(data.lookup(Location::new(45, 45)), None);
        assert_eq!(data.lookup(Location::new(-88, 0)), None);
    }

    #[test]
    fn parsing_twice_gives_equal_snapshots() {
        let first = parse(SAMPLE).unwrap();
        let second = ForecastData::parse(SAMPLE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unterminated_array_is_syntax_error() {
        let err = parse("[").unwrap_err();
        assert!(matches!(err, FeedError::Syntax(_)), "got {err:?}");
    }

    #[test]
    fn empty_input_is_syntax_error() {
        assert!(matches!(parse(""), Err(FeedError::Syntax(_))));
        assert!(matches!(parse("{\"coordinates\": [}"), Err(FeedError::Syntax(_))));
    }

    #[test]
    fn non_object_documents_are_rejected() {
        assert_eq!(schema_violation("[]"), SchemaViolation::Document);
        assert_eq!(schema_violation("42"), SchemaViolation::Document);
        assert_eq!(schema_violation("\"text\""), SchemaViolation::Document);
        assert_eq!(schema_violation("null"), SchemaViolation::Document);
    }

    #[test]
    fn invalid_observation_time() {
        let text = r#"{
            "Observation Time": "Invalid-Value",
            "Forecast Time": "2024-08-18T19:07:00Z",
            "coordinates": []
        }"#;

        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("observation time"));
        assert_eq!(schema_violation(text), SchemaViolation::ObservationTime);
    }

    #[test]
    fn invalid_forecast_time() {
        let text = r#"{
            "Observation Time": "2024-08-18T18:02:00Z",
            "Forecast Time": "Invalid-Value",
            "coordinates": []
        }"#;

        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("forecast time"));
        assert_eq!(schema_violation(text), SchemaViolation::ForecastTime);
    }

    #[test]
    fn missing_or_non_string_times_are_rejected() {
        assert_eq!(
            schema_violation(r#"{"Forecast Time":"2024-08-18T19:07:00Z","coordinates":[]}"#),
            SchemaViolation::ObservationTime
        );
        assert_eq!(
            schema_violation(
                r#"{"Observation Time":"2024-08-18T18:02:00Z","Forecast Time":1723999620,"coordinates":[]}"#
            ),
            SchemaViolation::ForecastTime
        );
    }

    #[test]
    fn zoneless_timestamp_is_rejected() {
        let text = r#"{
            "Observation Time": "2024-08-18T18:02:00",
            "Forecast Time": "2024-08-18T19:07:00Z",
            "coordinates": []
        }"#;
        assert_eq!(schema_violation(text), SchemaViolation::ObservationTime);
    }

    #[test]
    fn offset_timestamp_keeps_the_same_instant() {
        let text = r#"{
            "Observation Time": "2024-08-18T20:02:00+02:00",
            "Forecast Time": "2024-08-18T19:07:00.500Z",
            "coordinates": []
        }"#;

        let data = parse(text).unwrap();
        assert_eq!(data.observation_time(), Utc.with_ymd_and_hms(2024, 8, 18, 18, 2, 0).unwrap());
        assert_eq!(data.forecast_time().timestamp_subsec_millis(), 500);
        assert!(data.is_empty());
    }

    #[test]
    fn missing_coordinates_is_rejected() {
        let text = r#"{"Observation Time":"2024-08-18T18:02:00Z","Forecast Time":"2024-08-18T19:07:00Z"}"#;
        assert_eq!(schema_violation(text), SchemaViolation::CoordinateArray);
    }

    #[test]
    fn non_array_coordinates_is_rejected() {
        assert_eq!(
            schema_violation(&with_coordinates(r#"{"0": [0, -90, 7]}"#)),
            SchemaViolation::CoordinateArray
        );
    }

    #[test]
    fn short_coordinate_entry_is_rejected() {
        assert_eq!(
            schema_violation(&with_coordinates("[[0, -90]]")),
            SchemaViolation::CoordinateEntry { index: 0 }
        );
    }

    #[test]
    fn long_coordinate_entry_is_rejected() {
        assert_eq!(
            schema_violation(&with_coordinates("[[0, -90, 7], [0, -89, 1, 2]]")),
            SchemaViolation::CoordinateEntry { index: 1 }
        );
    }

    #[test]
    fn non_integer_coordinate_values_are_rejected() {
        for bad in ["[[0, -90, \"7\"]]", "[[0.5, -90, 7]]", "[[0, null, 7]]", "[[0, -90, 4294967296]]"] {
            assert_eq!(
                schema_violation(&with_coordinates(bad)),
                SchemaViolation::CoordinateEntry { index: 0 },
                "input: {bad}"
            );
        }
    }

    #[test]
    fn non_array_coordinate_elements_are_skipped() {
        let data =
            parse(&with_coordinates(r#"[[0, -90, 7], 5, "x", {"a": 1}, null, [1, -90, 3]]"#))
                .unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data.lookup(Location::new(0, -90)), Some(7));
        assert_eq!(data.lookup(Location::new(1, -90)), Some(3));
    }

    #[test]
    fn duplicate_coordinates_keep_the_last_entry() {
        let data = parse(&with_coordinates("[[10, 20, 5], [11, 20, 1], [10, 20, 42]]")).unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data.lookup(Location::new(10, 20)), Some(42));
    }

    #[test]
    fn intensity_is_not_clamped() {
        let data = parse(&with_coordinates("[[0, 0, 150], [0, 1, -3]]")).unwrap();
        assert_eq!(data.lookup(Location::new(0, 0)), Some(150));
        assert_eq!(data.lookup(Location::new(0, 1)), Some(-3));
    }
}
