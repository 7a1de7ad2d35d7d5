// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature response parsing.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::scalar::Scalar;
use crate::error::SchemaError;

/// One entry of `GET /api/Panel/GetTemperatures`.
///
/// The vendor spells the reading field `Temprature`.
#[derive(Debug, Clone, Deserialize)]
pub struct TemperatureReading {
    /// Sensor label.
    #[serde(rename = "Label")]
    pub label: String,
    /// Raw reading, a number or a numeric string.
    #[serde(rename = "Temprature", default)]
    pub temperature: Option<Scalar>,
}

impl TemperatureReading {
    /// Returns the reading in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the reading is missing or not numeric.
    pub fn celsius(&self) -> Result<f64, SchemaError> {
        self.temperature
            .as_ref()
            .ok_or_else(|| SchemaError::MissingField(format!("Temprature ({})", self.label)))?
            .to_f64("Temprature")
    }
}

/// Builds the label → reading map from a temperature response.
///
/// The map is rebuilt from scratch; a single malformed entry fails the whole
/// response so a partial map never replaces a complete one.
///
/// # Errors
///
/// Returns `SchemaError` if any entry lacks a numeric reading.
///
/// # Examples
///
/// ```
/// use sector_alarm::response::{TemperatureReading, temperature_map};
///
/// let readings: Vec<TemperatureReading> =
///     serde_json::from_str(r#"[{"Label": "Kitchen", "Temprature": 21.5}]"#).unwrap();
/// let map = temperature_map(&readings).unwrap();
/// assert_eq!(map["Kitchen"], 21.5);
/// ```
pub fn temperature_map(
    readings: &[TemperatureReading],
) -> Result<BTreeMap<String, f64>, SchemaError> {
    readings
        .iter()
        .map(|r| Ok((r.label.clone(), r.celsius()?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<TemperatureReading> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn numeric_and_string_readings() {
        let map = temperature_map(&parse(
            r#"[{"Label": "Kitchen", "Temprature": 21.5}, {"Label": "Garage", "Temprature": "7"}]"#,
        ))
        .unwrap();
        assert_eq!(map.len(), 2);
        assert!((map["Kitchen"] - 21.5).abs() < f64::EPSILON);
        assert!((map["Garage"] - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_reading_fails_whole_response() {
        let err = temperature_map(&parse(
            r#"[{"Label": "Kitchen", "Temprature": 21.5}, {"Label": "Hall"}]"#,
        ))
        .unwrap_err();
        assert!(matches!(err, SchemaError::MissingField(f) if f.contains("Hall")));
    }

    #[test]
    fn correctly_spelled_field_is_not_accepted() {
        let err = temperature_map(&parse(r#"[{"Label": "Kitchen", "Temperature": 21.5}]"#));
        assert!(err.is_err());
    }

    #[test]
    fn missing_label_is_a_decode_error() {
        let result: Result<Vec<TemperatureReading>, _> =
            serde_json::from_str(r#"[{"Temprature": 21.5}]"#);
        assert!(result.is_err());
    }
}
