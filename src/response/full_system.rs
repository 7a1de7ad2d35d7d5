// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Full system response parsing.

use serde::Deserialize;

use super::scalar::Scalar;
use crate::error::SchemaError;
use crate::state::PanelInfo;

/// Response from `GET /api/panel/getFullSystem`.
///
/// The payload is large; only the panel identity and the sensor and lock
/// inventories are decoded.
///
/// # Examples
///
/// ```
/// use sector_alarm::response::FullSystemResponse;
///
/// let json = r#"{
///     "Panel": {"PanelId": "0123", "PanelDisplayName": "Home"},
///     "Temperatures": [{"Label": "Kitchen"}],
///     "Locks": [{"Serial": "L1", "Label": "Front door"}]
/// }"#;
/// let response: FullSystemResponse = serde_json::from_str(json).unwrap();
/// let panel = response.into_panel_info().unwrap();
/// assert_eq!(panel.id(), "0123");
/// assert_eq!(panel.temperature_labels(), ["Kitchen"]);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FullSystemResponse {
    /// Panel identity.
    #[serde(default)]
    pub panel: Option<PanelSummary>,
    /// Temperature sensors known to the panel.
    #[serde(default)]
    pub temperatures: Option<Vec<TemperatureSensor>>,
    /// Smart locks known to the panel.
    #[serde(default)]
    pub locks: Option<Vec<LockDevice>>,
}

/// The `Panel` object of the full system payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PanelSummary {
    /// Vendor-assigned panel id.
    pub panel_id: Scalar,
    /// Name shown in the vendor app.
    #[serde(default)]
    pub panel_display_name: Option<String>,
}

/// A temperature sensor entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemperatureSensor {
    /// Sensor label, unique per panel.
    pub label: String,
}

/// A lock entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LockDevice {
    /// Lock serial, unique per panel.
    pub serial: Scalar,
}

impl FullSystemResponse {
    /// Validates the payload and extracts the panel identity and inventory.
    ///
    /// Missing sensor or lock lists are treated as empty.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::MissingField` if `Panel` or `Panel.PanelId` is
    /// absent or empty.
    pub fn into_panel_info(self) -> Result<PanelInfo, SchemaError> {
        let panel = self
            .panel
            .ok_or_else(|| SchemaError::MissingField("Panel".to_string()))?;

        let id = panel.panel_id.to_string();
        if id.trim().is_empty() {
            return Err(SchemaError::MissingField("Panel.PanelId".to_string()));
        }

        let temperature_labels = self.temperatures.map_or_else(
            || {
                tracing::debug!(panel_id = %id, "Full system payload lists no temperature sensors");
                Vec::new()
            },
            |sensors| sensors.into_iter().map(|s| s.label).collect(),
        );

        let lock_serials = self.locks.map_or_else(
            || {
                tracing::debug!(panel_id = %id, "Full system payload lists no locks");
                Vec::new()
            },
            |locks| locks.into_iter().map(|l| l.serial.to_string()).collect(),
        );

        Ok(PanelInfo::new(
            id,
            panel.panel_display_name.unwrap_or_default(),
            temperature_labels,
            lock_serials,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> FullSystemResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn extracts_inventory() {
        let panel = parse(
            r#"{
                "Panel": {"PanelId": 98765, "PanelDisplayName": "Cabin"},
                "Temperatures": [{"Label": "Hall"}, {"Label": "Attic"}],
                "Locks": [{"Serial": 3001}, {"Serial": "3002"}]
            }"#,
        )
        .into_panel_info()
        .unwrap();

        assert_eq!(panel.id(), "98765");
        assert_eq!(panel.display_name(), "Cabin");
        assert_eq!(panel.temperature_labels(), ["Hall", "Attic"]);
        assert_eq!(panel.lock_serials(), ["3001", "3002"]);
    }

    #[test]
    fn null_lists_are_empty() {
        let panel = parse(r#"{"Panel": {"PanelId": "1"}, "Temperatures": null, "Locks": null}"#)
            .into_panel_info()
            .unwrap();
        assert!(panel.temperature_labels().is_empty());
        assert!(panel.lock_serials().is_empty());
        assert_eq!(panel.display_name(), "");
    }

    #[test]
    fn missing_panel_is_schema_error() {
        let err = parse(r#"{"Temperatures": []}"#).into_panel_info().unwrap_err();
        assert!(matches!(err, SchemaError::MissingField(f) if f == "Panel"));
    }

    #[test]
    fn empty_panel_id_is_schema_error() {
        let err = parse(r#"{"Panel": {"PanelId": ""}}"#)
            .into_panel_info()
            .unwrap_err();
        assert!(matches!(err, SchemaError::MissingField(f) if f == "Panel.PanelId"));
    }
}
