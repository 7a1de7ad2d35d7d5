// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel status response parsing.

use serde::Deserialize;

use super::scalar::Scalar;
use crate::types::AlarmStatus;

/// Response from `GET /api/Panel/GetPanelStatus`.
///
/// # Examples
///
/// ```
/// use sector_alarm::response::PanelStatusResponse;
/// use sector_alarm::types::AlarmStatus;
///
/// let response: PanelStatusResponse =
///     serde_json::from_str(r#"{"Status": 3, "IsOnline": true}"#).unwrap();
/// assert_eq!(response.alarm_status(), AlarmStatus::Armed);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PanelStatusResponse {
    /// Raw status: a numeric code or a text label.
    pub status: Scalar,
    /// Whether the panel is reachable by the vendor backend.
    #[serde(default)]
    pub is_online: Option<bool>,
}

impl PanelStatusResponse {
    /// Returns the interpreted arm state.
    #[must_use]
    pub fn alarm_status(&self) -> AlarmStatus {
        match &self.status {
            Scalar::Int(code) => AlarmStatus::from_code(*code),
            Scalar::Float(_) => AlarmStatus::Unknown,
            Scalar::Text(label) => label.parse().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(json: &str) -> AlarmStatus {
        serde_json::from_str::<PanelStatusResponse>(json)
            .unwrap()
            .alarm_status()
    }

    #[test]
    fn numeric_and_text_status() {
        assert_eq!(status(r#"{"Status": 1}"#), AlarmStatus::Disarmed);
        assert_eq!(status(r#"{"Status": 2}"#), AlarmStatus::PartiallyArmed);
        assert_eq!(status(r#"{"Status": "armed"}"#), AlarmStatus::Armed);
        assert_eq!(status(r#"{"Status": "3"}"#), AlarmStatus::Armed);
        assert_eq!(status(r#"{"Status": 9}"#), AlarmStatus::Unknown);
    }

    #[test]
    fn missing_status_is_a_decode_error() {
        let result: Result<PanelStatusResponse, _> = serde_json::from_str(r#"{"IsOnline": true}"#);
        assert!(result.is_err());
    }
}
