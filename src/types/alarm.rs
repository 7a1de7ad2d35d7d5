// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Alarm arm/disarm state.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Arm state of the alarm panel.
///
/// The vendor reports the state either as a numeric code or as a text label.
/// Values that match neither map to [`AlarmStatus::Unknown`] rather than
/// failing, so an unexpected firmware value never blanks the rest of a poll.
///
/// # Examples
///
/// ```
/// use sector_alarm::types::AlarmStatus;
///
/// assert_eq!(AlarmStatus::from_code(3), AlarmStatus::Armed);
/// assert_eq!("disarmed".parse::<AlarmStatus>().unwrap(), AlarmStatus::Disarmed);
/// assert_eq!(AlarmStatus::from_code(42), AlarmStatus::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmStatus {
    /// Fully armed.
    Armed,
    /// Disarmed.
    Disarmed,
    /// Armed in home/partial mode.
    PartiallyArmed,
    /// Not yet fetched, or reported with an unrecognized value.
    #[default]
    Unknown,
}

impl AlarmStatus {
    /// Maps the vendor's numeric panel status code.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Disarmed,
            2 => Self::PartiallyArmed,
            3 => Self::Armed,
            _ => Self::Unknown,
        }
    }

    /// Returns the label used when publishing this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Armed => "armed",
            Self::Disarmed => "disarmed",
            Self::PartiallyArmed => "partially_armed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlarmStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let status = match normalized.as_str() {
            "armed" | "totalarmed" | "fullarmed" => Self::Armed,
            "disarmed" => Self::Disarmed,
            "partiallyarmed" | "partialarmed" | "annexarmed" | "homearmed" => Self::PartiallyArmed,
            other => other.parse::<i64>().map_or(Self::Unknown, Self::from_code),
        };
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_codes() {
        assert_eq!(AlarmStatus::from_code(1), AlarmStatus::Disarmed);
        assert_eq!(AlarmStatus::from_code(2), AlarmStatus::PartiallyArmed);
        assert_eq!(AlarmStatus::from_code(3), AlarmStatus::Armed);
        assert_eq!(AlarmStatus::from_code(0), AlarmStatus::Unknown);
    }

    #[test]
    fn text_labels_are_normalized() {
        let parse = |s: &str| s.parse::<AlarmStatus>().unwrap();
        assert_eq!(parse("Armed"), AlarmStatus::Armed);
        assert_eq!(parse("partially-armed"), AlarmStatus::PartiallyArmed);
        assert_eq!(parse("partialarmed"), AlarmStatus::PartiallyArmed);
        assert_eq!(parse(" DISARMED "), AlarmStatus::Disarmed);
        assert_eq!(parse("3"), AlarmStatus::Armed);
        assert_eq!(parse("maintenance"), AlarmStatus::Unknown);
    }

    #[test]
    fn default_is_unknown() {
        assert_eq!(AlarmStatus::default(), AlarmStatus::Unknown);
        assert_eq!(AlarmStatus::default().to_string(), "unknown");
    }
}
