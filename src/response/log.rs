// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event log response parsing.

use serde::Deserialize;

use crate::state::UNKNOWN_USER;

/// One entry of `GET /api/panel/GetLogs`, most recent first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogEntry {
    /// User the event is attributed to; empty for system events.
    #[serde(default)]
    pub user: Option<String>,
    /// Event type, e.g. `arm`, `disarm`, `partialarm`.
    pub event_type: String,
    /// Vendor timestamp, passed through untouched.
    #[serde(default)]
    pub time: Option<String>,
}

impl LogEntry {
    /// Returns `true` if this entry records an arm state change by a user.
    #[must_use]
    pub fn is_user_arm_change(&self) -> bool {
        self.user.as_deref().is_some_and(|u| !u.is_empty()) && self.event_type.contains("arm")
    }
}

/// Finds the user behind the most recent arm/disarm event.
///
/// Entries are scanned in the order given. Returns `"unknown"` if no entry
/// has both a non-empty user and an event type containing `arm`.
///
/// # Examples
///
/// ```
/// use sector_alarm::response::{LogEntry, last_changed_by};
///
/// let log: Vec<LogEntry> = serde_json::from_str(
///     r#"[{"User": "", "EventType": "arm"}, {"User": "alice", "EventType": "disarm"}]"#,
/// ).unwrap();
/// assert_eq!(last_changed_by(&log), "alice");
/// ```
#[must_use]
pub fn last_changed_by(entries: &[LogEntry]) -> String {
    entries
        .iter()
        .find(|e| e.is_user_arm_change())
        .and_then(|e| e.user.clone())
        .unwrap_or_else(|| UNKNOWN_USER.to_string())
}
