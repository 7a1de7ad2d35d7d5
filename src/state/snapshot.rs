// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Committed panel state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::StateChange;
use crate::types::{AlarmStatus, LockStatus};

/// Sentinel for "no user attributed".
pub const UNKNOWN_USER: &str = "unknown";

/// The latest committed view of the panel.
///
/// Each slice (temperatures, locks, alarm status, changed-by) is replaced
/// wholesale when its resource is fetched successfully and left untouched
/// otherwise.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use sector_alarm::state::Snapshot;
/// use sector_alarm::types::AlarmStatus;
///
/// let mut snapshot = Snapshot::new();
/// assert_eq!(snapshot.alarm_status(), AlarmStatus::Unknown);
/// assert_eq!(snapshot.changed_by(), "unknown");
///
/// snapshot.replace_temperatures(BTreeMap::from([("Kitchen".to_string(), 21.5)]));
/// assert_eq!(snapshot.temperature("Kitchen"), Some(21.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    temperatures: BTreeMap<String, f64>,
    locks: BTreeMap<String, LockStatus>,
    alarm_status: AlarmStatus,
    changed_by: String,
    updated_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            temperatures: BTreeMap::new(),
            locks: BTreeMap::new(),
            alarm_status: AlarmStatus::Unknown,
            changed_by: UNKNOWN_USER.to_string(),
            updated_at: None,
        }
    }

    // ========== Temperatures ==========

    /// Returns all readings keyed by sensor label.
    #[must_use]
    pub fn temperatures(&self) -> &BTreeMap<String, f64> {
        &self.temperatures
    }

    /// Returns the reading of one sensor.
    #[must_use]
    pub fn temperature(&self, label: &str) -> Option<f64> {
        self.temperatures.get(label).copied()
    }

    /// Replaces all readings. Labels absent from `readings` are dropped.
    pub fn replace_temperatures(&mut self, readings: BTreeMap<String, f64>) {
        self.temperatures = readings;
    }

    // ========== Locks ==========

    /// Returns all lock states keyed by serial.
    #[must_use]
    pub fn locks(&self) -> &BTreeMap<String, LockStatus> {
        &self.locks
    }

    /// Returns the state of one lock.
    #[must_use]
    pub fn lock(&self, serial: &str) -> Option<LockStatus> {
        self.locks.get(serial).copied()
    }

    /// Replaces all lock states. Serials absent from `locks` are dropped.
    pub fn replace_locks(&mut self, locks: BTreeMap<String, LockStatus>) {
        self.locks = locks;
    }

    // ========== Alarm ==========

    /// Returns the arm state.
    #[must_use]
    pub fn alarm_status(&self) -> AlarmStatus {
        self.alarm_status
    }

    /// Sets the arm state.
    pub fn set_alarm_status(&mut self, status: AlarmStatus) {
        self.alarm_status = status;
    }

    /// Returns the user behind the most recent arm change, or `"unknown"`.
    #[must_use]
    pub fn changed_by(&self) -> &str {
        &self.changed_by
    }

    /// Sets the user behind the most recent arm change.
    pub fn set_changed_by(&mut self, user: impl Into<String>) {
        self.changed_by = user.into();
    }

    // ========== Bookkeeping ==========

    /// Returns when a poll cycle last committed to this snapshot.
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Records the commit time.
    pub fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    /// Lists what differs between `previous` and `self`.
    ///
    /// Changes are ordered temperatures, locks, alarm status, changed-by;
    /// within a map, by key. The commit timestamp is ignored.
    #[must_use]
    pub fn changes_since(&self, previous: &Snapshot) -> Vec<StateChange> {
        let mut changes = Vec::new();

        for (label, &celsius) in &self.temperatures {
            if previous.temperature(label) != Some(celsius) {
                changes.push(StateChange::Temperature {
                    label: label.clone(),
                    celsius,
                });
            }
        }
        for label in previous.temperatures.keys() {
            if !self.temperatures.contains_key(label) {
                changes.push(StateChange::TemperatureRemoved {
                    label: label.clone(),
                });
            }
        }

        for (serial, &status) in &self.locks {
            if previous.lock(serial) != Some(status) {
                changes.push(StateChange::Lock {
                    serial: serial.clone(),
                    status,
                });
            }
        }
        for serial in previous.locks.keys() {
            if !self.locks.contains_key(serial) {
                changes.push(StateChange::LockRemoved {
                    serial: serial.clone(),
                });
            }
        }

        if self.alarm_status != previous.alarm_status {
            changes.push(StateChange::AlarmStatus {
                status: self.alarm_status,
            });
        }
        if self.changed_by != previous.changed_by {
            changes.push(StateChange::ChangedBy {
                user: self.changed_by.clone(),
            });
        }

        changes
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}
