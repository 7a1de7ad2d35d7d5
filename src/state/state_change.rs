// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! A poll cycle commits a new [`Snapshot`](super::Snapshot); the differences
//! from the previous one are published as [`StateChange`] values so host
//! entities can update without diffing themselves.

use serde::Serialize;

use crate::types::{AlarmStatus, LockStatus};

/// A single difference between two committed snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StateChange {
    /// A sensor reported a new (or first) reading.
    Temperature {
        /// Sensor label.
        label: String,
        /// Reading in degrees Celsius.
        celsius: f64,
    },

    /// A sensor no longer appears in the temperature response.
    TemperatureRemoved {
        /// Sensor label.
        label: String,
    },

    /// A lock reported a new (or first) state.
    Lock {
        /// Lock serial.
        serial: String,
        /// New state.
        status: LockStatus,
    },

    /// A lock no longer appears in the lock response.
    LockRemoved {
        /// Lock serial.
        serial: String,
    },

    /// The panel arm state changed.
    AlarmStatus {
        /// New arm state.
        status: AlarmStatus,
    },

    /// A different user is now attributed with the last arm change.
    ChangedBy {
        /// User name, or `"unknown"`.
        user: String,
    },
}

impl StateChange {
    /// Returns `true` if this is a temperature change or removal.
    #[must_use]
    pub fn is_temperature(&self) -> bool {
        matches!(
            self,
            Self::Temperature { .. } | Self::TemperatureRemoved { .. }
        )
    }

    /// Returns `true` if this is a lock change or removal.
    #[must_use]
    pub fn is_lock(&self) -> bool {
        matches!(self, Self::Lock { .. } | Self::LockRemoved { .. })
    }

    /// Returns `true` if this concerns the alarm panel itself.
    #[must_use]
    pub fn is_alarm(&self) -> bool {
        matches!(self, Self::AlarmStatus { .. } | Self::ChangedBy { .. })
    }
}
