// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lock status response parsing.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::scalar::Scalar;
use crate::types::LockStatus;

/// One entry of `GET /api/Panel/GetLockStatus`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LockReading {
    /// Lock serial.
    pub serial: Scalar,
    /// Raw status label, e.g. `lock` or `unlock`.
    pub status: String,
}

impl LockReading {
    /// Returns the parsed lock status.
    #[must_use]
    pub fn lock_status(&self) -> LockStatus {
        self.status.parse().unwrap_or_default()
    }
}

/// Builds the serial → status map from a lock response.
///
/// # Examples
///
/// ```
/// use sector_alarm::response::{LockReading, lock_map};
/// use sector_alarm::types::LockStatus;
///
/// let readings: Vec<LockReading> =
///     serde_json::from_str(r#"[{"Serial": "123", "Status": "locked"}]"#).unwrap();
/// assert_eq!(lock_map(&readings)["123"], LockStatus::Locked);
/// ```
#[must_use]
pub fn lock_map(readings: &[LockReading]) -> BTreeMap<String, LockStatus> {
    readings
        .iter()
        .map(|r| (r.serial.to_string(), r.lock_status()))
        .collect()
}
