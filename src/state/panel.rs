// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel identity and inventory.

use serde::Serialize;

/// Identity of the panel and the devices attached to it.
///
/// Learned from the full system payload at connect time and never changed
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelInfo {
    id: String,
    display_name: String,
    temperature_labels: Vec<String>,
    lock_serials: Vec<String>,
}

impl PanelInfo {
    /// Creates panel info.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        temperature_labels: Vec<String>,
        lock_serials: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            temperature_labels,
            lock_serials,
        }
    }

    /// Vendor-assigned panel id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Panel name shown in the vendor app.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Labels of the temperature sensors.
    #[must_use]
    pub fn temperature_labels(&self) -> &[String] {
        &self.temperature_labels
    }

    /// Serials of the locks.
    #[must_use]
    pub fn lock_serials(&self) -> &[String] {
        &self.lock_serials
    }
}
