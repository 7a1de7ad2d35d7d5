// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door lock state.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// State of a smart lock attached to the panel.
///
/// # Examples
///
/// ```
/// use sector_alarm::types::LockStatus;
///
/// assert_eq!("lock".parse::<LockStatus>().unwrap(), LockStatus::Locked);
/// assert_eq!("unlocked".parse::<LockStatus>().unwrap(), LockStatus::Unlocked);
/// assert_eq!("jammed".parse::<LockStatus>().unwrap(), LockStatus::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockStatus {
    /// Bolt engaged.
    Locked,
    /// Bolt retracted.
    Unlocked,
    /// Unrecognized status value.
    #[default]
    Unknown,
}

impl LockStatus {
    /// Returns the label used when publishing this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LockStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "lock" | "locked" => Self::Locked,
            "unlock" | "unlocked" => Self::Unlocked,
            _ => Self::Unknown,
        })
    }
}
