// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel state types.
//!
//! [`Snapshot`] is the last committed view of temperatures, locks, alarm
//! status and the user behind the last arm change. [`PanelInfo`] is the
//! fixed panel identity learned at connect time. [`StateChange`] describes
//! what differs between two snapshots.
//!
//! # Examples
//!
//! ```
//! use sector_alarm::state::{Snapshot, StateChange};
//! use sector_alarm::types::AlarmStatus;
//!
//! let before = Snapshot::new();
//! let mut after = before.clone();
//! after.set_alarm_status(AlarmStatus::Armed);
//!
//! assert_eq!(
//!     after.changes_since(&before),
//!     vec![StateChange::AlarmStatus { status: AlarmStatus::Armed }]
//! );
//! ```

mod panel;
mod snapshot;
mod state_change;

pub use panel::PanelInfo;
pub use snapshot::{Snapshot, UNKNOWN_USER};
pub use state_change::StateChange;
