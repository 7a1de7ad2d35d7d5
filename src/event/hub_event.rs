// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hub event types.

use std::sync::Arc;

use crate::protocol::Resource;
use crate::state::{Snapshot, StateChange};

/// Events emitted by a [`SectorHub`](crate::SectorHub).
///
/// # Examples
///
/// ```
/// use sector_alarm::event::HubEvent;
/// use sector_alarm::protocol::Resource;
///
/// let event = HubEvent::Refreshed { failed: vec![Resource::Logs] };
/// assert!(!event.is_state_change());
/// ```
#[derive(Debug, Clone)]
pub enum HubEvent {
    /// The first fully successful poll cycle completed.
    Ready,

    /// A committed value differs from the previous snapshot.
    StateChanged {
        /// The specific change.
        change: StateChange,
        /// The snapshot the change was committed in.
        snapshot: Arc<Snapshot>,
    },

    /// A poll cycle finished fetching.
    Refreshed {
        /// Resources not refreshed this cycle, failed or skipped; empty on
        /// full success.
        failed: Vec<Resource>,
    },

    /// A poll cycle was aborted before any data was fetched.
    RefreshFailed {
        /// Description of the failure.
        error: String,
    },
}

impl HubEvent {
    /// Returns `true` for [`HubEvent::StateChanged`].
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Returns `true` if this event reports a failed or partial cycle.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        match self {
            Self::RefreshFailed { .. } => true,
            Self::Refreshed { failed } => !failed.is_empty(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_classification() {
        assert!(
            HubEvent::RefreshFailed {
                error: "login rejected".to_string()
            }
            .is_failure()
        );
        assert!(
            HubEvent::Refreshed {
                failed: vec![Resource::Locks]
            }
            .is_failure()
        );
        assert!(!HubEvent::Refreshed { failed: vec![] }.is_failure());
        assert!(!HubEvent::Ready.is_failure());
    }
}
