// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Events published by a [`SectorHub`](crate::SectorHub).
//!
//! Host entities can either read the hub's snapshot accessors on their own
//! schedule or call [`SectorHub::subscribe`](crate::SectorHub::subscribe)
//! and react to [`HubEvent`]s as poll cycles commit.

mod event_bus;
mod hub_event;

pub(crate) use event_bus::EventBus;
pub use hub_event::HubEvent;
