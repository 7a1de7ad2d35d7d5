// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed records for Sector Alarm API responses.
//!
//! Each endpoint's JSON body is decoded into a dedicated record and
//! validated here, so the rest of the crate never sees raw vendor JSON.
//! Field names follow the vendor's spelling on the wire, including the
//! misspelled `Temprature`.

mod full_system;
mod lock;
mod log;
mod login;
mod panel_status;
mod scalar;
mod temperature;

pub use full_system::{FullSystemResponse, LockDevice, PanelSummary, TemperatureSensor};
pub use lock::{LockReading, lock_map};
pub use log::{LogEntry, last_changed_by};
pub use login::LoginResponse;
pub use panel_status::PanelStatusResponse;
pub use scalar::Scalar;
pub use temperature::{TemperatureReading, temperature_map};
