// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for the Sector Alarm API.
//!
//! # Types
//!
//! - [`AlarmStatus`] - Armed/disarmed/partially armed panel state
//! - [`LockStatus`] - Locked/unlocked state of a door lock
//! - [`Credentials`] - Account user id and password
//! - [`AuthToken`] - Bearer token minted by login
//! - [`CodeFormat`] / [`AccessCode`] - Panel code and its validation pattern

mod alarm;
mod code;
mod credentials;
mod lock;

pub use alarm::AlarmStatus;
pub use code::{AccessCode, CodeFormat};
pub use credentials::{AuthToken, Credentials};
pub use lock::LockStatus;
