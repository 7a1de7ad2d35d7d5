// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `sector_alarm` - A Rust client for Sector Alarm panels.
//!
//! This library polls the Sector Alarm cloud API on behalf of a home
//! automation host and keeps an in-memory snapshot of the panel state.
//!
//! # Supported Features
//!
//! - **Alarm state**: armed, partially armed or disarmed
//! - **Last user**: who armed or disarmed the panel last
//! - **Temperatures**: every sensor reported by the panel, in Celsius
//! - **Locks**: locked or unlocked per lock serial
//! - **Health**: readiness, last successful refresh, per-resource failures
//!
//! Everything is read-only. Arming, disarming and lock commands are out of
//! scope.
//!
//! # Quick Start
//!
//! ```no_run
//! use sector_alarm::SectorHub;
//!
//! #[tokio::main]
//! async fn main() -> sector_alarm::Result<()> {
//!     // Logs in, discovers the panel and performs the first refresh
//!     let hub = SectorHub::builder("user@example.com", "secret")
//!         .with_code("1234")
//!         .connect()
//!         .await?;
//!
//!     println!("{} is {}", hub.panel_display_name(), hub.alarm_status());
//!     println!("last changed by {}", hub.changed_by());
//!
//!     // Calls inside the throttle window return the previous report
//!     let report = hub.refresh().await;
//!     if !report.is_success() {
//!         eprintln!("refresh failed for {:?}", report.outcome().failed_resources());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Change Events
//!
//! ```no_run
//! use sector_alarm::{HubEvent, SectorHub};
//!
//! # async fn example(hub: SectorHub) {
//! let mut events = hub.subscribe();
//! while let Ok(event) = events.recv().await {
//!     if let HubEvent::StateChanged { change, .. } = event {
//!         println!("{change:?}");
//!     }
//! }
//! # }
//! ```

pub mod error;
pub mod event;
pub mod hub;
pub mod protocol;
pub mod response;
pub mod session;
pub mod state;
pub mod types;

pub use error::{AuthError, Error, FetchError, ProtocolError, Result, SchemaError, ValueError};
pub use event::HubEvent;
pub use hub::{
    FetchPolicy, HubBuilder, RefreshOutcome, RefreshReport, ResourceFailure, SectorHub,
};
pub use protocol::{ApiClient, ApiConfig, Resource};
pub use state::{PanelInfo, Snapshot, StateChange};
pub use types::{AccessCode, AlarmStatus, CodeFormat, LockStatus};
