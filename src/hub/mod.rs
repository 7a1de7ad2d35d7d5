// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel state poller.
//!
//! A [`SectorHub`] owns the session and the committed [`Snapshot`]. The host
//! integration calls [`SectorHub::refresh`] on its own schedule; the hub
//! lets at most one cycle through per throttle window and serializes
//! overlapping calls so two cycles never race on the same token.
//!
//! # Poll cycle
//!
//! 1. Probe `getFullSystem` with the cached token. On a non-200 answer, log
//!    in once; if that fails the cycle ends and nothing is committed.
//! 2. Fetch temperatures, lock states, panel status and the event log.
//! 3. Commit the slices that were fetched successfully in one step, then
//!    publish the differences as [`HubEvent::StateChanged`].

mod builder;
mod refresh;
mod throttle;

pub use builder::HubBuilder;
pub use refresh::{FetchPolicy, RefreshOutcome, RefreshReport, ResourceFailure};
pub use throttle::Throttle;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::sync::{Mutex, broadcast, watch};
use tokio::time::Instant;

use crate::error::Error;
use crate::event::{EventBus, HubEvent};
use crate::protocol::Resource;
use crate::response::{
    LockReading, LogEntry, PanelStatusResponse, TemperatureReading, last_changed_by, lock_map,
    temperature_map,
};
use crate::session::SessionManager;
use crate::state::{PanelInfo, Snapshot};
use crate::types::{AccessCode, AlarmStatus, CodeFormat, LockStatus};

use builder::HubParts;

/// State only touched while a cycle holds the lock.
#[derive(Debug)]
struct PollCycle {
    session: SessionManager,
    throttle: Throttle,
}

/// Bookkeeping readable without waiting for a cycle.
#[derive(Debug, Default)]
struct HubStatus {
    last_report: Option<RefreshReport>,
    last_success: Option<DateTime<Utc>>,
}

/// Connected Sector Alarm hub.
///
/// Construct one with [`SectorHub::builder`] and share it by `Arc` with
/// the entities that read it.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use sector_alarm::SectorHub;
///
/// # async fn example() -> sector_alarm::Result<()> {
/// let hub = Arc::new(
///     SectorHub::builder("user@example.com", "secret")
///         .connect()
///         .await?,
/// );
///
/// let poller = Arc::clone(&hub);
/// tokio::spawn(async move {
///     loop {
///         poller.refresh().await;
///         tokio::time::sleep(std::time::Duration::from_secs(30)).await;
///     }
/// });
///
/// for label in hub.temperature_labels() {
///     println!("{label}: {:?}", hub.temperatures().get(label));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SectorHub {
    panel: PanelInfo,
    code: Option<AccessCode>,
    code_format: CodeFormat,
    fetch_policy: FetchPolicy,
    cycle: Mutex<PollCycle>,
    snapshot: RwLock<Arc<Snapshot>>,
    status: RwLock<HubStatus>,
    ready: watch::Sender<bool>,
    events: EventBus,
}

impl SectorHub {
    /// Starts building a hub for the given account.
    #[must_use]
    pub fn builder(user_id: impl Into<String>, password: impl Into<String>) -> HubBuilder {
        HubBuilder::new(user_id, password)
    }

    fn from_parts(panel: PanelInfo, parts: HubParts) -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            panel,
            code: parts.code,
            code_format: parts.code_format,
            fetch_policy: parts.fetch_policy,
            cycle: Mutex::new(PollCycle {
                session: parts.session,
                throttle: parts.throttle,
            }),
            snapshot: RwLock::new(Arc::new(Snapshot::new())),
            status: RwLock::new(HubStatus::default()),
            ready,
            events: EventBus::with_capacity(parts.event_capacity),
        }
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Runs a poll cycle unless one completed less than the throttle
    /// interval ago.
    ///
    /// A call that arrives while another cycle is running waits for it and
    /// then usually falls inside the throttle window, receiving that cycle's
    /// report. Failures are reported in the returned value, never raised.
    pub async fn refresh(&self) -> RefreshReport {
        let mut cycle = self.cycle.lock().await;

        if !cycle.throttle.is_due(Instant::now()) {
            let last = self.status.read().last_report.clone();
            if let Some(report) = last {
                tracing::trace!(
                    remaining = ?cycle.throttle.remaining(Instant::now()),
                    "Refresh throttled"
                );
                return report.into_throttled();
            }
        }

        self.run_cycle(&mut cycle).await
    }

    /// Runs a poll cycle now, ignoring the throttle window.
    ///
    /// Still waits for any cycle already in flight.
    pub async fn force_refresh(&self) -> RefreshReport {
        let mut cycle = self.cycle.lock().await;
        self.run_cycle(&mut cycle).await
    }

    async fn run_cycle(&self, cycle: &mut PollCycle) -> RefreshReport {
        let outcome = self.poll(&mut cycle.session).await;
        cycle.throttle.mark(Instant::now());

        let report = RefreshReport::new(outcome);
        self.record(&report);
        report
    }

    async fn poll(&self, session: &mut SessionManager) -> RefreshOutcome {
        if let Err(error) = self.ensure_session(session).await {
            tracing::warn!(
                panel_id = %self.panel.id(),
                error = %error,
                "Poll cycle aborted, snapshot left untouched"
            );
            self.events.publish(HubEvent::RefreshFailed {
                error: error.to_string(),
            });
            return RefreshOutcome::Failed(Arc::new(error));
        }

        let previous = self.snapshot();
        let mut staged = Snapshot::clone(&previous);
        let mut failures = Vec::new();
        let mut aborted = None;
        let mut fetched = 0usize;

        for (index, resource) in Resource::POLLED.into_iter().enumerate() {
            match self.fetch_into(session, resource, &mut staged).await {
                Ok(()) => fetched += 1,
                Err(error) => {
                    tracing::warn!(
                        resource = %resource,
                        error = %error,
                        "Failed to refresh resource"
                    );
                    let failure = ResourceFailure::new(resource, error);
                    if self.fetch_policy == FetchPolicy::AbortOnFirstFailure {
                        let skipped = Resource::POLLED[index + 1..].to_vec();
                        tracing::debug!(skipped = ?skipped, "Remaining resources skipped");
                        aborted = Some((failure, skipped));
                        break;
                    }
                    failures.push(failure);
                }
            }
        }

        if fetched > 0 {
            staged.set_updated_at(Utc::now());
            self.commit(&previous, staged);
        }

        let outcome = match aborted {
            Some((failure, skipped)) => RefreshOutcome::Aborted { failure, skipped },
            None if failures.is_empty() => RefreshOutcome::Updated,
            None => RefreshOutcome::Partial(failures),
        };

        self.events.publish(HubEvent::Refreshed {
            failed: outcome.failed_resources(),
        });

        outcome
    }

    /// Makes sure the session holds a token the API accepts.
    ///
    /// Logs in at most once.
    async fn ensure_session(&self, session: &mut SessionManager) -> Result<(), Error> {
        if !session.is_authenticated() {
            session.login().await?;
            return Ok(());
        }

        match session.request(Resource::FullSystem, None).await {
            Ok(_) => {
                tracing::debug!("Session token still valid");
                Ok(())
            }
            Err(Error::Fetch(err)) => {
                tracing::debug!(status = err.status, "Token rejected, logging in again");
                session.login().await.map(|_| ())
            }
            Err(other) => Err(other),
        }
    }

    async fn fetch_into(
        &self,
        session: &SessionManager,
        resource: Resource,
        staged: &mut Snapshot,
    ) -> Result<(), Error> {
        let panel_id = Some(self.panel.id());

        match resource {
            Resource::Temperatures => {
                let readings: Vec<TemperatureReading> = session.fetch(resource, panel_id).await?;
                let temperatures = temperature_map(&readings)?;
                tracing::debug!(temperatures = ?temperatures, "Temperatures fetched");
                staged.replace_temperatures(temperatures);
            }
            Resource::Locks => {
                let readings: Vec<LockReading> = session.fetch(resource, panel_id).await?;
                let locks = lock_map(&readings);
                tracing::debug!(locks = ?locks, "Lock states fetched");
                staged.replace_locks(locks);
            }
            Resource::PanelStatus => {
                let status: PanelStatusResponse = session.fetch(resource, panel_id).await?;
                let alarm = status.alarm_status();
                tracing::debug!(alarm = %alarm, online = ?status.is_online, "Panel status fetched");
                staged.set_alarm_status(alarm);
            }
            Resource::Logs => {
                let entries: Vec<LogEntry> = session.fetch(resource, panel_id).await?;
                let user = last_changed_by(&entries);
                tracing::debug!(changed_by = %user, entries = entries.len(), "Event log fetched");
                staged.set_changed_by(user);
            }
            // Not part of the polled set.
            Resource::Login | Resource::FullSystem => {}
        }

        Ok(())
    }

    fn commit(&self, previous: &Snapshot, staged: Snapshot) {
        let changes = staged.changes_since(previous);
        let staged = Arc::new(staged);
        *self.snapshot.write() = Arc::clone(&staged);

        for change in changes {
            self.events.publish(HubEvent::StateChanged {
                change,
                snapshot: Arc::clone(&staged),
            });
        }
    }

    fn record(&self, report: &RefreshReport) {
        {
            let mut status = self.status.write();
            status.last_report = Some(report.clone());
            if report.is_success() {
                status.last_success = Some(report.completed_at());
            }
        }

        if report.is_success() && !*self.ready.borrow() {
            self.ready.send_replace(true);
            tracing::info!(panel_id = %self.panel.id(), "Sector Alarm hub ready");
            self.events.publish(HubEvent::Ready);
        }
    }

    // =========================================================================
    // Readiness and health
    // =========================================================================

    /// Returns `true` once a cycle has refreshed every resource.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    /// Waits until [`is_ready`](Self::is_ready) turns true.
    pub async fn wait_ready(&self) {
        let mut rx = self.ready.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|ready| *ready).await;
    }

    /// Returns a receiver that observes the readiness flag.
    #[must_use]
    pub fn readiness(&self) -> watch::Receiver<bool> {
        self.ready.subscribe()
    }

    /// Returns the report of the most recent cycle that ran.
    #[must_use]
    pub fn last_report(&self) -> Option<RefreshReport> {
        self.status.read().last_report.clone()
    }

    /// Returns when a cycle last refreshed every resource.
    #[must_use]
    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        self.status.read().last_success
    }

    /// Returns `true` if no cycle has fully succeeded within `max_age`.
    #[must_use]
    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.last_success().is_none_or(|at| {
            (Utc::now() - at)
                .to_std()
                .is_ok_and(|age| age > max_age)
        })
    }

    /// Subscribes to hub events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        self.events.subscribe()
    }

    // =========================================================================
    // Snapshot accessors
    // =========================================================================

    /// Returns the last committed snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.snapshot.read())
    }

    /// Returns the alarm arm state.
    #[must_use]
    pub fn alarm_status(&self) -> AlarmStatus {
        self.snapshot.read().alarm_status()
    }

    /// Returns the user behind the last arm change, or `"unknown"`.
    #[must_use]
    pub fn changed_by(&self) -> String {
        self.snapshot.read().changed_by().to_string()
    }

    /// Returns all temperature readings keyed by sensor label.
    #[must_use]
    pub fn temperatures(&self) -> BTreeMap<String, f64> {
        self.snapshot.read().temperatures().clone()
    }

    /// Returns all lock states keyed by serial.
    #[must_use]
    pub fn lock_statuses(&self) -> BTreeMap<String, LockStatus> {
        self.snapshot.read().locks().clone()
    }

    // =========================================================================
    // Panel identity
    // =========================================================================

    /// Returns the panel identity learned at connect time.
    #[must_use]
    pub fn panel(&self) -> &PanelInfo {
        &self.panel
    }

    /// Returns the vendor panel id.
    #[must_use]
    pub fn panel_id(&self) -> &str {
        self.panel.id()
    }

    /// Returns the panel name shown in the vendor app.
    #[must_use]
    pub fn panel_display_name(&self) -> &str {
        self.panel.display_name()
    }

    /// Returns the labels of the temperature sensors.
    #[must_use]
    pub fn temperature_labels(&self) -> &[String] {
        self.panel.temperature_labels()
    }

    /// Returns the serials of the locks.
    #[must_use]
    pub fn lock_serials(&self) -> &[String] {
        self.panel.lock_serials()
    }

    // =========================================================================
    // Codes
    // =========================================================================

    /// Returns the configured panel code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_ref().map(AccessCode::as_str)
    }

    /// Returns the pattern entered codes must match.
    #[must_use]
    pub fn code_format(&self) -> &CodeFormat {
        &self.code_format
    }

    /// Returns `true` if `input` satisfies the code format.
    #[must_use]
    pub fn accepts_code(&self, input: &str) -> bool {
        self.code_format.matches(input)
    }
}
