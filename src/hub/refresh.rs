// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Results of poll cycles.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::Error;
use crate::protocol::Resource;

/// What a poll cycle does after one resource fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Attempt every resource; each failure only affects its own slice.
    #[default]
    BestEffort,
    /// Stop at the first failing resource. Slices fetched before it are
    /// still committed.
    AbortOnFirstFailure,
}

/// A resource that could not be refreshed during a cycle.
#[derive(Debug, Clone)]
pub struct ResourceFailure {
    resource: Resource,
    error: Arc<Error>,
}

impl ResourceFailure {
    pub(crate) fn new(resource: Resource, error: Error) -> Self {
        Self {
            resource,
            error: Arc::new(error),
        }
    }

    /// The resource that failed.
    #[must_use]
    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Why it failed.
    #[must_use]
    pub fn error(&self) -> &Error {
        &self.error
    }
}

/// Outcome of one poll cycle.
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// Every resource was fetched and committed.
    Updated,
    /// Every resource was attempted and at least one failed; the others
    /// were committed.
    Partial(Vec<ResourceFailure>),
    /// A resource failed under [`FetchPolicy::AbortOnFirstFailure`]. Slices
    /// fetched before it were committed; `skipped` were never requested.
    Aborted {
        /// The failure that stopped the cycle.
        failure: ResourceFailure,
        /// Resources left unrequested, in poll order.
        skipped: Vec<Resource>,
    },
    /// The session could not be (re)established; nothing was committed.
    Failed(Arc<Error>),
}

impl RefreshOutcome {
    /// Returns `true` if every resource was refreshed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Updated)
    }

    /// Returns the resources that were not refreshed.
    ///
    /// A failed session counts as every polled resource failing; an aborted
    /// cycle lists the failing resource followed by the skipped ones.
    #[must_use]
    pub fn failed_resources(&self) -> Vec<Resource> {
        match self {
            Self::Updated => Vec::new(),
            Self::Partial(failures) => failures.iter().map(ResourceFailure::resource).collect(),
            Self::Aborted { failure, skipped } => std::iter::once(failure.resource())
                .chain(skipped.iter().copied())
                .collect(),
            Self::Failed(_) => Resource::POLLED.to_vec(),
        }
    }
}

/// Result of a call to [`SectorHub::refresh`](crate::SectorHub::refresh).
///
/// A throttled call returns the report of the last cycle that ran, with
/// [`throttled`](Self::throttled) set.
#[derive(Debug, Clone)]
pub struct RefreshReport {
    outcome: RefreshOutcome,
    throttled: bool,
    completed_at: DateTime<Utc>,
}

impl RefreshReport {
    pub(crate) fn new(outcome: RefreshOutcome) -> Self {
        Self {
            outcome,
            throttled: false,
            completed_at: Utc::now(),
        }
    }

    pub(crate) fn into_throttled(self) -> Self {
        Self {
            throttled: true,
            ..self
        }
    }

    /// The cycle outcome.
    #[must_use]
    pub fn outcome(&self) -> &RefreshOutcome {
        &self.outcome
    }

    /// Returns `true` if no network call was made for this request.
    #[must_use]
    pub fn throttled(&self) -> bool {
        self.throttled
    }

    /// When the reported cycle completed.
    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Returns `true` if the reported cycle refreshed every resource.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}
