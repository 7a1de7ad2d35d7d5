// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimum-interval gate for poll cycles.

use std::time::Duration;

use tokio::time::Instant;

/// Gate that lets a poll cycle through at most once per interval.
///
/// Measured on the monotonic clock from the end of the previous cycle, so
/// wall-clock jumps neither skip nor double a refresh.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use sector_alarm::hub::Throttle;
/// use tokio::time::Instant;
///
/// let mut throttle = Throttle::new(Duration::from_secs(60));
/// let start = Instant::now();
/// assert!(throttle.is_due(start));
///
/// throttle.mark(start);
/// assert!(!throttle.is_due(start + Duration::from_secs(59)));
/// assert!(throttle.is_due(start + Duration::from_secs(60)));
/// ```
#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    /// Default minimum interval between two real refreshes.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

    /// Creates a gate that has never fired.
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// Returns the configured interval.
    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Returns `true` if a cycle may run at `now`.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.last
            .is_none_or(|last| now.saturating_duration_since(last) >= self.min_interval)
    }

    /// Returns how long until the next cycle may run.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.last.map_or(Duration::ZERO, |last| {
            self.min_interval
                .saturating_sub(now.saturating_duration_since(last))
        })
    }

    /// Records that a cycle completed at `now`.
    pub fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}
