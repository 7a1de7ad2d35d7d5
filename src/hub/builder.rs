// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hub builder.

use std::fmt;
use std::time::Duration;

use crate::error::Error;
use crate::hub::{FetchPolicy, SectorHub, Throttle};
use crate::protocol::ApiConfig;
use crate::session::SessionManager;
use crate::types::{AccessCode, CodeFormat, Credentials};

/// Builder for a connected [`SectorHub`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use sector_alarm::SectorHub;
///
/// # async fn example() -> sector_alarm::Result<()> {
/// let hub = SectorHub::builder("user@example.com", "secret")
///     .with_code("1234")
///     .with_min_refresh_interval(Duration::from_secs(120))
///     .connect()
///     .await?;
///
/// println!("alarm is {}", hub.alarm_status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HubBuilder {
    user_id: String,
    password: String,
    code: Option<String>,
    code_format: String,
    api: ApiConfig,
    min_refresh_interval: Duration,
    fetch_policy: FetchPolicy,
    event_capacity: usize,
}

impl fmt::Debug for HubBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubBuilder")
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .field("code", &self.code.as_ref().map(|_| "<redacted>"))
            .field("code_format", &self.code_format)
            .field("api", &self.api)
            .field("min_refresh_interval", &self.min_refresh_interval)
            .field("fetch_policy", &self.fetch_policy)
            .finish_non_exhaustive()
    }
}

/// Validated builder inputs.
pub(crate) struct HubParts {
    pub(crate) session: SessionManager,
    pub(crate) code: Option<AccessCode>,
    pub(crate) code_format: CodeFormat,
    pub(crate) throttle: Throttle,
    pub(crate) fetch_policy: FetchPolicy,
    pub(crate) event_capacity: usize,
}

impl HubBuilder {
    /// Default capacity of the event channel.
    pub const DEFAULT_EVENT_CAPACITY: usize = 256;

    pub(crate) fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
            code: None,
            code_format: CodeFormat::DEFAULT_PATTERN.to_string(),
            api: ApiConfig::new(),
            min_refresh_interval: Throttle::DEFAULT_INTERVAL,
            fetch_policy: FetchPolicy::default(),
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
        }
    }

    /// Sets the panel code handed to lock and alarm entities.
    ///
    /// An empty code means none is configured.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the pattern entered codes must match.
    #[must_use]
    pub fn with_code_format(mut self, pattern: impl Into<String>) -> Self {
        self.code_format = pattern.into();
        self
    }

    /// Replaces the API configuration.
    #[must_use]
    pub fn with_api_config(mut self, api: ApiConfig) -> Self {
        self.api = api;
        self
    }

    /// Points the hub at another API address, keeping other API settings.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api = self.api.with_base_url(base_url);
        self
    }

    /// Sets the minimum interval between two real refreshes.
    #[must_use]
    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.min_refresh_interval = interval;
        self
    }

    /// Sets how a cycle reacts to a failing resource.
    #[must_use]
    pub fn with_fetch_policy(mut self, policy: FetchPolicy) -> Self {
        self.fetch_policy = policy;
        self
    }

    /// Sets the event channel capacity.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// Checks the configuration without touching the network.
    ///
    /// # Errors
    ///
    /// Returns the error [`connect`](Self::connect) would fail with before
    /// sending any request.
    pub fn validate(&self) -> Result<(), Error> {
        self.clone().into_parts().map(|_| ())
    }

    pub(crate) fn into_parts(self) -> Result<HubParts, Error> {
        let credentials = Credentials::new(self.user_id, self.password)?;
        let code_format = CodeFormat::new(&self.code_format)?;
        let code = self
            .code
            .filter(|c| !c.is_empty())
            .map(|c| AccessCode::new(c, &code_format))
            .transpose()?;
        let client = self.api.into_client()?;

        Ok(HubParts {
            session: SessionManager::new(client, credentials),
            code,
            code_format,
            throttle: Throttle::new(self.min_refresh_interval),
            fetch_policy: self.fetch_policy,
            event_capacity: self.event_capacity,
        })
    }

    /// Logs in, discovers the panel and performs the first refresh.
    ///
    /// The hub is returned even if that first refresh is incomplete; it then
    /// reports not ready until a later cycle succeeds fully.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid, the login is
    /// rejected, or the full system payload cannot be fetched.
    pub async fn connect(self) -> Result<SectorHub, Error> {
        let mut parts = self.into_parts()?;
        let panel = parts.session.establish().await?;

        let hub = SectorHub::from_parts(panel, parts);
        let report = hub.force_refresh().await;
        if !report.is_success() {
            tracing::warn!(
                panel_id = %hub.panel_id(),
                failed = ?report.outcome().failed_resources(),
                "Initial refresh incomplete, hub not ready yet"
            );
        }

        Ok(hub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProtocolError, ValueError};

    #[test]
    fn debug_hides_secrets() {
        let debug = format!("{:?}", HubBuilder::new("user", "hunter2").with_code("9876"));
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("9876"));
    }

    #[test]
    fn defaults_validate() {
        assert!(HubBuilder::new("user", "pw").validate().is_ok());
    }

    #[test]
    fn empty_credentials_are_rejected() {
        let err = HubBuilder::new("", "pw").validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Value(ValueError::EmptyCredential("user id"))
        ));
    }

    #[test]
    fn code_must_match_format() {
        let err = HubBuilder::new("user", "pw")
            .with_code("12")
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::CodeMismatch(_))));

        assert!(
            HubBuilder::new("user", "pw")
                .with_code("12")
                .with_code_format(r"^\d{2}$")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn empty_code_means_none() {
        let parts = HubBuilder::new("user", "pw")
            .with_code("")
            .into_parts()
            .unwrap();
        assert!(parts.code.is_none());
    }

    #[test]
    fn invalid_code_format_is_rejected() {
        let err = HubBuilder::new("user", "pw")
            .with_code_format("(")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Value(ValueError::InvalidCodeFormat { .. })
        ));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HubBuilder::new("user", "pw")
            .with_base_url("ftp://example.com")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::InvalidAddress(_))
        ));
    }

    #[test]
    fn settings_flow_into_parts() {
        let parts = HubBuilder::new("user", "pw")
            .with_min_refresh_interval(Duration::from_secs(5))
            .with_fetch_policy(FetchPolicy::AbortOnFirstFailure)
            .with_event_capacity(0)
            .into_parts()
            .unwrap();
        assert_eq!(parts.throttle.min_interval(), Duration::from_secs(5));
        assert_eq!(parts.fetch_policy, FetchPolicy::AbortOnFirstFailure);
        assert_eq!(parts.event_capacity, 1);
    }
}
