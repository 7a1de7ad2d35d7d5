// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session management for the Sector Alarm API.
//!
//! A [`SessionManager`] owns the account credentials and the single cached
//! bearer token. Tokens carry no local expiry: a stale token is only
//! noticed when a request using it is rejected, at which point the poll
//! cycle calls [`SessionManager::login`] again. The session manager itself
//! never retries.

use serde::de::DeserializeOwned;

use crate::error::{AuthError, Error};
use crate::protocol::{ApiClient, ApiResponse, Resource};
use crate::response::FullSystemResponse;
use crate::state::PanelInfo;
use crate::types::{AuthToken, Credentials};

/// Owner of the credentials and the current bearer token.
///
/// # Examples
///
/// ```no_run
/// use sector_alarm::protocol::ApiConfig;
/// use sector_alarm::session::SessionManager;
/// use sector_alarm::types::Credentials;
///
/// # async fn example() -> sector_alarm::Result<()> {
/// let client = ApiConfig::new().into_client()?;
/// let mut session = SessionManager::new(client, Credentials::new("user", "secret")?);
///
/// let panel = session.establish().await?;
/// println!("panel {} ({})", panel.display_name(), panel.id());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SessionManager {
    client: ApiClient,
    credentials: Credentials,
    token: Option<AuthToken>,
    login_count: u64,
}

impl SessionManager {
    /// Creates a session with no token yet.
    #[must_use]
    pub fn new(client: ApiClient, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
            token: None,
            login_count: 0,
        }
    }

    /// Returns the cached token, if any login has succeeded.
    #[must_use]
    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// Returns `true` once a login has succeeded.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Returns the number of successful logins over the session lifetime.
    #[must_use]
    pub fn login_count(&self) -> u64 {
        self.login_count
    }

    /// Returns the account user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.credentials.user_id()
    }

    /// Logs in and replaces the cached token.
    ///
    /// On failure the previously cached token, if any, is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `Error::Auth` if the login is rejected or its response
    /// carries no token, and `Error::Protocol` on transport failure.
    pub async fn login(&mut self) -> Result<&AuthToken, Error> {
        let token = self.client.login(&self.credentials).await.inspect_err(|e| {
            tracing::warn!(user = %self.credentials.user_id(), error = %e, "Login failed");
        })?;

        self.login_count += 1;
        tracing::info!(
            user = %self.credentials.user_id(),
            logins = self.login_count,
            "Logged in to Sector Alarm"
        );

        let token = self.token.insert(token);
        Ok(&*token)
    }

    /// Logs in and fetches the full system payload to learn the panel.
    ///
    /// # Errors
    ///
    /// Returns error if the login fails, the full system fetch fails, or
    /// the payload has no panel id.
    pub async fn establish(&mut self) -> Result<PanelInfo, Error> {
        self.login().await?;
        let panel = self
            .fetch::<FullSystemResponse>(Resource::FullSystem, None)
            .await?
            .into_panel_info()?;

        tracing::info!(
            panel_id = %panel.id(),
            panel = %panel.display_name(),
            sensors = panel.temperature_labels().len(),
            locks = panel.lock_serials().len(),
            "Discovered panel"
        );

        Ok(panel)
    }

    /// Performs an authenticated call with the cached token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` if no login has succeeded yet,
    /// `Error::Fetch` on a non-200 status, and `Error::Protocol` on
    /// transport failure.
    pub async fn request(
        &self,
        resource: Resource,
        panel_id: Option<&str>,
    ) -> Result<ApiResponse, Error> {
        let token = self.token.as_ref().ok_or(AuthError::NotAuthenticated)?;
        self.client
            .authenticated_request(resource, panel_id, token)
            .await
    }

    /// Performs an authenticated call and decodes the body.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request), plus `Error::Schema` if the body
    /// does not decode into `T`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        resource: Resource,
        panel_id: Option<&str>,
    ) -> Result<T, Error> {
        let response = self.request(resource, panel_id).await?;
        Ok(response.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ApiConfig;

    fn session() -> SessionManager {
        let client = ApiConfig::new()
            .with_base_url("http://127.0.0.1:9")
            .into_client()
            .unwrap();
        SessionManager::new(client, Credentials::new("user", "pw").unwrap())
    }

    #[test]
    fn new_session_has_no_token() {
        let session = session();
        assert!(session.token().is_none());
        assert!(!session.is_authenticated());
        assert_eq!(session.login_count(), 0);
        assert_eq!(session.user_id(), "user");
    }

    #[tokio::test]
    async fn request_without_login_is_rejected_locally() {
        let session = session();
        let err = session
            .request(Resource::Temperatures, Some("1"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::NotAuthenticated)));
    }
}
