// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the Sector Alarm API.

use std::time::Duration;

use reqwest::header::{CONNECTION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;

use crate::error::{AuthError, Error, FetchError, ProtocolError, ValueError};
use crate::protocol::{ApiResponse, Resource};
use crate::response::LoginResponse;
use crate::types::{AuthToken, Credentials};

// ============================================================================
// ApiConfig - Configuration for the vendor endpoint
// ============================================================================

/// Configuration for the Sector Alarm HTTP API.
///
/// Holds the endpoint address, the per-request timeout and the fixed set of
/// headers the vendor expects from its mobile app.
///
/// # Examples
///
/// ```
/// use sector_alarm::protocol::ApiConfig;
/// use std::time::Duration;
///
/// let config = ApiConfig::new()
///     .with_base_url("https://mypagesapi.sectoralarm.net")
///     .with_timeout(Duration::from_secs(20));
///
/// assert_eq!(config.timeout(), Duration::from_secs(20));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
    user_agent: String,
    api_version: String,
    app_version: String,
    platform: String,
}

impl ApiConfig {
    /// Production API address.
    pub const DEFAULT_BASE_URL: &'static str = "https://mypagesapi.sectoralarm.net";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// User agent of the vendor's iOS app.
    pub const DEFAULT_USER_AGENT: &'static str = "SectorAlarm/356 CFNetwork/1152.2 Darwin/19.4.0";
    /// Value of the `API-Version` header.
    pub const DEFAULT_API_VERSION: &'static str = "6";
    /// Value of the `Version` header.
    pub const DEFAULT_APP_VERSION: &'static str = "2.0.20";
    /// Value of the `Platform` header.
    pub const DEFAULT_PLATFORM: &'static str = "iOS";

    /// Creates a configuration pointing at the production API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
            api_version: Self::DEFAULT_API_VERSION.to_string(),
            app_version: Self::DEFAULT_APP_VERSION.to_string(),
            platform: Self::DEFAULT_PLATFORM.to_string(),
        }
    }

    /// Sets the API address (scheme, host and optional port).
    ///
    /// A trailing slash is ignored.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Overrides the `Version` header.
    #[must_use]
    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = version.into();
        self
    }

    /// Returns the API address.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the user agent.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Builds the headers sent with every request.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHeader` if a configured value is not a
    /// legal header value.
    pub fn default_headers(&self) -> Result<HeaderMap, ValueError> {
        fn value(name: &'static str, raw: &str) -> Result<HeaderValue, ValueError> {
            HeaderValue::from_str(raw).map_err(|_| ValueError::InvalidHeader(name))
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("api-version"),
            value("API-Version", &self.api_version)?,
        );
        headers.insert(
            HeaderName::from_static("platform"),
            value("Platform", &self.platform)?,
        );
        headers.insert(
            HeaderName::from_static("version"),
            value("Version", &self.app_version)?,
        );
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Creates an `ApiClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the address is not an `http(s)` URL, a header value is
    /// invalid, or the HTTP client cannot be created.
    pub fn into_client(self) -> Result<ApiClient, Error> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(self.base_url).into());
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .default_headers(self.default_headers()?)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(ApiClient {
            base_url: self.base_url,
            client,
            timeout: self.timeout,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// ApiClient - Stateless HTTP access to the vendor API
// ============================================================================

/// Login request body.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct LoginRequest<'a> {
    user_id: &'a str,
    password: &'a str,
}

/// HTTP client for the Sector Alarm API.
///
/// The client itself holds no session state: callers pass the token for
/// every authenticated call. [`SessionManager`](crate::session::SessionManager)
/// owns the token and decides when to log in again.
///
/// # Examples
///
/// ```no_run
/// use sector_alarm::protocol::{ApiConfig, Resource};
/// use sector_alarm::types::Credentials;
///
/// # async fn example() -> sector_alarm::Result<()> {
/// let client = ApiConfig::new().into_client()?;
/// let creds = Credentials::new("user@example.com", "secret")?;
///
/// let token = client.login(&creds).await?;
/// let response = client
///     .authenticated_request(Resource::FullSystem, None, &token)
///     .await?;
/// println!("{}", response.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl ApiClient {
    /// Returns the API address.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn map_transport(&self, err: reqwest::Error) -> ProtocolError {
        if err.is_timeout() {
            let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
            ProtocolError::Timeout(millis)
        } else {
            ProtocolError::Http(err)
        }
    }

    async fn read(&self, response: reqwest::Response) -> Result<ApiResponse, ProtocolError> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_transport(e))?;
        Ok(ApiResponse::new(status, body))
    }

    /// Exchanges credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` on a non-200 status,
    /// `AuthError::MissingToken` if the body carries no token,
    /// `AuthError::Malformed` if the body is not JSON, and
    /// `ProtocolError` if the request could not be sent.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthToken, Error> {
        let url = self.url(Resource::Login.path());

        tracing::debug!(url = %url, user = %credentials.user_id(), "Sending login request");

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                user_id: credentials.user_id(),
                password: credentials.password(),
            })
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;
        let response = self.read(response).await?;

        if !response.is_success() {
            return Err(AuthError::Rejected {
                status: response.status(),
            }
            .into());
        }

        let login: LoginResponse = response.parse().map_err(AuthError::Malformed)?;
        Ok(login.into_token()?)
    }

    /// Performs a raw HTTP call with the token attached.
    ///
    /// Any status is returned as-is; deciding what a failure status means is
    /// left to the caller.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request could not be sent or the body
    /// could not be read.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: &AuthToken,
    ) -> Result<ApiResponse, ProtocolError> {
        let url = self.url(path);

        tracing::debug!(method = %method, url = %url, "Sending authenticated request");

        let response = self
            .client
            .request(method, &url)
            .header(reqwest::header::AUTHORIZATION, token.as_str())
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;
        let response = self.read(response).await?;

        tracing::debug!(status = response.status(), url = %url, "Received response");

        Ok(response)
    }

    /// Performs an authenticated call to `resource` and requires status 200.
    ///
    /// No retry happens here; re-login policy belongs to the poll cycle.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` carrying the resource and status on a non-200
    /// response, or `ProtocolError` on transport failure.
    pub async fn authenticated_request(
        &self,
        resource: Resource,
        panel_id: Option<&str>,
        token: &AuthToken,
    ) -> Result<ApiResponse, Error> {
        let path = resource.request_path(panel_id);
        let response = self.request(resource.method(), &path, token).await?;

        if response.is_success() {
            Ok(response)
        } else {
            Err(FetchError {
                resource,
                status: response.status(),
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = ApiConfig::new();
        assert_eq!(config.base_url(), "https://mypagesapi.sectoralarm.net");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(
            config.user_agent(),
            "SectorAlarm/356 CFNetwork/1152.2 Darwin/19.4.0"
        );
    }

    #[test]
    fn config_strips_trailing_slash() {
        let config = ApiConfig::new().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn default_headers_carry_vendor_values() {
        let headers = ApiConfig::new().default_headers().unwrap();
        assert_eq!(headers["api-version"], "6");
        assert_eq!(headers["platform"], "iOS");
        assert_eq!(headers["version"], "2.0.20");
        assert_eq!(headers["connection"], "keep-alive");
        assert_eq!(headers["content-type"], "application/json");
    }

    #[test]
    fn invalid_header_value_is_rejected() {
        let config = ApiConfig::new().with_app_version("2.0\n20");
        assert_eq!(
            config.default_headers().unwrap_err(),
            ValueError::InvalidHeader("Version")
        );
    }

    #[test]
    fn into_client_requires_http_scheme() {
        let err = ApiConfig::new()
            .with_base_url("mypagesapi.sectoralarm.net")
            .into_client()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::InvalidAddress(_))
        ));
    }

    #[test]
    fn client_builds_urls_from_base() {
        let client = ApiConfig::new()
            .with_base_url("http://127.0.0.1:9000")
            .into_client()
            .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9000");
        assert_eq!(
            client.url(&Resource::Logs.request_path(Some("7"))),
            "http://127.0.0.1:9000/api/panel/GetLogs?panelId=7"
        );
    }

    #[test]
    fn login_request_uses_vendor_field_names() {
        let body = serde_json::to_value(LoginRequest {
            user_id: "user",
            password: "pw",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"UserId": "user", "Password": "pw"}));
    }
}
