// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP access to the Sector Alarm API.
//!
//! - [`ApiConfig`]: endpoint address, timeout and vendor headers
//! - [`ApiClient`]: login and authenticated requests
//! - [`Resource`]: the endpoint table
//! - [`ApiResponse`]: status plus raw body, parsed on demand

mod http;
mod resource;

pub use http::{ApiClient, ApiConfig};
pub use resource::Resource;

use crate::error::SchemaError;

/// Response from an API call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    body: String,
}

impl ApiResponse {
    /// Creates a response from a status and raw body.
    #[must_use]
    pub fn new(status: u16, body: String) -> Self {
        Self { status, body }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns `true` for status 200.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Returns the raw JSON response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the response as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, SchemaError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_200_is_success() {
        assert!(ApiResponse::new(200, String::new()).is_success());
        assert!(!ApiResponse::new(204, String::new()).is_success());
        assert!(!ApiResponse::new(401, String::new()).is_success());
    }

    #[test]
    fn parse_reports_schema_errors() {
        let response = ApiResponse::new(200, "not json".to_string());
        let result: Result<serde_json::Value, _> = response.parse();
        assert!(matches!(result, Err(SchemaError::Json(_))));
    }
}
