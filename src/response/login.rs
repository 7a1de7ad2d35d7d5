// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login response parsing.

use serde::Deserialize;

use crate::error::AuthError;
use crate::types::AuthToken;

/// Response from `POST /api/Login/Login`.
///
/// # Examples
///
/// ```
/// use sector_alarm::response::LoginResponse;
///
/// let json = r#"{"AuthorizationToken": "abc", "User": {"Id": 1}}"#;
/// let response: LoginResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.into_token().unwrap().as_str(), "abc");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "AuthorizationToken", default)]
    authorization_token: Option<String>,
}

impl LoginResponse {
    /// Extracts the bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingToken` if the field is absent, null or empty.
    pub fn into_token(self) -> Result<AuthToken, AuthError> {
        match self.authorization_token {
            Some(token) if !token.is_empty() => Ok(AuthToken::new(token)),
            _ => Err(AuthError::MissingToken),
        }
    }
}
