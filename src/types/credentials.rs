// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Account credentials and session tokens.

use std::fmt;

use crate::error::ValueError;

/// Account credentials used to mint bearer tokens.
///
/// Supplied once at startup and never modified. The password is redacted
/// from the `Debug` output.
///
/// # Examples
///
/// ```
/// use sector_alarm::types::Credentials;
///
/// let creds = Credentials::new("user@example.com", "secret").unwrap();
/// assert_eq!(creds.user_id(), "user@example.com");
/// assert!(!format!("{creds:?}").contains("secret"));
///
/// assert!(Credentials::new("", "secret").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user_id: String,
    password: String,
}

impl Credentials {
    /// Creates credentials from a user id and password.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyCredential` if either value is empty.
    pub fn new(
        user_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValueError> {
        let user_id = user_id.into();
        let password = password.into();

        if user_id.trim().is_empty() {
            return Err(ValueError::EmptyCredential("user id"));
        }
        if password.is_empty() {
            return Err(ValueError::EmptyCredential("password"));
        }

        Ok(Self { user_id, password })
    }

    /// Returns the account user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the account password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer token returned by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a raw token value.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw value sent in the `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_values() {
        assert_eq!(
            Credentials::new("  ", "pw").unwrap_err(),
            ValueError::EmptyCredential("user id")
        );
        assert_eq!(
            Credentials::new("user", "").unwrap_err(),
            ValueError::EmptyCredential("password")
        );
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = AuthToken::new("abc123");
        assert_eq!(token.as_str(), "abc123");
        assert_eq!(format!("{token:?}"), "AuthToken(<redacted>)");
    }
}
