// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `sector_alarm` library.
//!
//! Failures fall into a small hierarchy: authentication against the vendor
//! API, non-success responses from data endpoints, payloads that do not match
//! the expected schema, transport failures, and invalid configuration.
//!
//! Everything except [`Error::Value`] is recoverable: a failed poll cycle is
//! simply retried on the next scheduled tick.

use thiserror::Error;

use crate::protocol::Resource;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Login was rejected or the login response was unusable.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A data endpoint answered with a non-success status.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A response body did not match the expected schema.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The HTTP transport failed before a status was received.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A configuration value was rejected.
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

impl Error {
    /// Returns `true` if retrying on a later poll cycle may succeed.
    ///
    /// Configuration errors never fix themselves; everything else does.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Value(_))
    }

    /// Returns the HTTP status carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth(AuthError::Rejected { status }) => Some(*status),
            Self::Fetch(err) => Some(err.status),
            _ => None,
        }
    }
}

/// Errors raised while obtaining a bearer token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The login endpoint answered with a non-success status.
    #[error("login rejected with HTTP {status}")]
    Rejected {
        /// HTTP status code returned by the login endpoint.
        status: u16,
    },

    /// The login response carried no `AuthorizationToken`.
    #[error("login response has no authorization token")]
    MissingToken,

    /// The login response body could not be decoded.
    #[error("malformed login response: {0}")]
    Malformed(#[source] SchemaError),

    /// An authenticated call was attempted before any login succeeded.
    #[error("no session token available")]
    NotAuthenticated,
}

/// A data endpoint answered with a status other than 200.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to fetch {resource}: HTTP {status}")]
pub struct FetchError {
    /// The resource that was requested.
    pub resource: Resource,
    /// HTTP status code returned by the endpoint.
    pub status: u16,
}

/// Errors related to decoding vendor payloads.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// JSON decoding failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// A field was present but its value could not be interpreted.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to HTTP transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A required credential field was empty.
    #[error("{0} must not be empty")]
    EmptyCredential(&'static str),

    /// The code format is not a valid regular expression.
    #[error("invalid code format {pattern:?}: {message}")]
    InvalidCodeFormat {
        /// The rejected pattern.
        pattern: String,
        /// Description of the compile failure.
        message: String,
    },

    /// The configured code does not match the code format.
    #[error("code does not match format {0:?}")]
    CodeMismatch(String),

    /// A header value contains characters HTTP does not allow.
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
