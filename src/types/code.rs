// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel code and code-format validation.
//!
//! The lock and alarm entities of a host integration ask the user for a
//! code before acting. The hub carries the configured code and the pattern
//! an entered code must match.

use std::fmt;

use regex::Regex;

use crate::error::ValueError;

/// Pattern an entered panel code must match.
///
/// The hub builder uses [`CodeFormat::DEFAULT_PATTERN`] (four to six digits)
/// unless another pattern is configured.
///
/// # Examples
///
/// ```
/// use sector_alarm::types::CodeFormat;
///
/// let format = CodeFormat::new(CodeFormat::DEFAULT_PATTERN).unwrap();
/// assert!(format.matches("1234"));
/// assert!(!format.matches("12a4"));
///
/// let format = CodeFormat::new(r"^\d{8}$").unwrap();
/// assert!(format.matches("12345678"));
/// assert!(CodeFormat::new("(").is_err());
/// ```
#[derive(Clone)]
pub struct CodeFormat(Regex);

impl CodeFormat {
    /// The default pattern: four to six digits.
    pub const DEFAULT_PATTERN: &'static str = r"^\d{4,6}$";

    /// Compiles a code format pattern.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidCodeFormat` if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self, ValueError> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|e| ValueError::InvalidCodeFormat {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    /// Returns the source pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.0.as_str()
    }

    /// Returns `true` if `code` satisfies the pattern.
    #[must_use]
    pub fn matches(&self, code: &str) -> bool {
        self.0.is_match(code)
    }
}

impl fmt::Debug for CodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CodeFormat").field(&self.pattern()).finish()
    }
}

impl PartialEq for CodeFormat {
    fn eq(&self, other: &Self) -> bool {
        self.pattern() == other.pattern()
    }
}

/// A panel code validated against a [`CodeFormat`].
#[derive(Clone, PartialEq, Eq)]
pub struct AccessCode(String);

impl AccessCode {
    /// Validates `code` against `format`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::CodeMismatch` if the code does not match.
    pub fn new(code: impl Into<String>, format: &CodeFormat) -> Result<Self, ValueError> {
        let code = code.into();
        if format.matches(&code) {
            Ok(Self(code))
        } else {
            Err(ValueError::CodeMismatch(format.pattern().to_string()))
        }
    }

    /// Returns the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessCode(<redacted>)")
    }
}
