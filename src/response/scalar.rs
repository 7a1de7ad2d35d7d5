// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loosely typed JSON scalars.
//!
//! The vendor is inconsistent about quoting: ids and readings show up both
//! as numbers and as strings depending on panel firmware.

use std::fmt;

use serde::Deserialize;

use crate::error::SchemaError;

/// A JSON number or string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Text(String),
}

impl Scalar {
    /// Interprets the scalar as a number.
    ///
    /// Strings are trimmed and may use a decimal comma.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn to_f64(&self, field: &str) -> Result<f64, SchemaError> {
        match self {
            Self::Int(v) => Ok(*v as f64),
            Self::Float(v) => Ok(*v),
            Self::Text(s) => s
                .trim()
                .replace(',', ".")
                .parse::<f64>()
                .map_err(|e| SchemaError::InvalidValue {
                    field: field.to_string(),
                    message: format!("{s:?}: {e}"),
                }),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
