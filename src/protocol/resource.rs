// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vendor API endpoint table.

use std::fmt;

use reqwest::Method;

/// An endpoint of the Sector Alarm API.
///
/// Paths are case-sensitive on the vendor side and are kept exactly as the
/// mobile app sends them.
///
/// # Examples
///
/// ```
/// use sector_alarm::protocol::Resource;
///
/// assert_eq!(
///     Resource::Temperatures.request_path(Some("0123")),
///     "/api/Panel/GetTemperatures?panelId=0123"
/// );
/// assert_eq!(Resource::FullSystem.request_path(None), "/api/panel/getFullSystem");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// `POST /api/Login/Login`
    Login,
    /// `GET /api/panel/getFullSystem`
    FullSystem,
    /// `GET /api/Panel/GetTemperatures`
    Temperatures,
    /// `GET /api/Panel/GetLockStatus`
    Locks,
    /// `GET /api/Panel/GetPanelStatus`
    PanelStatus,
    /// `GET /api/panel/GetLogs`
    Logs,
}

impl Resource {
    /// Resources fetched on every poll cycle, in fetch order.
    pub const POLLED: [Self; 4] = [Self::Temperatures, Self::Locks, Self::PanelStatus, Self::Logs];

    /// Returns the path without query string.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Login => "/api/Login/Login",
            Self::FullSystem => "/api/panel/getFullSystem",
            Self::Temperatures => "/api/Panel/GetTemperatures",
            Self::Locks => "/api/Panel/GetLockStatus",
            Self::PanelStatus => "/api/Panel/GetPanelStatus",
            Self::Logs => "/api/panel/GetLogs",
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::Login => Method::POST,
            _ => Method::GET,
        }
    }

    /// Returns `true` if the endpoint takes a `panelId` query parameter.
    #[must_use]
    pub const fn is_panel_scoped(&self) -> bool {
        !matches!(self, Self::Login | Self::FullSystem)
    }

    /// Builds the request path, appending `panelId` for panel-scoped endpoints.
    #[must_use]
    pub fn request_path(&self, panel_id: Option<&str>) -> String {
        match panel_id {
            Some(id) if self.is_panel_scoped() => {
                format!("{}?panelId={}", self.path(), urlencoding::encode(id))
            }
            _ => self.path().to_string(),
        }
    }

    /// Returns a short human-readable name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::FullSystem => "full system",
            Self::Temperatures => "temperatures",
            Self::Locks => "locks",
            Self::PanelStatus => "panel status",
            Self::Logs => "logs",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_scoped_paths_carry_panel_id() {
        assert_eq!(
            Resource::Locks.request_path(Some("42")),
            "/api/Panel/GetLockStatus?panelId=42"
        );
        assert_eq!(
            Resource::PanelStatus.request_path(Some("42")),
            "/api/Panel/GetPanelStatus?panelId=42"
        );
        assert_eq!(
            Resource::Logs.request_path(Some("42")),
            "/api/panel/GetLogs?panelId=42"
        );
    }

    #[test]
    fn panel_id_is_url_encoded() {
        assert_eq!(
            Resource::Temperatures.request_path(Some("a b&c")),
            "/api/Panel/GetTemperatures?panelId=a%20b%26c"
        );
    }

    #[test]
    fn unscoped_paths_ignore_panel_id() {
        assert_eq!(Resource::Login.request_path(Some("42")), "/api/Login/Login");
        assert_eq!(Resource::Login.method(), Method::POST);
        assert_eq!(Resource::FullSystem.method(), Method::GET);
    }

    #[test]
    fn polled_resources_in_order() {
        assert_eq!(
            Resource::POLLED,
            [
                Resource::Temperatures,
                Resource::Locks,
                Resource::PanelStatus,
                Resource::Logs
            ]
        );
    }
}
