// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the API client and session using wiremock.

use std::time::Duration;

use sector_alarm::protocol::{ApiClient, ApiConfig};
use sector_alarm::session::SessionManager;
use sector_alarm::types::Credentials;
use sector_alarm::{AuthError, Error, FetchError, ProtocolError, Resource};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiConfig::new()
        .with_base_url(format!("{}/", server.uri()))
        .into_client()
        .unwrap()
}

fn session(server: &MockServer) -> SessionManager {
    SessionManager::new(
        client(server),
        Credentials::new("user@example.com", "secret").unwrap(),
    )
}

async fn mount_login(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/Login/Login"))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// Login
// ============================================================================

mod login {
    use super::*;

    #[tokio::test]
    async fn sends_vendor_headers_and_credentials() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/Login/Login"))
            .and(header("API-Version", "6"))
            .and(header("Platform", "iOS"))
            .and(header("Version", "2.0.20"))
            .and(header(
                "User-Agent",
                "SectorAlarm/356 CFNetwork/1152.2 Darwin/19.4.0",
            ))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({
                "UserId": "user@example.com",
                "Password": "secret"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "AuthorizationToken": "abc123" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server);
        let token = session.login().await.unwrap();

        assert_eq!(token.as_str(), "abc123");
        assert!(session.is_authenticated());
        assert_eq!(session.login_count(), 1);
    }

    #[tokio::test]
    async fn missing_token_keeps_previous_one() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/Login/Login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "AuthorizationToken": "first" })),
            )
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        mount_login(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({ "AuthorizationToken": null })),
        )
        .await;

        let mut session = session(&server);
        session.login().await.unwrap();
        let err = session.login().await.unwrap_err();

        assert!(matches!(err, Error::Auth(AuthError::MissingToken)));
        assert_eq!(session.token().map(|t| t.as_str()), Some("first"));
        assert_eq!(session.login_count(), 1);
    }

    #[tokio::test]
    async fn empty_token_is_missing() {
        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({ "AuthorizationToken": "" })),
        )
        .await;

        let mut session = session(&server);
        let err = session.login().await.unwrap_err();

        assert!(matches!(err, Error::Auth(AuthError::MissingToken)));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let server = MockServer::start().await;
        mount_login(&server, ResponseTemplate::new(200).set_body_string("<html>")).await;

        let mut session = session(&server);
        let err = session.login().await.unwrap_err();

        assert!(matches!(err, Error::Auth(AuthError::Malformed(_))));
    }

    #[tokio::test]
    async fn rejection_carries_status() {
        let server = MockServer::start().await;
        mount_login(&server, ResponseTemplate::new(401)).await;

        let mut session = session(&server);
        let err = session.login().await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert!(err.is_recoverable());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn slow_login_times_out() {
        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(json!({ "AuthorizationToken": "late" }))
                .set_delay(Duration::from_millis(500)),
        )
        .await;

        let client = ApiConfig::new()
            .with_base_url(server.uri())
            .with_timeout(Duration::from_millis(50))
            .into_client()
            .unwrap();
        let credentials = Credentials::new("user@example.com", "secret").unwrap();

        let err = client.login(&credentials).await.unwrap_err();

        assert!(matches!(err, Error::Protocol(ProtocolError::Timeout(50))));
    }
}

// ============================================================================
// Authenticated requests
// ============================================================================

mod requests {
    use super::*;

    async fn logged_in(server: &MockServer) -> SessionManager {
        mount_login(
            server,
            ResponseTemplate::new(200).set_body_json(json!({ "AuthorizationToken": "tok" })),
        )
        .await;
        let mut session = session(server);
        session.login().await.unwrap();
        session
    }

    #[tokio::test]
    async fn attaches_token_and_panel_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Panel/GetPanelStatus"))
            .and(query_param("panelId", "01 23"))
            .and(header("Authorization", "tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Status": 2 })))
            .expect(1)
            .mount(&server)
            .await;

        let session = logged_in(&server).await;
        let response = session
            .request(Resource::PanelStatus, Some("01 23"))
            .await
            .unwrap();

        assert!(response.is_success());
        assert!(response.body().contains("Status"));
    }

    #[tokio::test]
    async fn full_system_has_no_panel_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/panel/getFullSystem"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Panel": { "PanelId": "0123", "PanelDisplayName": "Cabin" },
                "Temperatures": [{ "Label": "Loft" }],
                "Locks": [{ "Serial": 555 }]
            })))
            .mount(&server)
            .await;

        let mut session = logged_in(&server).await;
        let panel = session.establish().await.unwrap();

        assert_eq!(panel.id(), "0123");
        assert_eq!(panel.display_name(), "Cabin");
        assert_eq!(panel.temperature_labels(), ["Loft"]);
        assert_eq!(panel.lock_serials(), ["555"]);
        assert_eq!(session.login_count(), 2);

        let requests = server.received_requests().await.unwrap();
        let full_system = requests
            .iter()
            .find(|r| r.url.path() == "/api/panel/getFullSystem")
            .unwrap();
        assert!(full_system.url.query().is_none());
    }

    #[tokio::test]
    async fn non_200_is_a_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Panel/GetLockStatus"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let session = logged_in(&server).await;
        let err = session
            .request(Resource::Locks, Some("0123"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Fetch(FetchError {
                resource: Resource::Locks,
                status: 401
            })
        ));
        // Re-login is left to the poll cycle.
        assert_eq!(session.login_count(), 1);
    }

    #[tokio::test]
    async fn fetch_decodes_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/panel/GetLogs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "User": "alice", "EventType": "armed", "Time": "2024-05-01T10:00:00" }
            ])))
            .mount(&server)
            .await;

        let session = logged_in(&server).await;
        let entries: Vec<sector_alarm::response::LogEntry> =
            session.fetch(Resource::Logs, Some("0123")).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(sector_alarm::response::last_changed_by(&entries), "alice");
    }
}
