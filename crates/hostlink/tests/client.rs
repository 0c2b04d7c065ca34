//! Integration tests for `ServerClient` against a mocked hosting site:
//! login, lookup by name, status, start/stop, and session reuse.

use std::sync::Arc;
use std::time::Duration;

use hostlink::{
    ControlAction, ControlError, Credentials, HostlinkError, LocateError, LoginAuthenticator,
    ServerClient, ServerId, SessionStore, StatusError, TransportError,
};
use hostlink_protocol::paths;
use hostlink_transport::mock::MockConnector;

// =========================================================================
// Mock site
// =========================================================================

const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html><head><script>
  var config = {"lang":"en","token":"Xk9pQ2aB"};
</script></head>
<body><form id="login-form"></form></body></html>"#;

const LISTING: &str = r#"<!DOCTYPE html>
<html><body><main class="servers">
  <div class="servercard" data-server="abc123" title="Survival">
    <span class="server-name">Survival</span>
  </div>
  <div class="servercard" data-server="xyz789" title="Creative &amp; Co">
    <span class="server-name">Creative &amp; Co</span>
  </div>
</main></body></html>"#;

const STATUS_ONLINE: &str = r#"{"id":"abc123","status":"online","players":{"online":3},"ip":"mc.example.com","port":25565}"#;

const STATUS_OFFLINE: &str = r#"{"id":"abc123","status":"offline","players":{"online":0},"ip":"mc.example.com","port":25565}"#;

/// A site where login works and the account owns "Survival" (abc123).
fn site() -> MockConnector {
    let mock = MockConnector::new();
    mock.respond(paths::LOGIN, LOGIN_PAGE);
    mock.respond(paths::LOGIN_SUBMIT, r#"{"success":true}"#);
    mock.respond(paths::SERVERS, LISTING);
    mock
}

fn client_named(
    mock: &MockConnector,
    server_name: &str,
) -> ServerClient<LoginAuthenticator<MockConnector>> {
    let store = SessionStore::new(
        LoginAuthenticator::new(mock.clone()),
        Credentials::new("alice", "hunter2", server_name),
    );
    ServerClient::new(store)
}

fn client(mock: &MockConnector) -> ServerClient<LoginAuthenticator<MockConnector>> {
    client_named(mock, "Survival")
}

fn survival() -> ServerId {
    ServerId::new("abc123")
}

// =========================================================================
// Locating the server
// =========================================================================

#[tokio::test]
async fn test_get_status_targets_server_found_by_name() {
    let mock = site();
    mock.respond(&paths::status(&survival()), STATUS_ONLINE);

    let status = client(&mock).get_status().await.expect("status");

    assert_eq!(status.id, survival());
    assert_eq!(mock.hits("/server/status/abc123.json"), 1);
}

#[tokio::test]
async fn test_get_status_entity_encoded_title_matches() {
    let mock = site();
    let creative = ServerId::new("xyz789");
    mock.respond(
        &paths::status(&creative),
        r#"{"id":"xyz789","status":"offline","players":{"online":0},"ip":"c.example.com","port":25566}"#,
    );

    let status = client_named(&mock, "Creative & Co")
        .get_status()
        .await
        .expect("status");

    assert_eq!(status.id, creative);
}

#[tokio::test]
async fn test_get_status_unknown_name_is_not_found() {
    let mock = site();

    let err = client_named(&mock, "Nonexistent")
        .get_status()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        HostlinkError::Locate(LocateError::NotFound(ref name)) if name == "Nonexistent"
    ));
    assert_eq!(mock.hits("/server/status/abc123.json"), 0);
}

#[tokio::test]
async fn test_start_server_ambiguous_name_sends_nothing() {
    let mock = site();
    mock.respond(
        paths::SERVERS,
        r#"<div data-server="one" title="Survival"></div>
           <div data-server="two" title="Survival"></div>"#,
    );

    let err = client(&mock).start_server().await.unwrap_err();

    assert!(matches!(
        err,
        HostlinkError::Locate(LocateError::Ambiguous { count: 2, .. })
    ));
    assert!(
        mock.requests()
            .iter()
            .all(|r| !r.path.starts_with("/server/start/"))
    );
}

#[tokio::test]
async fn test_get_status_no_servers_keeps_session() {
    let mock = site();
    mock.respond(
        paths::SERVERS,
        r#"<script>var config = {"token":"Xk9pQ2aB"};</script>
           <main class="servers"><p>Create your first server</p></main>"#,
    );
    let client = client(&mock);

    for _ in 0..2 {
        let err = client.get_status().await.unwrap_err();
        assert!(matches!(err, HostlinkError::Locate(LocateError::NotFound(_))));
    }

    assert!(client.store().current().await.is_some());
    assert_eq!(mock.hits(paths::LOGIN_SUBMIT), 1);
}

// =========================================================================
// Status
// =========================================================================

#[tokio::test]
async fn test_get_status_reports_state_players_and_address() {
    let mock = site();
    mock.respond(&paths::status(&survival()), STATUS_ONLINE);

    let status = client(&mock).get_status().await.expect("status");

    assert_eq!(status.state, "online");
    assert_eq!(status.online_players, 3);
    assert_eq!(status.address(), "mc.example.com:25565");
}

#[tokio::test]
async fn test_get_status_malformed_reply_is_status_error() {
    let mock = site();
    mock.respond(&paths::status(&survival()), r#"{"id":"abc123","status":"online"}"#);

    let err = client(&mock).get_status().await.unwrap_err();

    assert!(matches!(
        err,
        HostlinkError::Status(StatusError::MalformedResponse(_))
    ));
}

// =========================================================================
// Start / stop
// =========================================================================

#[tokio::test]
async fn test_start_server_success_true_is_accepted() {
    let mock = site();
    mock.respond(&paths::start(&survival()), r#"{"success":true}"#);

    let outcome = client(&mock).start_server().await.expect("start");

    assert_eq!(outcome.action, ControlAction::Start);
    assert!(outcome.accepted);
}

#[tokio::test]
async fn test_stop_server_success_false_is_not_accepted() {
    let mock = site();
    mock.respond(&paths::stop(&survival()), r#"{"success":false}"#);

    let outcome = client(&mock).stop_server().await.expect("stop");

    assert_eq!(outcome.action, ControlAction::Stop);
    assert!(!outcome.accepted);
}

#[tokio::test]
async fn test_start_server_connection_failure_is_control_error() {
    let mock = site();
    mock.fail(
        &paths::start(&survival()),
        TransportError::RequestFailed {
            url: "https://aternos.org/server/start/abc123.ajax".into(),
            message: "connection reset".into(),
        },
    );

    let err = client(&mock).start_server().await.unwrap_err();

    assert!(matches!(
        err,
        HostlinkError::Control(ControlError::Transport(_))
    ));
}

#[tokio::test]
async fn test_start_then_status_reflects_new_state() {
    let mock = site();
    mock.respond_sequence(
        &paths::status(&survival()),
        [STATUS_OFFLINE, STATUS_ONLINE],
    );
    mock.respond(&paths::start(&survival()), r#"{"success":true}"#);
    let client = client(&mock);

    let before = client.get_status().await.expect("status");
    client.start_server().await.expect("start");
    let after = client.get_status().await.expect("status");

    assert_eq!(before.state, "offline");
    assert_eq!(after.state, "online");
    assert_eq!(after.online_players, 3);
}

// =========================================================================
// Session reuse
// =========================================================================

#[tokio::test]
async fn test_commands_in_sequence_log_in_once() {
    let mock = site();
    mock.respond(&paths::status(&survival()), STATUS_ONLINE);
    mock.respond(&paths::start(&survival()), r#"{"success":true}"#);
    mock.respond(&paths::stop(&survival()), r#"{"success":true}"#);
    let client = client(&mock);

    client.get_status().await.expect("status");
    client.start_server().await.expect("start");
    client.stop_server().await.expect("stop");

    assert_eq!(mock.hits(paths::LOGIN_SUBMIT), 1);
    assert_eq!(mock.connections(), 1);
    // The id is looked up afresh for every command.
    assert_eq!(mock.hits(paths::SERVERS), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_commands_share_one_login() {
    let mock = site().with_latency(Duration::from_millis(20));
    mock.respond(&paths::status(&survival()), STATUS_ONLINE);
    let client = Arc::new(client(&mock));

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.get_status().await })
        })
        .collect();
    let results = futures_util::future::join_all(tasks).await;

    for result in results {
        let status = result.expect("task should not panic").expect("status");
        assert_eq!(status.online_players, 3);
    }
    assert_eq!(mock.hits(paths::LOGIN_SUBMIT), 1, "exactly one handshake");
    assert_eq!(mock.connections(), 1);
}

#[tokio::test]
async fn test_expired_session_logs_in_again_on_next_command() {
    let mock = site();
    mock.respond_sequence(paths::SERVERS, [LOGIN_PAGE, LISTING]);
    mock.respond(&paths::status(&survival()), STATUS_ONLINE);
    let client = client(&mock);

    let err = client.get_status().await.unwrap_err();
    assert!(matches!(
        err,
        HostlinkError::Locate(LocateError::SessionExpired)
    ));
    assert!(client.store().current().await.is_none());

    let status = client.get_status().await.expect("fresh login works");

    assert_eq!(status.state, "online");
    assert_eq!(mock.hits(paths::LOGIN_SUBMIT), 2);
    assert_eq!(mock.connections(), 2);
}

#[tokio::test]
async fn test_rejected_login_is_auth_error_and_retried_next_time() {
    let mock = site();
    mock.respond_sequence(
        paths::LOGIN_SUBMIT,
        [r#"{"error":"Wrong password"}"#, r#"{"success":true}"#],
    );
    mock.respond(&paths::status(&survival()), STATUS_ONLINE);
    let client = client(&mock);

    let err = client.get_status().await.unwrap_err();
    assert!(matches!(err, HostlinkError::Auth(_)));
    assert!(err.to_string().contains("Wrong password"));

    client.get_status().await.expect("second login succeeds");
    assert_eq!(mock.hits(paths::LOGIN_SUBMIT), 2);
}
