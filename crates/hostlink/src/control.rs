//! Control operations: start and stop.
//!
//! The site answers both with `{"success": bool}`. A `false` is a normal
//! outcome (already running, queue full, ...) and is returned as
//! [`ControlOutcome::accepted`] `== false`. Only "could not reach the
//! site" and "could not read its answer" are errors.

use std::fmt;

use hostlink_protocol::{paths, Codec, ControlReply, JsonCodec, ServerId};
use hostlink_session::Session;
use hostlink_transport::HttpConnection;
use serde::Serialize;

use crate::ControlError;

/// Which control request to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlAction {
    Start,
    Stop,
}

impl ControlAction {
    fn path(self, id: &ServerId) -> String {
        match self {
            ControlAction::Start => paths::start(id),
            ControlAction::Stop => paths::stop(id),
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlAction::Start => f.write_str("start"),
            ControlAction::Stop => f.write_str("stop"),
        }
    }
}

/// The site's answer to a control request.
///
/// `accepted` means the site acknowledged the request, not that the
/// server has finished starting or stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlOutcome {
    pub action: ControlAction,
    pub accepted: bool,
}

/// Asks the site to start server `id`.
pub async fn start<C: HttpConnection>(
    session: &Session<C>,
    id: &ServerId,
) -> Result<ControlOutcome, ControlError> {
    send(session, id, ControlAction::Start).await
}

/// Asks the site to stop server `id`.
pub async fn stop<C: HttpConnection>(
    session: &Session<C>,
    id: &ServerId,
) -> Result<ControlOutcome, ControlError> {
    send(session, id, ControlAction::Stop).await
}

/// Sends `action` for server `id` and reports whether the site took it.
///
/// # Errors
/// - [`ControlError::Transport`]: the endpoint could not be reached
/// - [`ControlError::InvalidReply`]: the answer was not a JSON object
pub async fn send<C: HttpConnection>(
    session: &Session<C>,
    id: &ServerId,
    action: ControlAction,
) -> Result<ControlOutcome, ControlError> {
    let body = session.connection().get(&action.path(id)).await?;
    let reply: ControlReply = JsonCodec
        .decode(body.as_bytes())
        .map_err(ControlError::InvalidReply)?;

    let outcome = ControlOutcome {
        action,
        accepted: reply.success,
    };
    tracing::info!(
        server_id = %id,
        %action,
        accepted = outcome.accepted,
        "control request answered"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use hostlink_transport::mock::MockConnector;
    use hostlink_transport::{Connector, TransportError};

    use super::*;

    fn id() -> ServerId {
        ServerId::new("abc123")
    }

    fn session_with(mock: &MockConnector) -> Session<hostlink_transport::mock::MockConnection> {
        Session::new(mock.connect().unwrap())
    }

    #[tokio::test]
    async fn test_start_success_true_is_accepted() {
        let mock = MockConnector::new();
        mock.respond(&paths::start(&id()), r#"{"success":true}"#);

        let outcome = start(&session_with(&mock), &id()).await.unwrap();

        assert_eq!(
            outcome,
            ControlOutcome {
                action: ControlAction::Start,
                accepted: true
            }
        );
    }

    #[tokio::test]
    async fn test_start_success_false_is_not_an_error() {
        let mock = MockConnector::new();
        mock.respond(&paths::start(&id()), r#"{"success":false}"#);

        let outcome = start(&session_with(&mock), &id()).await.unwrap();

        assert!(!outcome.accepted);
    }

    #[tokio::test]
    async fn test_stop_hits_stop_endpoint() {
        let mock = MockConnector::new();
        mock.respond(&paths::stop(&id()), r#"{"success":true}"#);

        let outcome = stop(&session_with(&mock), &id()).await.unwrap();

        assert_eq!(outcome.action, ControlAction::Stop);
        assert!(outcome.accepted);
        assert_eq!(mock.hits("/server/stop/abc123.ajax"), 1);
        assert_eq!(mock.hits("/server/start/abc123.ajax"), 0);
    }

    #[tokio::test]
    async fn test_start_connection_failure_is_transport_error() {
        let mock = MockConnector::new();
        mock.fail(
            &paths::start(&id()),
            TransportError::RequestFailed {
                url: "/server/start/abc123.ajax".into(),
                message: "connection refused".into(),
            },
        );

        let err = start(&session_with(&mock), &id()).await.unwrap_err();

        assert!(matches!(err, ControlError::Transport(_)));
    }

    #[tokio::test]
    async fn test_start_html_reply_is_invalid_reply() {
        let mock = MockConnector::new();
        mock.respond(&paths::start(&id()), "<html>error</html>");

        let err = start(&session_with(&mock), &id()).await.unwrap_err();

        assert!(matches!(err, ControlError::InvalidReply(_)));
    }

    #[test]
    fn test_control_action_display() {
        assert_eq!(ControlAction::Start.to_string(), "start");
        assert_eq!(ControlAction::Stop.to_string(), "stop");
    }
}
