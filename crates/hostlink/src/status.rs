//! Status fetcher.

use hostlink_protocol::{paths, Codec, JsonCodec, ServerId, StatusReply};
use hostlink_session::Session;
use hostlink_transport::HttpConnection;
use serde::Serialize;

use crate::StatusError;

/// A snapshot of one server, as the site reported it.
///
/// `state` is the site's own label (`"online"`, `"offline"`,
/// `"starting"`, ...) passed through verbatim; the client never
/// interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerStatus {
    pub id: ServerId,
    pub state: String,
    pub online_players: u32,
    pub host: String,
    pub port: u16,
}

impl ServerStatus {
    /// `host:port`, ready for a game client's connect dialog.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl From<StatusReply> for ServerStatus {
    fn from(reply: StatusReply) -> Self {
        Self {
            id: reply.id,
            state: reply.status,
            online_players: reply.players.online,
            host: reply.ip,
            port: reply.port,
        }
    }
}

/// Reads the current status of server `id`.
///
/// # Errors
/// - [`StatusError::MalformedResponse`]: not JSON, or a field is
///   missing or mistyped
/// - [`StatusError::Transport`]: the endpoint could not be reached
pub async fn fetch_status<C: HttpConnection>(
    session: &Session<C>,
    id: &ServerId,
) -> Result<ServerStatus, StatusError> {
    let body = session.connection().get(&paths::status(id)).await?;
    let reply: StatusReply = JsonCodec
        .decode(body.as_bytes())
        .map_err(StatusError::MalformedResponse)?;

    let status = ServerStatus::from(reply);
    tracing::debug!(
        server_id = %status.id,
        state = %status.state,
        online_players = status.online_players,
        "status fetched"
    );
    Ok(status)
}
