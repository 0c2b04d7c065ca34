//! # Hostlink
//!
//! Remote control for a game-server hosting site that has no public API.
//!
//! Hostlink replays what a browser does: it logs in with the account's
//! credentials, keeps the resulting cookie session, finds the configured
//! server by its display name, and reads its status or asks the site to
//! start or stop it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hostlink::prelude::*;
//!
//! # async fn run() -> Result<(), HostlinkError> {
//! let config = ClientConfig::from_env()?;
//! let client = ServerClient::from_config(&config);
//!
//! let status = client.get_status().await?;
//! println!("{} is {} at {}", status.id, status.state, status.address());
//!
//! if status.state == "offline" {
//!     let outcome = client.start_server().await?;
//!     println!("start accepted: {}", outcome.accepted);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Layers
//!
//! ```text
//! ServerClient (this crate)      ← locate, status, start/stop
//!     ↕
//! hostlink-session               ← login handshake, shared session
//!     ↕
//! hostlink-protocol              ← token + server-id scraping, JSON replies
//!     ↕
//! hostlink-transport             ← cookie-keeping HTTP connections
//! ```

mod client;
mod config;
mod control;
mod error;
mod locator;
mod status;

pub use client::ServerClient;
pub use config::{env, ClientConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
pub use control::{send as send_control, start, stop, ControlAction, ControlOutcome};
pub use error::{ControlError, HostlinkError, LocateError, StatusError};
pub use locator::locate_server;
pub use status::{fetch_status, ServerStatus};

pub use hostlink_protocol::{Codec, JsonCodec, ProtocolError, ServerId};
pub use hostlink_session::{
    AuthError, Authenticator, Credentials, LoginAuthenticator, Session, SessionStore,
};
pub use hostlink_transport::{
    ConnectionId, Connector, HttpConnection, ReqwestConnector, TransportError,
};

/// Everything a front-end usually needs.
pub mod prelude {
    pub use crate::{
        ClientConfig, ControlAction, ControlOutcome, Credentials, HostlinkError, ServerClient,
        ServerStatus,
    };
}
