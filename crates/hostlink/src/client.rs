//! The client front-ends talk to.
//!
//! Every command follows the same path:
//!
//! ```text
//! acquire session ──→ locate server by name ──→ status / start / stop
//!        │                     │
//!   (log in once)      (login page served?)
//!                              │
//!                   drop session, report SessionExpired
//! ```
//!
//! The server id is looked up on every command. Renaming or recreating a
//! server on the site is picked up without restarting the client.

use hostlink_protocol::ServerId;
use hostlink_session::{Authenticator, LoginAuthenticator, Session, SessionStore};
use hostlink_transport::ReqwestConnector;

use crate::config::ClientConfig;
use crate::control::{self, ControlAction, ControlOutcome};
use crate::locator::locate_server;
use crate::status::{fetch_status, ServerStatus};
use crate::{HostlinkError, LocateError};

/// Controls the one server named in the account's credentials.
///
/// Share it behind an `Arc`; every method takes `&self` and concurrent
/// commands reuse a single login.
pub struct ServerClient<A: Authenticator> {
    store: SessionStore<A>,
}

impl ServerClient<LoginAuthenticator<ReqwestConnector>> {
    /// Builds a client that talks to the real site over HTTP.
    pub fn from_config(config: &ClientConfig) -> Self {
        let authenticator = LoginAuthenticator::new(config.connector());
        Self::new(SessionStore::new(authenticator, config.credentials.clone()))
    }
}

impl<A: Authenticator> ServerClient<A> {
    pub fn new(store: SessionStore<A>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SessionStore<A> {
        &self.store
    }

    /// Name of the server this client controls.
    pub fn server_name(&self) -> &str {
        self.store.credentials().server_name()
    }

    /// Reads the server's current status.
    pub async fn get_status(&self) -> Result<ServerStatus, HostlinkError> {
        let (session, id) = self.resolve().await?;
        Ok(fetch_status(&session, &id).await?)
    }

    /// Asks the site to start the server.
    pub async fn start_server(&self) -> Result<ControlOutcome, HostlinkError> {
        self.control(ControlAction::Start).await
    }

    /// Asks the site to stop the server.
    pub async fn stop_server(&self) -> Result<ControlOutcome, HostlinkError> {
        self.control(ControlAction::Stop).await
    }

    async fn control(&self, action: ControlAction) -> Result<ControlOutcome, HostlinkError> {
        let (session, id) = self.resolve().await?;
        Ok(control::send(&session, &id, action).await?)
    }

    /// Session plus the id of the configured server.
    ///
    /// A login page in place of the server list means the site forgot us.
    /// The session is dropped so the next command logs in again; this
    /// command still fails.
    async fn resolve(&self) -> Result<(Session<A::Connection>, ServerId), HostlinkError> {
        let session = self.store.acquire().await?;

        match locate_server(&session, self.server_name()).await {
            Ok(id) => Ok((session, id)),
            Err(LocateError::SessionExpired) => {
                tracing::warn!(session_id = %session.id(), "session expired");
                self.store.invalidate(session.id()).await;
                Err(LocateError::SessionExpired.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}
