//! HTTP transport abstraction layer for Hostlink.
//!
//! Provides the [`Connector`] and [`HttpConnection`] traits that abstract
//! over how requests reach the hosting site. A connector opens
//! connections; each connection owns its own cookie jar, so whatever the
//! site stores in cookies during login stays with that one connection.
//!
//! # Feature Flags
//!
//! - `reqwest` (default): real HTTP(S) via `reqwest` with a cookie store
//! - `mock`: an in-memory [`mock::MockConnector`] for tests

mod error;
#[cfg(feature = "mock")]
pub mod mock;
#[cfg(feature = "reqwest")]
mod reqwest_http;

pub use error::TransportError;
#[cfg(feature = "reqwest")]
pub use reqwest_http::{ReqwestConnection, ReqwestConnector};

use std::fmt;
use std::future::Future;

/// Opaque identifier for a connection.
///
/// Every connection opened by a [`Connector`] gets a fresh id, so two
/// handles with the same id share the same cookie jar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Opens new connections to the hosting site.
///
/// Opening a connection does no network I/O; it only prepares a client
/// with an empty cookie jar.
pub trait Connector: Send + Sync + 'static {
    /// The connection type produced by this connector.
    type Connection: HttpConnection;

    /// Creates a new connection with no cookies.
    fn connect(&self) -> Result<Self::Connection, TransportError>;
}

/// A single cookie-carrying connection to the hosting site.
///
/// Paths are relative to the connector's base URL (`/login`,
/// `/servers`, ...). Both methods return the response body as text;
/// a non-2xx status is an error.
pub trait HttpConnection: Send + Sync + 'static {
    /// Issues a `GET` for `path`.
    fn get(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;

    /// Issues a `POST` to `path` with an
    /// `application/x-www-form-urlencoded` body.
    fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> impl Future<Output = Result<String, TransportError>> + Send;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
