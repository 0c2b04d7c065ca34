//! Session types: the data structures behind one logged-in account.
//!
//! - WHO is logged in ([`Credentials`])
//! - WHAT carries the login ([`Session`]: a connection whose cookie jar
//!   holds the site's auth cookies)

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use hostlink_transport::{ConnectionId, HttpConnection};

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// The account to log in with and the server to control.
///
/// Immutable once built. `Debug` prints the username and server name but
/// never the password, so credentials can appear in tracing fields.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
    server_name: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        server_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            server_name: server_name.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Display name of the managed server, exactly as the site shows it.
    pub fn server_name(&self) -> &str {
        &self.server_name
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("server_name", &self.server_name)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// An authenticated connection to the site.
///
/// Cloning is cheap (`Arc`); every clone shares the same connection and
/// cookie jar. The session id is the id of that connection, so two
/// handles with equal ids are the same session.
///
/// There is no expiry timer. A session stays valid until the site says
/// otherwise, which we only learn from the next request.
pub struct Session<C> {
    inner: Arc<SessionInner<C>>,
}

struct SessionInner<C> {
    connection: C,
    established_at: Instant,
}

impl<C: HttpConnection> Session<C> {
    /// Wraps a connection that has just completed a login.
    pub fn new(connection: C) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                connection,
                established_at: Instant::now(),
            }),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.inner.connection.id()
    }

    /// The connection carrying the auth cookies.
    pub fn connection(&self) -> &C {
        &self.inner.connection
    }

    /// How long ago the login completed.
    pub fn age(&self) -> Duration {
        self.inner.established_at.elapsed()
    }
}

impl<C> Clone for Session<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: HttpConnection> fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id())
            .field("age", &self.age())
            .finish()
    }
}
