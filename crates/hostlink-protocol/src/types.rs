//! Wire types for the hosting site's undocumented endpoints.
//!
//! Nothing here is negotiable: paths, form field names and JSON keys must
//! match what the site's own browser front-end sends and receives,
//! byte for byte.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Request paths, relative to the site's base URL.
pub mod paths {
    use super::ServerId;

    /// Login page; carries the anti-forgery token in its markup.
    pub const LOGIN: &str = "/login";

    /// Login form submission.
    pub const LOGIN_SUBMIT: &str = "/login.ajax";

    /// The account's server list.
    pub const SERVERS: &str = "/servers";

    /// Structured status of one server.
    pub fn status(id: &ServerId) -> String {
        format!("/server/status/{id}.json")
    }

    /// Start request for one server.
    pub fn start(id: &ServerId) -> String {
        format!("/server/start/{id}.ajax")
    }

    /// Stop request for one server.
    pub fn stop(id: &ServerId) -> String {
        format!("/server/stop/{id}.ajax")
    }
}

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// The site's internal identifier for one managed server.
///
/// Opaque to us: it is read out of the server list markup and pasted back
/// into request paths. `#[serde(transparent)]` keeps it a plain string
/// in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerId(String);

impl ServerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The single-use anti-forgery token scraped from the login page.
///
/// Not `Clone`: [`LoginForm::new`] takes it by value, so a token backs
/// exactly one submission. `Debug` hides the value.
#[derive(PartialEq, Eq)]
pub struct LoginToken(String);

impl LoginToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LoginToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LoginToken").field(&"<redacted>").finish()
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// The form posted to [`paths::LOGIN_SUBMIT`].
///
/// `headless=true` and `action=login` are fixed literals the site expects
/// from a non-interactive login.
pub struct LoginForm<'a> {
    user: &'a str,
    password: &'a str,
    token: LoginToken,
}

impl<'a> LoginForm<'a> {
    /// Builds the form, consuming the token.
    pub fn new(user: &'a str, password: &'a str, token: LoginToken) -> Self {
        Self {
            user,
            password,
            token,
        }
    }

    /// Returns the form fields in submission order.
    pub fn fields(&self) -> [(&str, &str); 5] {
        [
            ("user", self.user),
            ("password", self.password),
            ("headless", "true"),
            ("action", "login"),
            ("token", self.token.as_str()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

/// Reply to a login submission.
///
/// The site marks an accepted login by including a `success` key at all;
/// its value is not inspected.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct LoginReply(serde_json::Map<String, serde_json::Value>);

impl LoginReply {
    /// `true` when the reply carries a `success` key.
    pub fn is_accepted(&self) -> bool {
        self.0.contains_key("success")
    }

    /// The site's own error text, if it sent one.
    pub fn error(&self) -> Option<&str> {
        self.0.get("error").and_then(serde_json::Value::as_str)
    }
}

/// Reply from [`paths::status`].
///
/// Unknown keys are ignored; the five read here are all required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusReply {
    pub id: ServerId,
    pub status: String,
    pub players: PlayersReply,
    pub ip: String,
    pub port: u16,
}

/// The `players` object nested in a [`StatusReply`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayersReply {
    pub online: u32,
}

/// Reply from [`paths::start`] and [`paths::stop`].
///
/// A missing `success` key reads as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ControlReply {
    #[serde(default)]
    pub success: bool,
}
