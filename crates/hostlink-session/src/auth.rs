//! Authentication: turning credentials into a [`Session`].
//!
//! The [`Authenticator`] trait is the seam. [`LoginAuthenticator`] is the
//! real implementation that replays the site's browser login; tests swap
//! in their own to count or fail logins without any HTTP.

use std::future::Future;

use hostlink_protocol::{
    extract_token, paths, Codec, JsonCodec, LoginForm, LoginReply,
};
use hostlink_transport::{Connector, HttpConnection};

use crate::{AuthError, Credentials, Session};

/// Logs an account in and returns the resulting session.
///
/// # Trait bounds
///
/// - `Send + Sync` → the authenticator is shared by every command task.
/// - `'static` → it lives as long as the [`SessionStore`](crate::SessionStore)
///   that owns it.
pub trait Authenticator: Send + Sync + 'static {
    /// The connection type sessions are built on.
    type Connection: HttpConnection;

    /// Runs one complete login attempt. No retries.
    ///
    /// # Returns
    /// - `Ok(Session)`: the site accepted the login
    /// - `Err(AuthError)`: the token was missing, the site said no, or
    ///   the network failed
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Session<Self::Connection>, AuthError>> + Send;
}

/// The site's browser login, replayed over HTTP.
///
/// ```text
/// GET  /login        → scrape "token":"…"
/// POST /login.ajax   → user, password, headless=true, action=login, token
///                    → JSON with a "success" key means we're in
/// ```
///
/// Every attempt opens a fresh connection, so cookies from a failed
/// attempt never reach the next one.
pub struct LoginAuthenticator<C: Connector> {
    connector: C,
    codec: JsonCodec,
}

impl<C: Connector> LoginAuthenticator<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            codec: JsonCodec,
        }
    }
}

impl<C: Connector> Authenticator for LoginAuthenticator<C> {
    type Connection = C::Connection;

    async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<Session<C::Connection>, AuthError> {
        let conn = self.connector.connect()?;
        let conn_id = conn.id();
        tracing::debug!(%conn_id, user = credentials.username(), "starting login handshake");

        // --- Step 1: token ---
        let page = conn.get(paths::LOGIN).await?;
        let token = extract_token(&page).ok_or(AuthError::TokenNotFound)?;

        // --- Step 2: submit (consumes the token) ---
        let form = LoginForm::new(
            credentials.username(),
            credentials.password(),
            token,
        );
        let body = conn.post_form(paths::LOGIN_SUBMIT, &form.fields()).await?;

        // --- Step 3: verify ---
        let reply: LoginReply = self
            .codec
            .decode(body.as_bytes())
            .map_err(|e| AuthError::LoginRejected(e.to_string()))?;
        if !reply.is_accepted() {
            let reason = reply.error().unwrap_or("no success marker in reply");
            tracing::warn!(%conn_id, user = credentials.username(), reason, "login rejected");
            return Err(AuthError::LoginRejected(reason.to_string()));
        }

        tracing::info!(%conn_id, user = credentials.username(), "logged in");
        Ok(Session::new(conn))
    }
}
