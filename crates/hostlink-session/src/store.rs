//! The session store: the one piece of shared mutable state.
//!
//! Holds at most one [`Session`] and hands out clones of it. The first
//! caller that finds the slot empty runs the login; everyone arriving while
//! that login is in flight waits on the same lock and then receives the
//! session it produced.
//!
//! # Concurrency note
//!
//! The slot is a `tokio::sync::Mutex`, held across the login handshake.
//! That makes creation single-flight: at most one handshake at a time, and
//! no caller can observe a half-built session. Reuse only holds the lock
//! long enough to clone an `Arc`.

use hostlink_transport::ConnectionId;
use tokio::sync::Mutex;

use crate::{AuthError, Authenticator, Credentials, Session};

/// Owns the account's credentials and its (lazily created) session.
///
/// ## Lifecycle
///
/// ```text
/// acquire() ──(empty)──→ login() ──→ [Stored] ──→ acquire() returns it
///                           │            │
///                        (error)    invalidate(id)
///                           │            │
///                           ▼            ▼
///                        [Empty] ←───────┘
/// ```
pub struct SessionStore<A: Authenticator> {
    authenticator: A,
    credentials: Credentials,
    slot: Mutex<Option<Session<A::Connection>>>,
}

impl<A: Authenticator> SessionStore<A> {
    /// Creates an empty store. No network I/O happens until the first
    /// [`acquire`](Self::acquire).
    pub fn new(authenticator: A, credentials: Credentials) -> Self {
        Self {
            authenticator,
            credentials,
            slot: Mutex::new(None),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the stored session, logging in first if there is none.
    ///
    /// An existing session is returned as-is; there is no freshness check.
    ///
    /// # Errors
    /// Whatever the [`Authenticator`] reports. The slot stays empty, so
    /// the next call tries again.
    pub async fn acquire(&self) -> Result<Session<A::Connection>, AuthError> {
        let mut slot = self.slot.lock().await;

        if let Some(session) = slot.as_ref() {
            tracing::debug!(session_id = %session.id(), "reusing session");
            return Ok(session.clone());
        }

        let session = self.authenticator.login(&self.credentials).await?;
        tracing::info!(session_id = %session.id(), "session stored");
        *slot = Some(session.clone());
        Ok(session)
    }

    /// Returns the stored session without logging in.
    pub async fn current(&self) -> Option<Session<A::Connection>> {
        self.slot.lock().await.clone()
    }

    /// Drops the stored session if it is still the one with `id`.
    ///
    /// Matching on the id keeps a caller holding a stale session from
    /// evicting a newer one. Returns `true` if something was dropped.
    pub async fn invalidate(&self, id: ConnectionId) -> bool {
        let mut slot = self.slot.lock().await;
        match slot.as_ref() {
            Some(session) if session.id() == id => {
                *slot = None;
                tracing::info!(session_id = %id, "session invalidated");
                true
            }
            _ => false,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
