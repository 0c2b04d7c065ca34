//! Login and session management for Hostlink.
//!
//! This crate owns the account's authenticated state:
//!
//! 1. **Authentication**: replaying the site's login ([`Authenticator`]
//!    trait, [`LoginAuthenticator`])
//! 2. **Session reuse**: logging in once and sharing the result
//!    ([`SessionStore`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Client (above)  ← asks for a session before every command
//!     ↕
//! Session Layer (this crate)  ← login handshake, single session slot
//!     ↕
//! Protocol + Transport (below)  ← token scraping, cookies, HTTP
//! ```

mod auth;
mod error;
mod session;
mod store;

pub use auth::{Authenticator, LoginAuthenticator};
pub use error::AuthError;
pub use hostlink_protocol::LoginToken;
pub use session::{Credentials, Session};
pub use store::SessionStore;
