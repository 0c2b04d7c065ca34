//! Wire contract for the hosting site.
//!
//! This crate defines the "language" the site speaks, as far as we have
//! reverse-engineered it:
//!
//! - **Types** ([`ServerId`], [`LoginForm`], [`StatusReply`], ...) and the
//!   endpoint [`paths`].
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) for the JSON replies.
//! - **Scrape** ([`extract_token`], [`find_server_ids`], ...) for the two
//!   values that only exist in HTML.
//! - **Errors** ([`ProtocolError`]).
//!
//! # Architecture
//!
//! ```text
//! Transport (body text) → Protocol (typed replies) → Session / Client
//! ```

mod codec;
mod error;
mod scrape;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use scrape::{
    extract_server_id, extract_token, find_server_ids, is_login_page,
};
pub use types::{
    paths, ControlReply, LoginForm, LoginReply, LoginToken, PlayersReply,
    ServerId, StatusReply,
};
