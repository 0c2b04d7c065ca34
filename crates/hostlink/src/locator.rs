//! Server locator: display name → [`ServerId`].

use hostlink_protocol::{find_server_ids, is_login_page, paths, ServerId};
use hostlink_session::Session;
use hostlink_transport::HttpConnection;

use crate::LocateError;

/// Fetches the account's server list and returns the id of the server
/// titled `display_name`.
///
/// The same id listed twice (e.g. a card and a menu entry) counts once.
///
/// # Errors
/// - [`LocateError::NotFound`]: no element carries that title
/// - [`LocateError::Ambiguous`]: several different servers do
/// - [`LocateError::SessionExpired`]: the site served its login page
/// - [`LocateError::Transport`]: the listing could not be fetched
pub async fn locate_server<C: HttpConnection>(
    session: &Session<C>,
    display_name: &str,
) -> Result<ServerId, LocateError> {
    let page = session.connection().get(paths::SERVERS).await?;

    let mut ids: Vec<ServerId> = Vec::new();
    for id in find_server_ids(&page, display_name) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    match ids.len() {
        0 if is_login_page(&page) => Err(LocateError::SessionExpired),
        0 => Err(LocateError::NotFound(display_name.to_string())),
        1 => {
            let id = ids.swap_remove(0);
            tracing::debug!(server_id = %id, display_name, "server located");
            Ok(id)
        }
        count => Err(LocateError::Ambiguous {
            name: display_name.to_string(),
            count,
        }),
    }
}
