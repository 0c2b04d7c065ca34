//! Narrow text matchers over the site's HTML.
//!
//! The site has no API, so two values have to be lifted out of rendered
//! markup: the login token and the server id. A full HTML parser would be
//! overkill for two attributes; instead each matcher is a small anchored
//! regex, kept here so a markup change on the site touches one file.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::{LoginToken, ServerId};

/// `"token":"<value>"`, as embedded in the login page's inline script.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""token"\s*:\s*"([^"]+)""#).expect("token regex is valid")
});

/// One start tag carrying `data-server="<id>"`. The tag body is bounded by
/// `[^<>]`, so every other attribute checked against a match belongs to
/// the same element.
static SERVER_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<[^<>]*?\sdata-server="([^"]*)"[^<>]*>"#)
        .expect("server tag regex is valid")
});

/// A `title="..."` attribute inside a single tag.
static TITLE_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\stitle="([^"]*)""#).expect("title regex is valid")
});

/// Markup only the login form carries: its submission endpoint, a
/// password input, or a `<form>` whose id or class names it a login form.
static LOGIN_FORM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)login\.ajax|<input[^<>]*\stype="password"|<form[^<>]*\s(?:id|class)="[^"]*login"#,
    )
    .expect("login form regex is valid")
});

/// A named or numeric character reference.
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|(amp|lt|gt|quot|apos));")
        .expect("entity regex is valid")
});

/// Extracts the login token from the login page body.
///
/// Returns `None` when the page carries no token marker.
pub fn extract_token(body: &str) -> Option<LoginToken> {
    TOKEN_RE
        .captures(body)
        .map(|caps| LoginToken::new(&caps[1]))
}

/// Returns the id of every server element whose `title` equals `title`,
/// in document order.
///
/// The comparison is exact and case-sensitive against the attribute value
/// after decoding the basic character references (`&amp;` and friends).
pub fn find_server_ids(body: &str, title: &str) -> Vec<ServerId> {
    SERVER_TAG_RE
        .captures_iter(body)
        .filter(|caps| {
            TITLE_ATTR_RE
                .captures(&caps[0])
                .is_some_and(|t| decode_entities(&t[1]) == title)
        })
        .map(|caps| ServerId::new(&caps[1]))
        .collect()
}

/// Returns the first server id whose element is titled `title`.
pub fn extract_server_id(body: &str, title: &str) -> Option<ServerId> {
    find_server_ids(body, title).into_iter().next()
}

/// `true` when `body` is the login page rather than an authenticated page:
/// it carries a login token and the login form, and no server elements.
///
/// The site answers an expired session by redirecting to the login form,
/// which still comes back as a 200. Authenticated pages embed a token too,
/// so the token alone says nothing.
pub fn is_login_page(body: &str) -> bool {
    TOKEN_RE.is_match(body)
        && LOGIN_FORM_RE.is_match(body)
        && !SERVER_TAG_RE.is_match(body)
}

/// Decodes the named references HTML escapes attributes with, plus every
/// decimal (`&#39;`) and hex (`&#x27;`) reference. Anything else, including
/// references to invalid code points, is left as written.
fn decode_entities(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }
    // One pass, so "&amp;lt;" decodes to "&lt;" and not "<".
    ENTITY_RE.replace_all(value, |caps: &regex::Captures<'_>| {
        let decoded = if let Some(dec) = caps.get(1) {
            dec.as_str().parse().ok().and_then(char::from_u32)
        } else if let Some(hex) = caps.get(2) {
            u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
        } else {
            match &caps[3] {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                _ => Some('\''),
            }
        };
        decoded.map_or_else(|| caps[0].to_string(), String::from)
    })
}
