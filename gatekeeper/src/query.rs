//! Query-string helpers for redirect intents.
//!
//! Keys carried across the auth flow:
//! - `redirectedFrom`: original path, attached by the server guard.
//! - `error`: failure marker on the login redirect (`session_error`).
//! - `redirect_to`: destination read by the completion handler.
//! - `email`: address echoed by the check-email page.

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;

pub const REDIRECTED_FROM: &str = "redirectedFrom";
pub const ERROR: &str = "error";
pub const REDIRECT_TO: &str = "redirect_to";
pub const EMAIL: &str = "email";

/// Marker attached to the login redirect when the session lookup failed.
pub const SESSION_ERROR: &str = "session_error";
/// Marker attached to the login redirect when the code exchange failed.
pub const CALLBACK_ERROR: &str = "callback_error";

/// Encode pairs as `k=v&k=v` with percent-encoded components.
#[must_use]
pub fn encode_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Percent-decode a request path. Invalid sequences leave the path as-is.
#[must_use]
pub fn decode_path(path: &str) -> String {
    urlencoding::decode(path).map_or_else(|_| path.to_owned(), std::borrow::Cow::into_owned)
}

/// Same-site destination from an untrusted `redirect_to`-style value.
///
/// Only absolute local paths are honored; empty values, protocol-relative
/// `//host` forms, backslashes and full URLs fall back to `fallback`.
/// Browsers strip tab, CR and LF from URLs, so `/\t/host` would load as
/// `//host`; any control character rejects the value.
#[must_use]
pub fn safe_destination(raw: Option<&str>, fallback: &str) -> String {
    match raw.map(str::trim) {
        Some(path) if is_local_path(path) => path.to_owned(),
        _ => fallback.to_owned(),
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}
