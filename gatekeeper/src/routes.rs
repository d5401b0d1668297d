//! Static path classification.
//!
//! DESIGN
//! ======
//! The route space is split into three disjoint classes. Matching is
//! segment-aware prefix matching: `/login` covers `/login` and
//! `/login/anything` but not `/loginx`. The root entry `/` only covers `/`
//! itself, otherwise every path would be public.

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

/// Sign-in page; target of every unauthenticated redirect.
pub const LOGIN_PATH: &str = "/login";
/// Landing page for visitors who already hold a session.
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Fallback destination after a completed sign-in.
pub const HOME_PATH: &str = "/";

/// Pages shown only to anonymous visitors.
pub const AUTH_ONLY_PATHS: &[&str] = &["/login", "/signup", "/forgot-password"];

/// Paths reachable without a session. Auth-only paths are a subset.
pub const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/login",
    "/signup",
    "/forgot-password",
    "/auth/callback",
    "/check-email",
    "/api/auth/callback",
    "/_next",
    "/favicon.ico",
    // Compiled WASM/CSS bundle and the JSON auth endpoints answer anonymous
    // callers on their own.
    "/pkg",
    "/api/auth/session",
    "/api/auth/login",
    "/api/auth/signup",
    "/api/auth/recover",
    "/api/auth/logout",
    "/healthz",
];

/// Access class of a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    /// Reachable without a session; no lookup is performed.
    Public,
    /// Public, but visitors with a session are sent to the dashboard.
    AuthOnly,
    /// Requires a session.
    Protected,
}

/// Classify a request path.
///
/// Auth-only entries are consulted before the general public list, so the
/// first match wins. Any query string or fragment is ignored.
#[must_use]
pub fn classify(path: &str) -> RouteClass {
    let path = normalize(path);
    if AUTH_ONLY_PATHS.iter().any(|prefix| matches_prefix(path, prefix)) {
        return RouteClass::AuthOnly;
    }
    if PUBLIC_PATHS.iter().any(|prefix| matches_prefix(path, prefix)) {
        return RouteClass::Public;
    }
    RouteClass::Protected
}

/// `true` when `path` equals `prefix` or continues it with a `/` segment.
pub(crate) fn matches_prefix(path: &str, prefix: &str) -> bool {
    if prefix == "/" {
        return path == "/";
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    if path.is_empty() { "/" } else { path }
}
