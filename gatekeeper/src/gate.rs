//! Server route guard decision.
//!
//! ARCHITECTURE
//! ============
//! `decide` runs once per navigation, before the page renders. It classifies
//! the path, consults the provider only when the class needs it, and always
//! resolves to pass-through or a redirect. Provider failures are folded into
//! a [`Denial`] rather than propagated.
//!
//! TRADE-OFFS
//! ==========
//! A provider outage and a missing session currently produce the same login
//! redirect (fail closed). The two stay separate [`Denial`] variants so that
//! policy lives in [`login_redirect`] alone.

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;

use crate::provider::{CookieOptions, CookieSessionProvider, CookieStore, check_session_with_cookies};
use crate::query::{self, ERROR, REDIRECTED_FROM, SESSION_ERROR};
use crate::routes::{DASHBOARD_PATH, LOGIN_PATH, RouteClass, classify};
use crate::session::{SessionCheck, has_session};

/// A redirect destination plus its query parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectTarget {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RedirectTarget {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), query: Vec::new() }
    }

    #[must_use]
    pub fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_owned(), value.into()));
        self
    }

    /// Render as a `Location` header value.
    #[must_use]
    pub fn to_location(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, query::encode_query(&self.query))
        }
    }
}

/// Verdict for one navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    PassThrough,
    Redirect(RedirectTarget),
}

/// Why a request was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Denial {
    /// No session exists; the expected anonymous case.
    NoSession,
    /// The provider lookup itself failed.
    SessionCheckFailed,
}

/// Login redirect for a refused request to `requested_path`.
#[must_use]
pub fn login_redirect(denial: Denial, requested_path: &str) -> RedirectTarget {
    match denial {
        Denial::NoSession => RedirectTarget::new(LOGIN_PATH).with_param(REDIRECTED_FROM, requested_path),
        Denial::SessionCheckFailed => RedirectTarget::new(LOGIN_PATH).with_param(ERROR, SESSION_ERROR),
    }
}

/// Cookie store that remembers whether the lookup wrote anything.
struct WriteTracking<'a> {
    inner: &'a mut dyn CookieStore,
    wrote: bool,
}

impl CookieStore for WriteTracking<'_> {
    fn get(&self, name: &str) -> Option<String> {
        self.inner.get(name)
    }

    fn set(&mut self, name: &str, value: String, options: CookieOptions) {
        self.wrote = true;
        self.inner.set(name, value, options);
    }

    fn remove(&mut self, name: &str) {
        self.wrote = true;
        self.inner.remove(name);
    }
}

/// Decide whether the navigation to `path` may render.
///
/// `path` is the raw (percent-encoded) request path. Public pages pass
/// without touching the provider. Cookie writes made by the provider stay in
/// `cookies` for the caller to attach to the response.
///
/// A session is refreshed at most once per navigation: when the lookup
/// already rotated the cookie, the follow-up refresh is skipped.
pub async fn decide<P>(path: &str, provider: &P, cookies: &mut dyn CookieStore) -> GateDecision
where
    P: CookieSessionProvider + ?Sized,
{
    let class = classify(path);
    if class == RouteClass::Public {
        return GateDecision::PassThrough;
    }

    let requested = query::decode_path(path);
    let mut tracked = WriteTracking { inner: &mut *cookies, wrote: false };
    let check = check_session_with_cookies(provider, &mut tracked).await;
    let rotated = tracked.wrote;

    if has_session(&check) {
        if class == RouteClass::AuthOnly {
            return GateDecision::Redirect(RedirectTarget::new(DASHBOARD_PATH));
        }
        if rotated {
            tracing::debug!(path = %requested, "session rotated during lookup");
        } else if let Err(e) = provider.refresh_session(cookies).await {
            tracing::warn!(error = %e, path = %requested, "session refresh failed");
        }
        return GateDecision::PassThrough;
    }

    match (class, check) {
        (RouteClass::AuthOnly, SessionCheck::SessionCheckFailed(e)) => {
            tracing::warn!(error = %e, path = %requested, "session lookup failed");
            if requested == LOGIN_PATH {
                GateDecision::PassThrough
            } else {
                GateDecision::Redirect(login_redirect(Denial::SessionCheckFailed, &requested))
            }
        }
        (RouteClass::AuthOnly, _) => GateDecision::PassThrough,
        (_, SessionCheck::SessionCheckFailed(e)) => {
            tracing::warn!(error = %e, path = %requested, "session lookup failed");
            GateDecision::Redirect(login_redirect(Denial::SessionCheckFailed, &requested))
        }
        _ => GateDecision::Redirect(login_redirect(Denial::NoSession, &requested)),
    }
}
