//! Identity-provider capabilities injected into the guards.
//!
//! DESIGN
//! ======
//! Guards never construct a provider client themselves. Each receives one of
//! these traits from its caller, so tests substitute counting fakes and the
//! server and browser can each bind their own transport.
//!
//! The browser-side trait drops the `Send` bound on wasm, where provider
//! futures are driven by the single-threaded event loop.

use crate::session::{Session, SessionCheck, SessionError};

/// Attributes applied when a provider writes a cookie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CookieOptions {
    /// Lifetime in seconds; `None` yields a browser-session cookie.
    pub max_age_secs: Option<i64>,
    pub http_only: bool,
    pub secure: bool,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self { max_age_secs: None, http_only: true, secure: false }
    }
}

/// Read/write access to the cookies of one request/response pair.
///
/// Writes land on the outgoing response; reads see the incoming request plus
/// any writes already made through this store.
pub trait CookieStore: Send {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: String, options: CookieOptions);
    fn remove(&mut self, name: &str);
}

/// Ambient session lookup used by browser components.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait SessionProvider {
    /// Read the current session.
    async fn get_session(&self) -> Result<Option<Session>, SessionError>;
}

/// Cookie-scoped session lookup used by the server route guard.
#[async_trait::async_trait]
pub trait CookieSessionProvider: Send + Sync {
    /// Read the session from `cookies`, refreshing and rewriting it if the
    /// provider issues new tokens.
    async fn get_session(&self, cookies: &mut dyn CookieStore) -> Result<Option<Session>, SessionError>;

    /// Refresh the session if needed. Only rewrites cookies; repeated calls
    /// must not mint additional sessions.
    async fn refresh_session(&self, cookies: &mut dyn CookieStore) -> Result<(), SessionError> {
        self.get_session(cookies).await.map(|_| ())
    }
}

/// Look up the ambient session without letting a failure escape.
pub async fn check_session<P>(provider: &P) -> SessionCheck
where
    P: SessionProvider + ?Sized,
{
    SessionCheck::from_lookup(provider.get_session().await)
}

/// Look up a cookie-scoped session without letting a failure escape.
pub async fn check_session_with_cookies<P>(provider: &P, cookies: &mut dyn CookieStore) -> SessionCheck
where
    P: CookieSessionProvider + ?Sized,
{
    SessionCheck::from_lookup(provider.get_session(cookies).await)
}
