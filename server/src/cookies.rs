//! Per-request cookie store over `axum-extra`'s `CookieJar`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity provider reads and rewrites the session cookie through the
//! `gatekeeper::CookieStore` capability. Each request gets a fresh store; the
//! accumulated jar is returned with the response so only changed cookies are
//! emitted as `Set-Cookie` headers.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use gatekeeper::{CookieOptions, CookieStore};
use time::Duration;

pub struct JarCookies {
    jar: CookieJar,
    secure: bool,
}

impl JarCookies {
    /// Wrap the request's jar. `secure` forces the `Secure` attribute on
    /// every cookie written through this store.
    #[must_use]
    pub fn new(jar: CookieJar, secure: bool) -> Self {
        Self { jar, secure }
    }

    /// Hand back the jar carrying any pending cookie changes.
    #[must_use]
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl CookieStore for JarCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.get(name).map(|c| c.value().to_owned())
    }

    fn set(&mut self, name: &str, value: String, options: CookieOptions) {
        let mut cookie = Cookie::build((name.to_owned(), value))
            .path("/")
            .http_only(options.http_only)
            .same_site(SameSite::Lax)
            .secure(options.secure || self.secure);
        if let Some(secs) = options.max_age_secs {
            cookie = cookie.max_age(Duration::seconds(secs));
        }
        self.jar = std::mem::take(&mut self.jar).add(cookie);
    }

    fn remove(&mut self, name: &str) {
        let cookie = Cookie::build((name.to_owned(), "")).path("/");
        self.jar = std::mem::take(&mut self.jar).remove(cookie);
    }
}

#[cfg(test)]
#[path = "cookies_test.rs"]
mod tests;
