//! REST API helpers for the auth endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs, since these calls are only made from browser
//! event handlers and mount effects.
//!
//! ERROR HANDLING
//! ==============
//! Form calls return `Result<_, String>` with a message ready to show
//! inline. The session lookup keeps the typed [`SessionError`] because the
//! guards distinguish a failed lookup from an anonymous visitor.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use gatekeeper::{Session, SessionError, SessionProvider};

#[cfg(feature = "hydrate")]
use super::types::{Credentials, RecoverRequest, SessionEnvelope, SignupResponse};

#[cfg(any(test, feature = "hydrate"))]
const SESSION_ENDPOINT: &str = "/api/auth/session";

#[cfg(any(test, feature = "hydrate"))]
fn login_failed_message(status: u16) -> String {
    match status {
        401 => "Incorrect email or password.".to_owned(),
        429 => "Too many attempts. Try again in a moment.".to_owned(),
        _ => format!("Sign-in failed ({status}). Please try again."),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn signup_failed_message(status: u16) -> String {
    match status {
        422 => "That email can't be used to sign up. It may already be registered.".to_owned(),
        429 => "Too many attempts. Try again in a moment.".to_owned(),
        _ => format!("Sign-up failed ({status}). Please try again."),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn session_lookup_failed(status: u16) -> SessionError {
    SessionError::Provider { status, message: format!("{SESSION_ENDPOINT} returned {status}") }
}

/// Session provider backed by `GET /api/auth/session`, so the browser and
/// the server route guard share one definition of "signed in".
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSessionProvider;

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl SessionProvider for BrowserSessionProvider {
    async fn get_session(&self) -> Result<Option<Session>, SessionError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(SESSION_ENDPOINT)
                .send()
                .await
                .map_err(|e| SessionError::Network(e.to_string()))?;
            if !resp.ok() {
                return Err(session_lookup_failed(resp.status()));
            }
            let envelope = resp
                .json::<SessionEnvelope>()
                .await
                .map_err(|e| SessionError::Decode(e.to_string()))?;
            Ok(envelope.session)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Ok(None)
        }
    }
}

/// Sign in with email and password via `POST /api/auth/login`.
///
/// # Errors
///
/// Returns a display message when the request fails or is rejected.
pub async fn login(email: &str, password: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/auth/login")
            .json(&Credentials { email, password })
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(login_failed_message(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err("not available on server".to_owned())
    }
}

/// Register via `POST /api/auth/signup`. Returns the path to visit next.
///
/// # Errors
///
/// Returns a display message when the request fails or is rejected.
pub async fn signup(email: &str, password: &str) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/auth/signup")
            .json(&Credentials { email, password })
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(signup_failed_message(resp.status()));
        }
        let body = resp.json::<SignupResponse>().await.map_err(|e| e.to_string())?;
        Ok(body.redirect)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err("not available on server".to_owned())
    }
}

/// Request a password-reset email via `POST /api/auth/recover`.
///
/// # Errors
///
/// Returns a display message when the request cannot be sent.
pub async fn recover(email: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/auth/recover")
            .json(&RecoverRequest { email })
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("Reset request failed ({}).", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        Err("not available on server".to_owned())
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post("/api/auth/logout").send().await;
    }
}
