//! HTTP adapter for the hosted identity provider.
//!
//! ARCHITECTURE
//! ============
//! The provider speaks a GoTrue-style REST API under `/auth/v1`. The session
//! it issues is kept as percent-encoded JSON in a single HttpOnly cookie.
//! Lookups read that cookie and only touch the network when the access token
//! is about to expire.
//!
//! TRADE-OFFS
//! ==========
//! A lookup trusts an unexpired cookie without revalidating it upstream. This
//! keeps every guarded navigation off the network at the cost of honoring a
//! revoked access token until it expires.

use std::time::Duration;

use gatekeeper::{CookieOptions, CookieSessionProvider, CookieStore, Session, SessionError, SessionUser};
use serde::Deserialize;

use crate::config::ServerConfig;

pub const SESSION_COOKIE: &str = "storefront-auth-token";
const SESSION_COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 30;

/// Result of a sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// Provider auto-confirmed the account and issued a session.
    Session(Session),
    /// A confirmation email was sent; no session yet.
    ConfirmationRequired,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    user: Option<SessionUser>,
}

impl TokenResponse {
    fn into_session(self, now: i64) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_at.unwrap_or(now + self.expires_in),
            user: self.user,
        }
    }
}

pub struct HttpIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    refresh_leeway_secs: i64,
    cookie_secure: bool,
}

impl HttpIdentityProvider {
    /// Build a provider client from typed server config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ServerConfig) -> Result<Self, SessionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| SessionError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.auth_url.clone(),
            anon_key: config.anon_key.clone(),
            refresh_leeway_secs: config.refresh_leeway_secs,
            cookie_secure: config.cookie_secure,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    // =========================================================================
    // COOKIE PERSISTENCE
    // =========================================================================

    /// Write `session` into the session cookie.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be serialized.
    pub fn persist(&self, cookies: &mut dyn CookieStore, session: &Session) -> Result<(), SessionError> {
        let json = serde_json::to_string(session).map_err(decode)?;
        let encoded = urlencoding::encode(&json).into_owned();
        let options =
            CookieOptions { max_age_secs: Some(SESSION_COOKIE_MAX_AGE_SECS), http_only: true, secure: self.cookie_secure };
        cookies.set(SESSION_COOKIE, encoded, options);
        Ok(())
    }

    /// Drop the session cookie.
    pub fn clear(&self, cookies: &mut dyn CookieStore) {
        cookies.remove(SESSION_COOKIE);
    }

    /// Decode the session cookie without any network traffic.
    ///
    /// # Errors
    ///
    /// A cookie that does not decode is removed and reported as
    /// [`SessionError::MalformedCookie`].
    pub fn read_cookie(&self, cookies: &mut dyn CookieStore) -> Result<Option<Session>, SessionError> {
        let Some(raw) = cookies.get(SESSION_COOKIE) else {
            return Ok(None);
        };
        let parsed = urlencoding::decode(&raw)
            .map_err(|e| e.to_string())
            .and_then(|json| serde_json::from_str::<Session>(&json).map_err(|e| e.to_string()));
        match parsed {
            Ok(session) => Ok(Some(session)),
            Err(reason) => {
                self.clear(cookies);
                Err(SessionError::MalformedCookie(reason))
            }
        }
    }

    // =========================================================================
    // PROVIDER CALLS
    // =========================================================================

    /// Trade a refresh token for a new session. `Ok(None)` means the provider
    /// rejected the refresh token.
    async fn refresh(&self, refresh_token: &str) -> Result<Option<Session>, SessionError> {
        let resp = self
            .http
            .post(self.endpoint("token"))
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(network)?;

        if matches!(resp.status().as_u16(), 400 | 401) {
            tracing::info!(status = resp.status().as_u16(), "refresh token rejected");
            return Ok(None);
        }
        let token = expect_success(resp).await?.json::<TokenResponse>().await.map_err(decode)?;
        Ok(Some(token.into_session(now_unix())))
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Provider`] when the credentials are rejected.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        let resp = self
            .http
            .post(self.endpoint("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(network)?;
        let token = expect_success(resp).await?.json::<TokenResponse>().await.map_err(decode)?;
        Ok(token.into_session(now_unix()))
    }

    /// Register a new account. Confirmation links point at `redirect_to`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Provider`] when the provider refuses the
    /// sign-up (e.g. the address is taken or the password is too weak).
    pub async fn sign_up(&self, email: &str, password: &str, redirect_to: &str) -> Result<SignUpOutcome, SessionError> {
        let resp = self
            .http
            .post(self.endpoint("signup"))
            .query(&[("redirect_to", redirect_to)])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(network)?;
        let body = expect_success(resp).await?.json::<serde_json::Value>().await.map_err(decode)?;

        if body.get("access_token").is_some() {
            let token: TokenResponse = serde_json::from_value(body).map_err(decode)?;
            return Ok(SignUpOutcome::Session(token.into_session(now_unix())));
        }
        Ok(SignUpOutcome::ConfirmationRequired)
    }

    /// Redeem an emailed confirmation or magic-link token for a session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Provider`] when the token is invalid or spent.
    pub async fn verify_email_token(&self, token_hash: &str, kind: &str) -> Result<Session, SessionError> {
        let resp = self
            .http
            .post(self.endpoint("verify"))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "type": kind, "token_hash": token_hash }))
            .send()
            .await
            .map_err(network)?;
        let token = expect_success(resp).await?.json::<TokenResponse>().await.map_err(decode)?;
        Ok(token.into_session(now_unix()))
    }

    /// Ask the provider to email a password-reset link.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be reached or refuses.
    pub async fn request_password_reset(&self, email: &str, redirect_to: &str) -> Result<(), SessionError> {
        let resp = self
            .http
            .post(self.endpoint("recover"))
            .query(&[("redirect_to", redirect_to)])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(network)?;
        expect_success(resp).await.map(|_| ())
    }

    /// Revoke the session behind `access_token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be reached or refuses.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), SessionError> {
        let resp = self
            .http
            .post(self.endpoint("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(network)?;
        expect_success(resp).await.map(|_| ())
    }
}

#[async_trait::async_trait]
impl CookieSessionProvider for HttpIdentityProvider {
    async fn get_session(&self, cookies: &mut dyn CookieStore) -> Result<Option<Session>, SessionError> {
        let Some(session) = self.read_cookie(cookies)? else {
            return Ok(None);
        };
        if !session.is_expired(now_unix(), self.refresh_leeway_secs) {
            return Ok(Some(session));
        }

        match self.refresh(&session.refresh_token).await? {
            Some(fresh) => {
                self.persist(cookies, &fresh)?;
                tracing::debug!("session refreshed");
                Ok(Some(fresh))
            }
            None => {
                self.clear(cookies);
                Ok(None)
            }
        }
    }
}

pub(crate) fn now_unix() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

fn network(e: reqwest::Error) -> SessionError {
    SessionError::Network(e.to_string())
}

fn decode(e: impl std::fmt::Display) -> SessionError {
    SessionError::Decode(e.to_string())
}

async fn expect_success(resp: reqwest::Response) -> Result<reqwest::Response, SessionError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(SessionError::Provider { status: status.as_u16(), message })
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
