//! Auth routes: session lookup, password sign-in/up, email callback, sign-out.
//!
//! Every handler builds a per-request [`JarCookies`] so provider cookie writes
//! travel back on the response.
//!
//! EMAIL LINKS
//! ===========
//! The provider's confirmation and recovery templates must link to
//! `{SITE_URL}/api/auth/callback?token_hash={{ .TokenHash }}&type=<kind>`.
//! The stock templates use a PKCE `?code=` or an `#access_token` fragment;
//! neither can be redeemed here, since sign-up is not started with a code
//! verifier and fragments never reach the server.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use gatekeeper::query::{self, CALLBACK_ERROR, EMAIL, ERROR, REDIRECT_TO};
use gatekeeper::routes::{DASHBOARD_PATH, HOME_PATH, LOGIN_PATH};
use gatekeeper::{CookieSessionProvider, RedirectTarget, SessionError};
use serde::Deserialize;
use serde_json::json;

use crate::cookies::JarCookies;
use crate::identity::SignUpOutcome;
use crate::state::AppState;

const CHECK_EMAIL_PATH: &str = "/check-email";
const AUTH_CALLBACK_PAGE: &str = "/auth/callback";
const DEFAULT_EMAIL_TOKEN_TYPE: &str = "signup";

#[derive(Deserialize)]
pub struct Credentials {
    email: String,
    password: String,
}

#[derive(Deserialize)]
pub struct RecoverRequest {
    email: String,
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    token_hash: Option<String>,
    code: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    redirect_to: Option<String>,
}

pub(crate) fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

fn error_json(status: StatusCode, code: &str) -> Response {
    (status, Json(json!({ "error": code }))).into_response()
}

/// Map a provider failure on a credential call to an HTTP status.
pub(crate) fn credential_error_status(err: &SessionError) -> StatusCode {
    match err {
        SessionError::Provider { status: 400 | 401 | 403 | 422, .. } => StatusCode::UNAUTHORIZED,
        SessionError::Provider { status: 429, .. } => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::BAD_GATEWAY,
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/auth/session`: current session with tokens redacted.
///
/// The browser-side provider reads this so client and server share one
/// definition of "signed in".
pub async fn session(State(state): State<AppState>, jar: CookieJar) -> Response {
    let mut cookies = JarCookies::new(jar, state.config.cookie_secure);
    match state.identity.get_session(&mut cookies).await {
        Ok(session) => {
            let body = json!({ "session": session.map(|s| s.redacted()) });
            (cookies.into_jar(), Json(body)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "session endpoint lookup failed");
            (cookies.into_jar(), error_json(StatusCode::SERVICE_UNAVAILABLE, query::SESSION_ERROR)).into_response()
        }
    }
}

/// `POST /api/auth/login`: password sign-in; sets the session cookie.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Json(body): Json<Credentials>) -> Response {
    let Some(email) = normalize_email(&body.email) else {
        return error_json(StatusCode::BAD_REQUEST, "invalid_email");
    };
    if body.password.is_empty() {
        return error_json(StatusCode::BAD_REQUEST, "missing_password");
    }

    let session = match state.identity.sign_in_with_password(&email, &body.password).await {
        Ok(session) => session,
        Err(e) => {
            tracing::info!(error = %e, "password sign-in rejected");
            return error_json(credential_error_status(&e), "invalid_credentials");
        }
    };

    let mut cookies = JarCookies::new(jar, state.config.cookie_secure);
    if let Err(e) = state.identity.persist(&mut cookies, &session) {
        tracing::error!(error = %e, "session persist failed");
        return error_json(StatusCode::INTERNAL_SERVER_ERROR, "session_error");
    }
    (cookies.into_jar(), Json(json!({ "user": session.user }))).into_response()
}

/// `POST /api/auth/signup`: register; answers with where the browser goes next.
pub async fn signup(State(state): State<AppState>, jar: CookieJar, Json(body): Json<Credentials>) -> Response {
    let Some(email) = normalize_email(&body.email) else {
        return error_json(StatusCode::BAD_REQUEST, "invalid_email");
    };
    if body.password.is_empty() {
        return error_json(StatusCode::BAD_REQUEST, "missing_password");
    }

    let confirm_url = format!("{}/api/auth/callback", state.config.site_url);
    match state.identity.sign_up(&email, &body.password, &confirm_url).await {
        Ok(SignUpOutcome::Session(session)) => {
            let mut cookies = JarCookies::new(jar, state.config.cookie_secure);
            if let Err(e) = state.identity.persist(&mut cookies, &session) {
                tracing::error!(error = %e, "session persist failed");
                return error_json(StatusCode::INTERNAL_SERVER_ERROR, "session_error");
            }
            (cookies.into_jar(), Json(json!({ "redirect": DASHBOARD_PATH }))).into_response()
        }
        Ok(SignUpOutcome::ConfirmationRequired) => {
            let next = RedirectTarget::new(CHECK_EMAIL_PATH).with_param(EMAIL, email);
            Json(json!({ "redirect": next.to_location() })).into_response()
        }
        Err(e) => {
            tracing::info!(error = %e, "sign-up rejected");
            let status = match credential_error_status(&e) {
                StatusCode::UNAUTHORIZED => StatusCode::UNPROCESSABLE_ENTITY,
                other => other,
            };
            error_json(status, "signup_failed")
        }
    }
}

/// `POST /api/auth/recover`: email a password-reset link.
///
/// Always answers 202 for well-formed addresses so the endpoint does not
/// reveal which accounts exist.
pub async fn recover(State(state): State<AppState>, Json(body): Json<RecoverRequest>) -> Response {
    let Some(email) = normalize_email(&body.email) else {
        return error_json(StatusCode::BAD_REQUEST, "invalid_email");
    };
    let confirm_url = format!("{}/api/auth/callback", state.config.site_url);
    if let Err(e) = state.identity.request_password_reset(&email, &confirm_url).await {
        tracing::warn!(error = %e, "password reset request failed");
    }
    StatusCode::ACCEPTED.into_response()
}

/// `POST /api/auth/logout`: revoke upstream (best effort) and clear the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let mut cookies = JarCookies::new(jar, state.config.cookie_secure);
    if let Ok(Some(session)) = state.identity.read_cookie(&mut cookies) {
        if let Err(e) = state.identity.sign_out(&session.access_token).await {
            tracing::warn!(error = %e, "provider sign-out failed");
        }
    }
    state.identity.clear(&mut cookies);
    (cookies.into_jar(), StatusCode::NO_CONTENT)
}

/// `GET /api/auth/callback`: landing URL of provider email links.
///
/// Redeems `token_hash` for a session when present, then hands off to the
/// `/auth/callback` page, which performs the client-side completion check.
pub async fn callback(State(state): State<AppState>, jar: CookieJar, Query(params): Query<CallbackQuery>) -> Response {
    let destination = query::safe_destination(params.redirect_to.as_deref(), HOME_PATH);
    let handoff = RedirectTarget::new(AUTH_CALLBACK_PAGE).with_param(REDIRECT_TO, destination);

    let Some(token_hash) = params.token_hash.filter(|t| !t.is_empty()) else {
        if params.code.is_some_and(|c| !c.is_empty()) {
            tracing::warn!("email link carried a PKCE code; the email template must send token_hash");
            let failed = RedirectTarget::new(LOGIN_PATH).with_param(ERROR, CALLBACK_ERROR);
            return Redirect::temporary(&failed.to_location()).into_response();
        }
        return Redirect::temporary(&handoff.to_location()).into_response();
    };
    let kind = params.kind.as_deref().unwrap_or(DEFAULT_EMAIL_TOKEN_TYPE);

    let session = match state.identity.verify_email_token(&token_hash, kind).await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(error = %e, kind, "email token exchange failed");
            let failed = RedirectTarget::new(LOGIN_PATH).with_param(ERROR, CALLBACK_ERROR);
            return Redirect::temporary(&failed.to_location()).into_response();
        }
    };

    let mut cookies = JarCookies::new(jar, state.config.cookie_secure);
    if let Err(e) = state.identity.persist(&mut cookies, &session) {
        tracing::error!(error = %e, "session persist failed");
        let failed = RedirectTarget::new(LOGIN_PATH).with_param(ERROR, CALLBACK_ERROR);
        return Redirect::temporary(&failed.to_location()).into_response();
    }
    (cookies.into_jar(), Redirect::temporary(&handoff.to_location())).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
