//! Session model shared by every guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sessions are issued, refreshed and revoked by the external identity
//! provider. Guards only ever ask whether one is present and, for the
//! completion handler, whether it carries an identity.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity carried by a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Provider-assigned user identifier.
    pub id: Uuid,
    /// Primary email address, if the provider exposes one.
    #[serde(default)]
    pub email: Option<String>,
}

/// Token bundle issued by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry as unix seconds.
    pub expires_at: i64,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

impl Session {
    /// `true` when the access token expires within `leeway_secs` of `now`.
    #[must_use]
    pub fn is_expired(&self, now: i64, leeway_secs: i64) -> bool {
        self.expires_at.saturating_sub(leeway_secs) <= now
    }

    /// The identity attached to this session, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Copy with both tokens blanked, for handing to browser code. The real
    /// tokens stay in the HttpOnly cookie.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self { access_token: String::new(), refresh_token: String::new(), expires_at: self.expires_at, user: self.user.clone() }
    }
}

/// Failure while looking up or refreshing a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The provider could not be reached.
    #[error("identity provider unreachable: {0}")]
    Network(String),
    /// The provider answered with a non-success status.
    #[error("identity provider returned {status}: {message}")]
    Provider { status: u16, message: String },
    /// The session cookie could not be decoded.
    #[error("malformed session cookie: {0}")]
    MalformedCookie(String),
    /// A provider response body could not be decoded.
    #[error("unexpected provider response: {0}")]
    Decode(String),
}

/// Outcome of a session lookup.
///
/// `NoSession` is the expected anonymous case; `SessionCheckFailed` means the
/// lookup itself broke. Redirect policy decides how each is treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCheck {
    Present(Session),
    NoSession,
    SessionCheckFailed(SessionError),
}

impl SessionCheck {
    /// Fold a raw provider lookup result into a check outcome.
    #[must_use]
    pub fn from_lookup(result: Result<Option<Session>, SessionError>) -> Self {
        match result {
            Ok(Some(session)) => Self::Present(session),
            Ok(None) => Self::NoSession,
            Err(e) => Self::SessionCheckFailed(e),
        }
    }
}

/// Whether a lookup produced a session. Used by the server and client guards
/// alike so their notion of "signed in" cannot drift apart.
#[must_use]
pub fn has_session(check: &SessionCheck) -> bool {
    matches!(check, SessionCheck::Present(_))
}
