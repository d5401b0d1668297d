//! Mount-time session check for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by `ProtectedRoute` to re-validate the session on client-side
//! navigations, which never pass through the server route guard.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use gatekeeper::provider::check_session;
use gatekeeper::routes::LOGIN_PATH;
use gatekeeper::{SessionCheck, SessionProvider, has_session};

use crate::util::auth::{MountScope, Navigator};

/// Shown inline when the lookup itself fails.
pub const VERIFY_FAILED_MESSAGE: &str = "Unable to verify your session. Please sign in again.";

/// Where a protected view stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GuardPhase {
    /// Lookup in flight; nothing protected is rendered.
    #[default]
    Checking,
    Authenticated,
    /// Lookup failed; the message is shown while the login redirect runs.
    Error(String),
    /// No session; leaving for the login page.
    Redirecting,
}

/// Check the session once for a freshly mounted protected view.
///
/// Returns `None` when the view unmounted before the lookup finished; in that
/// case nothing is navigated and the caller must not touch its state.
/// Failures close the gate: the visitor is sent to the login page either way.
pub async fn verify_on_mount<P, N>(provider: &P, navigator: &N, scope: &MountScope) -> Option<GuardPhase>
where
    P: SessionProvider + ?Sized,
    N: Navigator + ?Sized,
{
    let check = check_session(provider).await;
    if !scope.is_live() {
        log::debug!("protected view unmounted before session check finished");
        return None;
    }

    if let SessionCheck::SessionCheckFailed(e) = &check {
        log::warn!("session verification failed: {e}");
        navigator.navigate(LOGIN_PATH);
        return Some(GuardPhase::Error(VERIFY_FAILED_MESSAGE.to_owned()));
    }
    if has_session(&check) {
        return Some(GuardPhase::Authenticated);
    }
    navigator.navigate(LOGIN_PATH);
    Some(GuardPhase::Redirecting)
}
