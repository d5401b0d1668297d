//! Auth completion after the identity provider's redirect.
//!
//! SYSTEM CONTEXT
//! ==============
//! Email links land on `/api/auth/callback`, which redeems the token and sets
//! the session cookie, then hands off to the `/auth/callback` page. The page
//! runs [`complete_sign_in`] to confirm a session with an identity exists
//! before forwarding to the destination carried in `redirect_to`.
//!
//! TRADE-OFFS
//! ==========
//! Failures are terminal. The page shows an error with a link back to the
//! login page instead of retrying, since a spent or expired link will not
//! start working on its own.

#[cfg(test)]
#[path = "callback_test.rs"]
mod callback_test;

use gatekeeper::provider::check_session;
use gatekeeper::query::safe_destination;
use gatekeeper::routes::HOME_PATH;
use gatekeeper::{SessionCheck, SessionProvider};

use crate::util::auth::{MountScope, Navigator};

pub const CALLBACK_FAILED_MESSAGE: &str = "We couldn't complete sign-in. Please try again.";
pub const NO_SESSION_MESSAGE: &str = "This sign-in link is invalid or has expired.";
const DEFAULT_RECIPIENT: &str = "your email";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CallbackPhase {
    #[default]
    Loading,
    Success {
        destination: String,
    },
    Error(String),
}

/// Same-site path named by `redirect_to`, or `/`.
#[must_use]
pub fn redirect_destination(redirect_to: Option<&str>) -> String {
    safe_destination(redirect_to, HOME_PATH)
}

/// Address shown on the check-email page.
#[must_use]
pub fn check_email_recipient(email: Option<&str>) -> String {
    email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or(DEFAULT_RECIPIENT)
        .to_owned()
}

/// Confirm the provider left a session with an identity, then navigate on.
///
/// Returns `None` when the page unmounted first. Only the success path
/// navigates.
pub async fn complete_sign_in<P, N>(
    provider: &P,
    redirect_to: Option<&str>,
    navigator: &N,
    scope: &MountScope,
) -> Option<CallbackPhase>
where
    P: SessionProvider + ?Sized,
    N: Navigator + ?Sized,
{
    let check = check_session(provider).await;
    if !scope.is_live() {
        return None;
    }

    let phase = match check {
        SessionCheck::SessionCheckFailed(e) => {
            log::warn!("auth callback session lookup failed: {e}");
            CallbackPhase::Error(CALLBACK_FAILED_MESSAGE.to_owned())
        }
        SessionCheck::Present(session) if session.identity().is_some() => {
            let destination = redirect_destination(redirect_to);
            navigator.navigate(&destination);
            CallbackPhase::Success { destination }
        }
        SessionCheck::Present(_) | SessionCheck::NoSession => {
            log::info!("auth callback reached without a signed-in user");
            CallbackPhase::Error(NO_SESSION_MESSAGE.to_owned())
        }
    };
    Some(phase)
}
