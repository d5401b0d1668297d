//! Route-guard middleware.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps every route, including Leptos SSR pages and static assets, so the
//! access decision happens before anything renders. The decision itself lives
//! in `gatekeeper::gate`; this layer only binds it to a request's cookies and
//! turns the verdict into a response.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use gatekeeper::{CookieSessionProvider, GateDecision};

use crate::cookies::JarCookies;

/// State seen by [`route_guard`].
#[derive(Clone)]
pub struct GuardState {
    pub provider: Arc<dyn CookieSessionProvider>,
    pub cookie_secure: bool,
}

/// Allow or redirect a navigation. Cookies rewritten by the provider are
/// attached to the outgoing response either way.
pub async fn route_guard(State(state): State<GuardState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut cookies = JarCookies::new(CookieJar::from_headers(request.headers()), state.cookie_secure);

    let decision = gatekeeper::decide(&path, state.provider.as_ref(), &mut cookies).await;
    let jar = cookies.into_jar();

    match decision {
        GateDecision::PassThrough => (jar, next.run(request).await).into_response(),
        GateDecision::Redirect(target) => {
            let location = target.to_location();
            tracing::debug!(%path, %location, "route guard redirect");
            (jar, Redirect::temporary(&location)).into_response()
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
