//! Shared route access-control core for the storefront.
//!
//! This crate owns the pieces both the `server` route guard and the `client`
//! component guard must agree on: how a path is classified, what counts as a
//! session, and which redirect a refused request receives. It has no HTTP or
//! UI dependencies; the identity provider is reached only through the
//! capability traits in [`provider`].

pub mod gate;
pub mod provider;
pub mod query;
pub mod routes;
pub mod session;

pub use gate::{Denial, GateDecision, RedirectTarget, decide, login_redirect};
pub use provider::{CookieOptions, CookieSessionProvider, CookieStore, SessionProvider};
pub use routes::{RouteClass, classify};
pub use session::{Session, SessionCheck, SessionError, SessionUser, has_session};
