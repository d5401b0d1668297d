//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the identity-provider client and typed config. The route guard gets
//! its own narrower [`GuardState`], which only sees the provider through the
//! `CookieSessionProvider` capability.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::guard::GuardState;
use crate::identity::HttpIdentityProvider;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<HttpIdentityProvider>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig, identity: HttpIdentityProvider) -> Self {
        Self { identity: Arc::new(identity), config: Arc::new(config) }
    }

    /// State for the route-guard middleware, backed by the same provider the
    /// auth handlers use.
    #[must_use]
    pub fn guard_state(&self) -> GuardState {
        GuardState { provider: self.identity.clone(), cookie_secure: self.config.cookie_secure }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
