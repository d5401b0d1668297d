//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the auth API and stitches it with Leptos SSR rendering
//! under a single Axum router. The route guard is the outermost layer, so it
//! sees every navigation (pages, API calls, static assets) before any handler
//! runs.

pub mod auth;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::guard;
use crate::state::AppState;

/// Auth API and health check.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/session", get(auth::session))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/recover", post(auth::recover))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/callback", get(auth::callback))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Wrap `router` in the route guard plus request tracing and compression.
pub fn guarded(router: Router, state: &AppState) -> Router {
    router
        .layer(middleware::from_fn_with_state(state.guard_state(), guard::route_guard))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Full application: auth API + Leptos SSR pages + `/pkg` assets, guarded.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Leptos static assets (WASM, CSS, JS) live under the site root.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    let app = api_routes(state.clone())
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")));
    Ok(guarded(app, &state))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
