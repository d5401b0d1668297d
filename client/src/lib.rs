//! # client
//!
//! Leptos + WASM frontend for the storefront.
//!
//! This crate contains pages, the `ProtectedRoute` component, the guard and
//! auth-completion state machines, and the browser-side session provider.
//! Access rules (which paths are public, what counts as a session) come from
//! the shared `gatekeeper` crate so the browser and the server agree.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
