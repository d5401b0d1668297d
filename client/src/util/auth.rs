//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guard and callback state machines navigate through [`Navigator`] and
//! check [`MountScope`] before touching any state, so a component that
//! unmounts mid-lookup never redirects or writes to a disposed signal.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos_router::NavigateOptions;

/// Client-side navigation capability.
pub trait Navigator {
    fn navigate(&self, to: &str);
}

/// [`Navigator`] over the closure returned by `use_navigate`. Guard
/// redirects replace the current history entry.
pub struct RouterNavigator<F> {
    navigate: F,
}

impl<F> RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    pub fn new(navigate: F) -> Self {
        Self { navigate }
    }
}

impl<F> Navigator for RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    fn navigate(&self, to: &str) {
        (self.navigate)(to, NavigateOptions { replace: true, ..NavigateOptions::default() });
    }
}

/// Liveness flag for one component mount. Closed from `on_cleanup`.
#[derive(Clone, Debug)]
pub struct MountScope {
    alive: Arc<AtomicBool>,
}

impl MountScope {
    #[must_use]
    pub fn new() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    pub fn close(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }
}

impl Default for MountScope {
    fn default() -> Self {
        Self::new()
    }
}

/// Full page load of `path`, so the server route guard sees the new cookie.
#[cfg(feature = "hydrate")]
pub fn load_page(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(path) {
            log::warn!("navigation to {path} failed: {e:?}");
        }
    }
}
