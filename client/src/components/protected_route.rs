//! Client-side gate around protected page content.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server route guard only sees full page loads. Client-side navigations
//! between routes never reach it, so every protected page is wrapped in
//! [`ProtectedRoute`], which re-checks the session once per mount.

#[cfg(test)]
#[path = "protected_route_test.rs"]
mod protected_route_test;

use leptos::prelude::*;

use crate::state::auth::GuardPhase;

/// View for one guard phase. `children` runs only once the session is
/// confirmed.
pub(crate) fn phase_view(phase: GuardPhase, children: impl FnOnce() -> AnyView) -> AnyView {
    match phase {
        GuardPhase::Checking => view! { <p class="guard guard--checking">"Checking your session..."</p> }.into_any(),
        GuardPhase::Authenticated => children(),
        GuardPhase::Error(message) => view! { <p class="guard guard--error" role="alert">{message}</p> }.into_any(),
        GuardPhase::Redirecting => ().into_any(),
    }
}

/// Render `children` only once the session check succeeds.
///
/// While checking, a placeholder is shown. A failed lookup shows an inline
/// error; a missing session renders nothing while the redirect runs. There
/// is no retry and no timeout.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let phase = RwSignal::new(GuardPhase::Checking);

    #[cfg(feature = "hydrate")]
    {
        use crate::net::api::BrowserSessionProvider;
        use crate::state::auth::verify_on_mount;
        use crate::util::auth::{MountScope, RouterNavigator};

        let scope = MountScope::new();
        let task_scope = scope.clone();
        let navigator = RouterNavigator::new(leptos_router::hooks::use_navigate());
        leptos::task::spawn_local(async move {
            if let Some(next) = verify_on_mount(&BrowserSessionProvider, &navigator, &task_scope).await {
                phase.set(next);
            }
        });
        on_cleanup(move || scope.close());
    }

    let children = StoredValue::new(children);
    move || phase_view(phase.get(), || children.with_value(|children| children().into_any()))
}
