//! Auth completion page at `/auth/callback`.

use leptos::prelude::*;

use crate::state::callback::CallbackPhase;

#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let phase = RwSignal::new(CallbackPhase::Loading);

    #[cfg(feature = "hydrate")]
    {
        use gatekeeper::query::REDIRECT_TO;
        use leptos_router::hooks::use_query_map;

        use crate::net::api::BrowserSessionProvider;
        use crate::state::callback::complete_sign_in;
        use crate::util::auth::{MountScope, RouterNavigator};

        let redirect_to = use_query_map().with_untracked(|q| q.get(REDIRECT_TO));
        let scope = MountScope::new();
        let task_scope = scope.clone();
        let navigator = RouterNavigator::new(leptos_router::hooks::use_navigate());
        leptos::task::spawn_local(async move {
            let outcome =
                complete_sign_in(&BrowserSessionProvider, redirect_to.as_deref(), &navigator, &task_scope).await;
            if let Some(next) = outcome {
                phase.set(next);
            }
        });
        on_cleanup(move || scope.close());
    }

    view! {
        <div class="auth-page">
            <div class="auth-card">
                {move || match phase.get() {
                    CallbackPhase::Loading => view! { <p>"Completing sign-in..."</p> }.into_any(),
                    CallbackPhase::Success { destination } => {
                        let href = destination.clone();
                        view! { <p>"Signed in. Redirecting to " <a href=href>{destination}</a></p> }.into_any()
                    }
                    CallbackPhase::Error(message) => {
                        view! {
                            <p class="auth-notice" role="alert">{message}</p>
                            <p class="auth-links"><a href="/login">"Back to sign in"</a></p>
                        }
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}
