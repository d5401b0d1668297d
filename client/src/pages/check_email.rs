//! "Check your email" page shown after a sign-up that needs confirmation.

use gatekeeper::query::EMAIL;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::state::callback::check_email_recipient;

#[component]
pub fn CheckEmailPage() -> impl IntoView {
    let query = use_query_map();
    let recipient = move || query.with(|q| check_email_recipient(q.get(EMAIL).as_deref()));

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Check your email"</h1>
                <p>"We sent a confirmation link to " <strong>{recipient}</strong> "."</p>
                <p>"Open it on this device to finish signing up."</p>
                <p class="auth-links"><a href="/login">"Back to sign in"</a></p>
            </div>
        </div>
    }
}
