//! Public landing page.

use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <h1>"Storefront"</h1>
            <p>"Browse the catalog, or sign in to see your orders."</p>
            <nav class="home-links">
                <a class="auth-button" href="/login">"Sign in"</a>
                <a href="/signup">"Create an account"</a>
                <a href="/dashboard">"Your account"</a>
            </nav>
        </div>
    }
}
