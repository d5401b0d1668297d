//! Account dashboard. Rendered only inside `ProtectedRoute`.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use gatekeeper::SessionUser;
use leptos::prelude::*;

pub(crate) fn greeting(user: Option<&SessionUser>) -> String {
    match user.and_then(|u| u.email.as_deref()) {
        Some(email) => format!("Signed in as {email}"),
        None => "Signed in".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let user = RwSignal::new(None::<SessionUser>);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        use gatekeeper::SessionProvider;

        match crate::net::api::BrowserSessionProvider.get_session().await {
            Ok(session) => user.set(session.and_then(|s| s.user)),
            Err(e) => log::warn!("dashboard identity lookup failed: {e}"),
        }
    });

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async {
            crate::net::api::logout().await;
            crate::util::auth::load_page(gatekeeper::routes::LOGIN_PATH);
        });
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>"Your account"</h1>
                <p class="dashboard-greeting">{move || user.with(|u| greeting(u.as_ref()))}</p>
                <button class="auth-button" on:click=on_logout>"Sign out"</button>
            </header>
            <section class="dashboard-section">
                <h2>"Orders"</h2>
                <p>"You have no recent orders."</p>
            </section>
        </div>
    }
}
