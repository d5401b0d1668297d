//! Login page: email + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use gatekeeper::query::{CALLBACK_ERROR, ERROR, REDIRECTED_FROM, SESSION_ERROR, safe_destination};
use gatekeeper::routes::DASHBOARD_PATH;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

/// Trim and require both fields.
pub(crate) fn validate_credentials(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Banner for the `error` query parameter set by the guards.
pub(crate) fn login_notice(error: Option<&str>) -> Option<&'static str> {
    match error? {
        SESSION_ERROR => Some("We couldn't verify your session. Please sign in again."),
        CALLBACK_ERROR => Some("That sign-in link is invalid or has expired."),
        _ => None,
    }
}

/// Where to go after signing in: the page that bounced the visitor, or the
/// dashboard.
pub(crate) fn post_login_destination(redirected_from: Option<&str>) -> String {
    safe_destination(redirected_from, DASHBOARD_PATH)
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let query = use_query_map();
    let notice = query.with_untracked(|q| login_notice(q.get(ERROR).as_deref()));
    let destination = query.with_untracked(|q| post_login_destination(q.get(REDIRECTED_FROM).as_deref()));

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_credentials(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let destination = destination.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::login(&email_value, &password_value).await {
                    Ok(()) => crate::util::auth::load_page(&destination),
                    Err(e) => {
                        info.set(e);
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (email_value, password_value, &destination);
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign in"</h1>
                {notice.map(|text| view! { <p class="auth-notice" role="alert">{text}</p> })}
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <p class="auth-links">
                    <a href="/forgot-password">"Forgot password?"</a>
                    " · "
                    <a href="/signup">"Create an account"</a>
                </p>
            </div>
        </div>
    }
}
