//! Forgot-password page: request a reset link by email.

#[cfg(test)]
#[path = "forgot_password_test.rs"]
mod forgot_password_test;

use leptos::prelude::*;

/// Confirmation shown after a reset request, whether or not the account
/// exists.
pub(crate) fn reset_sent_message(email: &str) -> String {
    format!("If an account exists for {email}, a reset link is on its way.")
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        if !email_value.contains('@') {
            info.set("Enter a valid email address.".to_owned());
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::recover(&email_value).await {
                Ok(()) => info.set(reset_sent_message(&email_value)),
                Err(e) => info.set(e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        info.set(reset_sent_message(&email_value));
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Reset your password"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Send reset link"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <p class="auth-links"><a href="/login">"Back to sign in"</a></p>
            </div>
        </div>
    }
}
