//! Root application component with routing.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::protected_route::ProtectedRoute;
use crate::pages::{
    auth_callback::AuthCallbackPage, check_email::CheckEmailPage, dashboard::DashboardPage,
    forgot_password::ForgotPasswordPage, home::HomePage, login::LoginPage, signup::SignupPage,
};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Every protected page is wrapped in [`ProtectedRoute`]; the server guard
/// covers full page loads, the component covers client-side navigations.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/storefront.css"/>
        <Title text="Storefront"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("signup") view=SignupPage/>
                <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                <Route path=StaticSegment("check-email") view=CheckEmailPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=AuthCallbackPage/>
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <ProtectedRoute><DashboardPage/></ProtectedRoute> }
                />
            </Routes>
        </Router>
    }
}
