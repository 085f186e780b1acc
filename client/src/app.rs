//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns the session and notification contexts. The session is
//! rehydrated from `localStorage` once on mount; until then protected routes
//! show a spinner instead of redirecting.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::StaticSegment;
use leptos_router::components::{Redirect, Route, Router, Routes};
use session::Route as AppRoute;

use crate::components::{app_shell::AppShell, private_route::PrivateRoute, snackbar::Snackbar};
use crate::config::ClientConfig;
use crate::pages::{dashboard::DashboardPage, login::LoginPage, products::ProductsPage, signup::SignupPage};
use crate::state::auth::AuthContext;
use crate::state::notify::Notifier;

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthContext::provide(ClientConfig::from_build_env());
    Notifier::provide();

    Effect::new(move || {
        auth.initialize();
    });

    view! {
        <Title text="Stokio"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment(AppRoute::Login.segment()) view=LoginPage/>
                <Route path=StaticSegment(AppRoute::Signup.segment()) view=SignupPage/>
                <Route
                    path=StaticSegment(AppRoute::Dashboard.segment())
                    view=|| view! {
                        <PrivateRoute>
                            <AppShell>
                                <DashboardPage/>
                            </AppShell>
                        </PrivateRoute>
                    }
                />
                <Route
                    path=StaticSegment(AppRoute::Products.segment())
                    view=|| view! {
                        <PrivateRoute>
                            <AppShell>
                                <ProductsPage/>
                            </AppShell>
                        </PrivateRoute>
                    }
                />
                <Route path=StaticSegment("") view=|| view! { <Redirect path=AppRoute::Dashboard.path()/> }/>
            </Routes>
        </Router>
        <Snackbar/>
    }
}
