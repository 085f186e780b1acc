//! Login page with email + password authentication.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public route. Missing fields are reported inline without contacting the
//! backend; rejected credentials show both inline and as a notification.
//! A successful login lands on `/dashboard`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::{Credentials, GuardDecision, Route};

use crate::state::auth::AuthContext;
use crate::state::notify::Notifier;

pub(crate) const SUCCESS_MESSAGE: &str = "Login successful!";

/// Inline error for an incomplete form, or `None` when it can be submitted.
pub(crate) fn validation_error(email: &str, password: &str) -> Option<String> {
    Credentials::new(email, password).err().map(|e| e.to_string())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = AuthContext::expect();
    let notify = Notifier::expect();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    // Already signed in (e.g. restored session): skip the form.
    let navigate_home = navigate.clone();
    Effect::new(move || {
        if auth.decision() == GuardDecision::Render {
            navigate_home(
                Route::Dashboard.path(),
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if let Some(message) = validation_error(&email_value, &password_value) {
            error.set(Some(message));
            return;
        }
        error.set(None);
        busy.set(true);

        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let outcome = auth.login(email_value, password_value).await;
            busy.set(false);
            if outcome.success {
                notify.success(SUCCESS_MESSAGE);
                navigate(Route::Dashboard.path(), NavigateOptions::default());
            } else {
                let message = outcome.message.unwrap_or_default();
                notify.error(message.clone());
                error.set(Some(message));
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Stokio"</h1>
                <p class="login-card__subtitle">"Sign in to manage your inventory"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || auth.config().demo_auth>
                    <p class="login-message">"Demo mode: any email and password will sign you in."</p>
                </Show>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">
                    "No account? "
                    <a href=Route::Signup.path()>"Sign up"</a>
                </p>
            </div>
        </div>
    }
}
