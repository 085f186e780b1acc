//! Account registration page.
//!
//! Public route. Validation happens locally before `POST /auth/register`;
//! a created account is sent to `/login` rather than signed in, since the
//! register endpoint issues no token.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::Route;

use crate::net::api::Api;
use crate::net::types::Registration;
use crate::state::notify::Notifier;

pub(crate) const MIN_PASSWORD_LEN: usize = 6;

/// Check the form and build the request body.
///
/// # Errors
///
/// Returns the message to show inline.
pub(crate) fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<Registration, &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() || confirm_password.is_empty() {
        return Err("Please fill in all fields");
    }
    if !email.contains('@') {
        return Err("Please enter a valid email address");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters");
    }
    if password != confirm_password {
        return Err("Passwords do not match");
    }
    Ok(Registration {
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        confirm_password: confirm_password.to_owned(),
    })
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let api = Api::expect();
    let notify = Notifier::expect();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let registration = match validate_registration(
            &name.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
            &confirm.get_untracked(),
        ) {
            Ok(registration) => registration,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let result = api.register(&registration).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    notify.success("Account created. Please sign in.");
                    navigate(Route::Login.path(), NavigateOptions::default());
                }
                Err(e) => {
                    let message = e.to_string();
                    notify.error(message.clone());
                    error.set(Some(message));
                }
            }
        });
    };

    let field = move |signal: RwSignal<String>, kind: &'static str, placeholder: &'static str| {
        view! {
            <input
                class="login-input"
                type=kind
                placeholder=placeholder
                prop:value=move || signal.get()
                on:input=move |ev| signal.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Stokio"</h1>
                <p class="login-card__subtitle">"Create your account"</p>
                <form class="login-form" on:submit=on_submit>
                    {field(name, "text", "Full name")}
                    {field(email, "email", "you@example.com")}
                    {field(password, "password", "Password")}
                    {field(confirm, "password", "Confirm password")}
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Sign Up" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">
                    "Already registered? "
                    <a href=Route::Login.path()>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
