//! Header, navigation, and profile controls around protected pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered inside `PrivateRoute`, so a user is always present while this is
//! mounted. Logging out clears the session and navigates to `/login`,
//! replacing history.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_navigate};
use session::Route;

use crate::state::auth::AuthContext;
use crate::state::notify::Notifier;

const NAV: [(Route, &str); 2] = [(Route::Dashboard, "Dashboard"), (Route::Products, "Products")];

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let auth = AuthContext::expect();
    let notify = Notifier::expect();
    let navigate = use_navigate();
    let pathname = use_location().pathname;

    let display_name = move || auth.user().map(|u| u.display_name).unwrap_or_default();
    let initials = move || auth.user().map(|u| u.initials()).unwrap_or_default();
    let role = move || auth.user().map(|u| u.role.label()).unwrap_or_default();

    let editing = RwSignal::new(false);
    let draft = RwSignal::new(String::new());

    let start_edit = move |_: leptos::ev::MouseEvent| {
        draft.set(display_name());
        editing.set(true);
    };

    let save_name = move || {
        // Blur fires again when the input unmounts after Enter or Escape.
        if !editing.get_untracked() {
            return;
        }
        let name = draft.get_untracked().trim().to_owned();
        editing.set(false);
        if name.is_empty() {
            return;
        }
        let Some(mut identity) = auth.user() else {
            return;
        };
        if identity.display_name == name {
            return;
        }
        identity.display_name = name;
        match auth.update_identity(identity) {
            Ok(()) => notify.success("Profile updated"),
            Err(e) => notify.error(e.to_string()),
        }
    };

    let on_logout = move |_: leptos::ev::MouseEvent| {
        auth.logout();
        navigate(
            Route::Login.path(),
            NavigateOptions {
                replace: true,
                ..NavigateOptions::default()
            },
        );
    };

    view! {
        <div class="app-shell">
            <header class="app-shell__header">
                <span class="app-shell__brand">"Stokio"</span>
                <nav class="app-shell__nav">
                    {NAV
                        .into_iter()
                        .map(|(route, label)| {
                            let active = move || pathname.get() == route.path();
                            view! {
                                <A href=route.path()>
                                    <span class="app-shell__link" class:app-shell__link--active=active>
                                        {label}
                                    </span>
                                </A>
                            }
                        })
                        .collect_view()}
                </nav>
                <span class="app-shell__spacer"></span>
                <span class="app-shell__avatar" title=display_name>{initials}</span>
                <Show
                    when=move || editing.get()
                    fallback=move || {
                        view! {
                            <button class="app-shell__name" title="Edit display name" on:click=start_edit>
                                {display_name}
                            </button>
                        }
                    }
                >
                    <input
                        class="app-shell__name-input"
                        type="text"
                        prop:value=move || draft.get()
                        on:input=move |ev| draft.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            match ev.key().as_str() {
                                "Enter" => save_name(),
                                "Escape" => editing.set(false),
                                _ => {}
                            }
                        }
                        on:blur=move |_| save_name()
                    />
                </Show>
                <span class="app-shell__role">{role}</span>
                <button class="btn app-shell__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </header>
            <main class="app-shell__main">{children()}</main>
        </div>
    }
}
