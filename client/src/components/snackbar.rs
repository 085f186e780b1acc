//! Bottom-right snackbar for the current notification.

use leptos::prelude::*;

use crate::state::notify::Notifier;

#[component]
pub fn Snackbar() -> impl IntoView {
    let notifier = Notifier::expect();
    let current = move || notifier.state().with(|s| s.current.clone());

    move || {
        current().map(|note| {
            let id = note.id;
            view! {
                <div class=note.severity.class() role="status">
                    <span class="snackbar__message">{note.message}</span>
                    <button class="snackbar__close" title="Dismiss" on:click=move |_| notifier.dismiss(id)>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
