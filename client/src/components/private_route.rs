//! Route guard wrapper for protected pages.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Redirect;
use session::GuardDecision;

use crate::state::auth::AuthContext;

/// Render `children` only for an authenticated session.
///
/// While the persisted session is still being read this shows a spinner and
/// never redirects; once loaded, anonymous visitors are sent to `/login`
/// with the history entry replaced so Back cannot return here.
#[component]
pub fn PrivateRoute(children: ChildrenFn) -> impl IntoView {
    let auth = AuthContext::expect();
    // Memoized so profile edits do not remount the page.
    let decision = Memo::new(move |_| auth.decision());

    move || match decision.get() {
        GuardDecision::Loading => view! {
            <div class="route-loading" role="progressbar" aria-busy="true">
                <div class="spinner"></div>
            </div>
        }
        .into_any(),
        GuardDecision::Redirect { to, replace } => {
            let options = NavigateOptions {
                replace,
                ..NavigateOptions::default()
            };
            view! { <Redirect path=to options=options/> }.into_any()
        }
        GuardDecision::Render => children().into_any(),
    }
}
