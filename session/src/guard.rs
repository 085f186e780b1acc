//! Route guard decision and the application route table.
//!
//! SYSTEM CONTEXT
//! ==============
//! The SPA's `PrivateRoute` component and the CLI's authenticated commands
//! both ask [`evaluate`] what to do; neither branches on session state
//! directly.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::identity::Identity;

/// What a guarded view should do for the current session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session initialization has not finished; show a neutral placeholder.
    Loading,
    /// Nobody is logged in; navigate to `to`, replacing the history entry
    /// when `replace` is set.
    Redirect { to: &'static str, replace: bool },
    /// Render the requested view.
    Render,
}

/// Decide how a protected view renders.
///
/// Pure in `(loading, identity)`; the identity's role is not consulted.
#[must_use]
pub fn evaluate(loading: bool, identity: Option<&Identity>) -> GuardDecision {
    if loading {
        return GuardDecision::Loading;
    }
    match identity {
        Some(_) => GuardDecision::Render,
        None => GuardDecision::Redirect {
            to: Route::Login.path(),
            replace: true,
        },
    }
}

/// Named application routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    Dashboard,
    Products,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Login, Route::Signup, Route::Dashboard, Route::Products];

    /// Absolute path of the route.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Dashboard => "/dashboard",
            Self::Products => "/products",
        }
    }

    /// Path without the leading slash, as a router segment.
    #[must_use]
    pub fn segment(self) -> &'static str {
        self.path().trim_start_matches('/')
    }

    /// Whether the route sits behind the guard.
    #[must_use]
    pub fn is_protected(self) -> bool {
        !matches!(self, Self::Login | Self::Signup)
    }

    /// Look up a route by path. A trailing slash is ignored; `/` maps to the
    /// dashboard.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Self::Dashboard);
        }
        Self::ALL.into_iter().find(|route| route.path() == trimmed)
    }

    /// Guard decision for visiting this route. Public routes always render.
    #[must_use]
    pub fn decide(self, loading: bool, identity: Option<&Identity>) -> GuardDecision {
        if self.is_protected() {
            evaluate(loading, identity)
        } else {
            GuardDecision::Render
        }
    }
}
