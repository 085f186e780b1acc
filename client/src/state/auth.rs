//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides one [`AuthContext`]; the `PrivateRoute` guard, the header
//! and the REST client read it, and the login/logout controls drive it.
//!
//! DESIGN
//! ======
//! The reactive signal holds the session snapshot. Each operation builds a
//! short-lived `SessionStore` over that snapshot and the context's storage
//! (`localStorage` in the app), applies itself, and writes the resulting
//! snapshot back, so the signal and storage change together.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;
use session::{
    DemoAuthenticator, GuardDecision, Identity, LoginOutcome, Rehydration, Session, SessionError, SessionStorage,
    SessionStore, guard,
};

use crate::config::ClientConfig;
use crate::net::api::ApiAuthenticator;
use crate::util::storage::BrowserStorage;

/// Authentication state tracking the current session and loading status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub session: Session,
    /// `true` until the persisted session has been read.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: Session::anonymous(),
            loading: true,
        }
    }
}

impl AuthState {
    /// Snapshot a store's state.
    pub fn from_store<S: SessionStorage>(store: &SessionStore<S>) -> Self {
        Self {
            session: store.session().clone(),
            loading: store.is_loading(),
        }
    }

    pub fn user(&self) -> Option<&Identity> {
        self.session.identity()
    }

    /// Route guard decision for a protected view.
    pub fn decision(&self) -> GuardDecision {
        guard::evaluate(self.loading, self.user())
    }
}

type SharedStorage = Arc<dyn SessionStorage + Send + Sync>;

/// Session service injected into the view tree.
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: RwSignal<AuthState>,
    storage: StoredValue<SharedStorage>,
    config: ClientConfig,
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AuthContext {
    /// A context persisting to `localStorage`.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_storage(config, BrowserStorage)
    }

    /// A context persisting to `storage`.
    pub fn with_storage(config: ClientConfig, storage: impl SessionStorage + Send + Sync + 'static) -> Self {
        let storage: SharedStorage = Arc::new(storage);
        Self {
            state: RwSignal::new(AuthState::default()),
            storage: StoredValue::new(storage),
            config,
        }
    }

    /// Create a context and provide it to descendants.
    pub fn provide(config: ClientConfig) -> Self {
        let auth = Self::new(config);
        provide_context(auth);
        auth
    }

    /// Fetch the context provided by `App`.
    pub fn expect() -> Self {
        expect_context::<Self>()
    }

    pub fn state(self) -> RwSignal<AuthState> {
        self.state
    }

    pub fn config(self) -> ClientConfig {
        self.config
    }

    /// Tracked guard decision.
    pub fn decision(self) -> GuardDecision {
        self.state.with(AuthState::decision)
    }

    /// Tracked current user.
    pub fn user(self) -> Option<Identity> {
        self.state.with(|s| s.user().cloned())
    }

    /// Current bearer token, read without subscribing.
    pub fn token(self) -> Option<String> {
        self.state.with_untracked(|s| s.session.token().map(str::to_owned))
    }

    /// Rehydrate from storage and clear the loading flag.
    pub fn initialize(self) -> Rehydration {
        let mut store = SessionStore::new(self.storage.get_value());
        let outcome = store.initialize();
        self.commit(&store);
        outcome
    }

    /// Authenticate and persist a new session.
    pub async fn login(self, email: String, password: String) -> LoginOutcome {
        let mut store = self.operator();
        let outcome = if self.config.demo_auth {
            store.login(&DemoAuthenticator, &email, &password).await
        } else {
            store
                .login(&ApiAuthenticator::new(self.config.api_base_url), &email, &password)
                .await
        };
        self.commit(&store);
        outcome
    }

    /// Drop the session locally and in storage.
    pub fn logout(self) {
        let mut store = self.operator();
        store.logout();
        self.commit(&store);
    }

    /// Replace the profile data without re-authenticating.
    ///
    /// # Errors
    ///
    /// Fails when nobody is logged in or the identity cannot be persisted.
    pub fn update_identity(self, identity: Identity) -> Result<(), SessionError> {
        let mut store = self.operator();
        let result = store.update_identity(identity);
        self.commit(&store);
        result
    }

    /// The backend rejected our token: log out so the guard redirects.
    pub fn expire(self) {
        let mut store = self.operator();
        store.handle_unauthorized();
        self.commit(&store);
    }

    fn operator(self) -> SessionStore<SharedStorage> {
        let snapshot = self.state.with_untracked(|s| s.session.clone());
        SessionStore::resume(self.storage.get_value(), snapshot)
    }

    /// Publish the store's state; returns whether subscribers were notified.
    fn commit(self, store: &SessionStore<SharedStorage>) -> bool {
        let next = AuthState::from_store(store);
        let changed = self.state.with_untracked(|current| current != &next);
        if changed {
            self.state.set(next);
        }
        changed
    }
}
