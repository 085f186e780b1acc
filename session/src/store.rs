//! Session store: the single source of truth for who is logged in.
//!
//! DESIGN
//! ======
//! The identity and token live in one `Option` so they are set and cleared
//! together. Every mutation writes durable storage first and the in-memory
//! [`Session`] second; when a storage write fails halfway the store falls
//! back to the logged-out state on both sides.
//!
//! `loading` starts `true` and only [`SessionStore::initialize`] (or a
//! resumed snapshot) clears it, so a guard can never redirect before the
//! persisted session has been read.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::auth::{Authenticator, Credentials, Grant};
use crate::error::SessionError;
use crate::guard::{self, GuardDecision};
use crate::identity::Identity;
use crate::storage::{IDENTITY_KEY, SessionStorage, StorageError, TOKEN_KEY};

/// The authenticated state: an identity with its bearer token, or nothing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    inner: Option<(Identity, String)>,
}

impl Session {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn authenticated(identity: Identity, token: impl Into<String>) -> Self {
        Self {
            inner: Some((identity, token.into())),
        }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.inner.as_ref().map(|(identity, _)| identity)
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.inner.as_ref().map(|(_, token)| token.as_str())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.is_some()
    }
}

impl From<Grant> for Session {
    fn from(grant: Grant) -> Self {
        Self::authenticated(grant.identity, grant.token)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("identity", &self.identity())
            .field("token", &self.token().map(|_| "<redacted>"))
            .finish()
    }
}

/// What [`SessionStore::initialize`] found in storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rehydration {
    /// A valid token and identity were restored.
    Restored,
    /// Nothing was persisted, or storage could not be read.
    Empty,
    /// Persisted data was unusable and has been cleared.
    Discarded,
}

/// Result of a login attempt, for the form that triggered it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginOutcome {
    pub success: bool,
    pub message: Option<String>,
    /// The failure kind, kept for callers that branch on it.
    pub error: Option<SessionError>,
}

impl LoginOutcome {
    fn succeeded() -> Self {
        Self {
            success: true,
            message: None,
            error: None,
        }
    }

    fn failed(error: SessionError) -> Self {
        Self {
            success: false,
            message: Some(error.to_string()),
            error: Some(error),
        }
    }
}

/// Session state plus the durable storage it is mirrored to.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    session: Session,
    loading: bool,
}

impl<S: SessionStorage> SessionStore<S> {
    /// A fresh store: anonymous and still loading.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            session: Session::anonymous(),
            loading: true,
        }
    }

    /// A store over an already-initialized snapshot.
    ///
    /// The snapshot is trusted to match storage; use this when the session
    /// is kept elsewhere (e.g. a reactive signal) and the store only applies
    /// one operation.
    pub fn resume(storage: S, session: Session) -> Self {
        Self {
            storage,
            session,
            loading: false,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.session.identity()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Guard decision for a protected view under the current state.
    #[must_use]
    pub fn decision(&self) -> GuardDecision {
        guard::evaluate(self.loading, self.identity())
    }

    /// Rehydrate the session from storage and finish loading.
    ///
    /// Unusable data (an unparsable identity, only one of the two keys, or a
    /// backend reporting [`StorageError::Corrupt`]) is removed; any other
    /// read failure leaves the session anonymous. `loading` is `false`
    /// afterwards in every case.
    pub fn initialize(&mut self) -> Rehydration {
        let outcome = match self.read_persisted() {
            Ok(Some(session)) => {
                self.session = session;
                Rehydration::Restored
            }
            Ok(None) => {
                self.session = Session::anonymous();
                Rehydration::Empty
            }
            Err(SessionError::StorageCorrupt(reason)) => {
                tracing::warn!(%reason, "discarding persisted session");
                self.clear_persisted();
                self.session = Session::anonymous();
                Rehydration::Discarded
            }
            Err(error) => {
                tracing::warn!(%error, "session storage unreadable; starting anonymous");
                self.session = Session::anonymous();
                Rehydration::Empty
            }
        };
        self.loading = false;
        tracing::debug!(?outcome, authenticated = self.session.is_authenticated(), "session initialized");
        outcome
    }

    /// Validate input, authenticate and persist the resulting session.
    ///
    /// Never fails outward: errors are folded into the [`LoginOutcome`].
    /// Invalid input and rejected credentials leave the session unchanged.
    pub async fn login<A: Authenticator>(&mut self, authenticator: &A, email: &str, secret: &str) -> LoginOutcome {
        let credentials = match Credentials::new(email, secret) {
            Ok(credentials) => credentials,
            Err(error) => return LoginOutcome::failed(error),
        };
        let grant = match authenticator.authenticate(&credentials).await {
            Ok(grant) => grant,
            Err(error) => {
                tracing::info!(email = %credentials.email, %error, "login rejected");
                return LoginOutcome::failed(error);
            }
        };
        match self.establish(grant) {
            Ok(()) => {
                tracing::info!(email = %credentials.email, "login succeeded");
                LoginOutcome::succeeded()
            }
            Err(error) => LoginOutcome::failed(error),
        }
    }

    /// Persist `grant` and make it the current session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the pair cannot be written; the
    /// store is then logged out on both sides.
    pub fn establish(&mut self, grant: Grant) -> Result<(), SessionError> {
        let raw = grant
            .identity
            .to_json()
            .map_err(|e| SessionError::StorageCorrupt(e.to_string()))?;
        let written = self
            .storage
            .set(TOKEN_KEY, &grant.token)
            .and_then(|()| self.storage.set(IDENTITY_KEY, &raw));
        if let Err(error) = written {
            tracing::warn!(%error, "failed to persist session; clearing");
            self.clear_persisted();
            self.session = Session::anonymous();
            self.loading = false;
            return Err(error.into());
        }
        self.session = Session::from(grant);
        self.loading = false;
        Ok(())
    }

    /// Clear storage and the in-memory session. Always succeeds.
    pub fn logout(&mut self) {
        self.clear_persisted();
        self.session = Session::anonymous();
        self.loading = false;
        tracing::info!("logged out");
    }

    /// Replace the identity without touching the token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when nobody is logged in,
    /// or [`SessionError::Storage`] when the identity cannot be written (the
    /// in-memory session is left as it was).
    pub fn update_identity(&mut self, identity: Identity) -> Result<(), SessionError> {
        let Some(token) = self.session.token().map(str::to_owned) else {
            return Err(SessionError::NotAuthenticated);
        };
        let raw = identity
            .to_json()
            .map_err(|e| SessionError::StorageCorrupt(e.to_string()))?;
        self.storage.set(IDENTITY_KEY, &raw)?;
        self.session = Session::authenticated(identity, token);
        Ok(())
    }

    /// React to a 401 from any backend call: the token is stale, log out.
    pub fn handle_unauthorized(&mut self) {
        tracing::warn!("backend rejected the session token");
        self.logout();
    }

    fn read_persisted(&self) -> Result<Option<Session>, SessionError> {
        let token = self.read(TOKEN_KEY)?;
        let raw = self.read(IDENTITY_KEY)?;
        match (token, raw) {
            (None, None) => Ok(None),
            (Some(token), Some(raw)) => {
                if token.is_empty() {
                    return Err(SessionError::StorageCorrupt("empty token".to_owned()));
                }
                let identity = Identity::from_json(&raw).map_err(|e| SessionError::StorageCorrupt(e.to_string()))?;
                Ok(Some(Session::authenticated(identity, token)))
            }
            (Some(_), None) => Err(SessionError::StorageCorrupt("token without identity".to_owned())),
            (None, Some(_)) => Err(SessionError::StorageCorrupt("identity without token".to_owned())),
        }
    }

    fn read(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.storage.get(key).map_err(|error| match error {
            StorageError::Corrupt(reason) => SessionError::StorageCorrupt(reason),
            other => SessionError::Storage(other),
        })
    }

    fn clear_persisted(&self) {
        for key in [TOKEN_KEY, IDENTITY_KEY] {
            if let Err(error) = self.storage.remove(key) {
                tracing::warn!(key, %error, "failed to remove session key");
            }
        }
    }
}
