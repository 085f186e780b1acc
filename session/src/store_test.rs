use futures::executor::block_on;

use super::*;
use crate::auth::DemoAuthenticator;
use crate::identity::Role;
use crate::storage::{MemoryStorage, StorageError};

// =============================================================
// Helpers
// =============================================================

fn alice() -> Identity {
    Identity::new("u-1", "alice@example.com", "Alice", Role::Manager)
}

fn grant(token: &str) -> Grant {
    Grant {
        identity: alice(),
        token: token.to_owned(),
    }
}

fn assert_pair_invariant(session: &Session) {
    assert_eq!(session.identity().is_some(), session.token().is_some());
}

/// Authenticator that accepts one fixed password.
struct FixedPassword {
    password: &'static str,
}

impl Authenticator for FixedPassword {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Grant, SessionError> {
        if credentials.password == self.password {
            Ok(Grant {
                identity: Identity::new("42", credentials.email.clone(), "Fixed", Role::Employee),
                token: "fixed-token".to_owned(),
            })
        } else {
            Err(SessionError::invalid_credentials())
        }
    }
}

/// Authenticator that is never reachable.
struct Offline;

impl Authenticator for Offline {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<Grant, SessionError> {
        Err(SessionError::ServiceUnavailable {
            message: "connection refused".to_owned(),
        })
    }
}

/// Storage that reads fine but refuses writes to one key.
struct RejectingWrites {
    inner: MemoryStorage,
    reject_key: &'static str,
}

impl SessionStorage for RejectingWrites {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == self.reject_key {
            return Err(StorageError::Backend("quota exceeded".to_owned()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

/// Storage whose reads always fail.
struct Unreadable;

impl SessionStorage for Unreadable {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("no window".to_owned()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("no window".to_owned()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("no window".to_owned()))
    }
}

/// Storage holding an undecodable blob until a key is removed.
#[derive(Default)]
struct CorruptBlob {
    cleared: std::cell::Cell<bool>,
}

impl SessionStorage for CorruptBlob {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        if self.cleared.get() {
            Ok(None)
        } else {
            Err(StorageError::Corrupt("EOF while parsing".to_owned()))
        }
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        self.get(key).map(|_| ())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        self.cleared.set(true);
        Ok(())
    }
}

// =============================================================
// Session
// =============================================================

#[test]
fn session_default_is_anonymous() {
    let session = Session::default();
    assert!(!session.is_authenticated());
    assert_pair_invariant(&session);
}

#[test]
fn session_authenticated_holds_both_halves() {
    let session = Session::authenticated(alice(), "t");
    assert_eq!(session.identity(), Some(&alice()));
    assert_eq!(session.token(), Some("t"));
    assert_pair_invariant(&session);
}

#[test]
fn session_debug_redacts_token() {
    let session = Session::authenticated(alice(), "super-secret");
    assert!(!format!("{session:?}").contains("super-secret"));
}

// =============================================================
// new / initialize
// =============================================================

#[test]
fn new_store_is_loading_and_anonymous() {
    let store = SessionStore::new(MemoryStorage::new());
    assert!(store.is_loading());
    assert!(store.identity().is_none());
    assert_eq!(store.decision(), GuardDecision::Loading);
}

#[test]
fn initialize_empty_storage_finishes_loading() {
    let mut store = SessionStore::new(MemoryStorage::new());
    assert_eq!(store.initialize(), Rehydration::Empty);
    assert!(!store.is_loading());
    assert!(store.identity().is_none());
    assert!(matches!(store.decision(), GuardDecision::Redirect { to: "/login", .. }));
}

#[test]
fn initialize_restores_persisted_pair() {
    let storage = MemoryStorage::new();
    storage.set(TOKEN_KEY, "tok").unwrap();
    storage.set(IDENTITY_KEY, &alice().to_json().unwrap()).unwrap();

    let mut store = SessionStore::new(storage);
    assert_eq!(store.initialize(), Rehydration::Restored);
    assert_eq!(store.identity(), Some(&alice()));
    assert_eq!(store.token(), Some("tok"));
    assert_eq!(store.decision(), GuardDecision::Render);
}

#[test]
fn initialize_corrupt_identity_clears_both_keys() {
    let storage = MemoryStorage::new();
    storage.set(TOKEN_KEY, "tok").unwrap();
    storage.set(IDENTITY_KEY, "{not json").unwrap();

    let mut store = SessionStore::new(storage.clone());
    assert_eq!(store.initialize(), Rehydration::Discarded);
    assert!(!store.is_loading());
    assert!(store.identity().is_none());
    assert!(!storage.contains(TOKEN_KEY));
    assert!(!storage.contains(IDENTITY_KEY));
}

#[test]
fn initialize_orphan_token_is_discarded() {
    let storage = MemoryStorage::new();
    storage.set(TOKEN_KEY, "tok").unwrap();

    let mut store = SessionStore::new(storage.clone());
    assert_eq!(store.initialize(), Rehydration::Discarded);
    assert!(storage.is_empty());
    assert_pair_invariant(store.session());
}

#[test]
fn initialize_orphan_identity_is_discarded() {
    let storage = MemoryStorage::new();
    storage.set(IDENTITY_KEY, &alice().to_json().unwrap()).unwrap();

    let mut store = SessionStore::new(storage.clone());
    assert_eq!(store.initialize(), Rehydration::Discarded);
    assert!(storage.is_empty());
}

#[test]
fn initialize_empty_token_is_discarded() {
    let storage = MemoryStorage::new();
    storage.set(TOKEN_KEY, "").unwrap();
    storage.set(IDENTITY_KEY, &alice().to_json().unwrap()).unwrap();

    let mut store = SessionStore::new(storage.clone());
    assert_eq!(store.initialize(), Rehydration::Discarded);
    assert!(store.identity().is_none());
}

#[test]
fn initialize_corrupt_backend_is_discarded_and_cleared() {
    let mut store = SessionStore::new(CorruptBlob::default());
    assert_eq!(store.initialize(), Rehydration::Discarded);
    assert!(store.storage().cleared.get());
    assert!(!store.is_loading());
    assert!(store.identity().is_none());

    let outcome = block_on(store.login(&DemoAuthenticator, "a@b.com", "pw"));
    assert!(outcome.success, "{outcome:?}");
    assert!(store.identity().is_some());
}

#[test]
fn initialize_unreadable_storage_starts_anonymous() {
    let mut store = SessionStore::new(Unreadable);
    assert_eq!(store.initialize(), Rehydration::Empty);
    assert!(!store.is_loading());
    assert!(store.identity().is_none());
}

// =============================================================
// login
// =============================================================

#[test]
fn login_with_empty_email_fails_and_leaves_session() {
    let storage = MemoryStorage::new();
    let mut store = SessionStore::new(storage.clone());
    store.initialize();

    let outcome = block_on(store.login(&DemoAuthenticator, "", "pw"));
    assert!(!outcome.success);
    assert_eq!(outcome.error, Some(SessionError::InvalidInput));
    assert_eq!(outcome.message.as_deref(), Some("Please fill in all fields"));
    assert!(store.identity().is_none());
    assert!(storage.is_empty());
}

#[test]
fn login_with_empty_password_fails_and_leaves_existing_session() {
    let storage = MemoryStorage::new();
    let mut store = SessionStore::resume(storage, Session::authenticated(alice(), "old"));

    let outcome = block_on(store.login(&DemoAuthenticator, "a@b.com", ""));
    assert!(!outcome.success);
    assert_eq!(store.identity(), Some(&alice()));
    assert_eq!(store.token(), Some("old"));
}

#[test]
fn login_success_persists_and_sets_session() {
    let storage = MemoryStorage::new();
    let mut store = SessionStore::new(storage.clone());
    store.initialize();

    let outcome = block_on(store.login(&FixedPassword { password: "pw" }, "bob@example.com", "pw"));
    assert!(outcome.success);
    assert_eq!(outcome.message, None);
    assert_eq!(store.identity().map(|i| i.email.as_str()), Some("bob@example.com"));
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("fixed-token"));
    assert!(storage.contains(IDENTITY_KEY));
    assert_pair_invariant(store.session());
}

#[test]
fn login_rejected_credentials_leave_session_empty() {
    let storage = MemoryStorage::new();
    let mut store = SessionStore::new(storage.clone());
    store.initialize();

    let outcome = block_on(store.login(&FixedPassword { password: "pw" }, "bob@example.com", "wrong"));
    assert!(!outcome.success);
    assert_eq!(outcome.message.as_deref(), Some("Invalid credentials"));
    assert!(store.identity().is_none());
    assert!(storage.is_empty());
}

#[test]
fn login_service_unavailable_is_reported() {
    let mut store = SessionStore::new(MemoryStorage::new());
    store.initialize();

    let outcome = block_on(store.login(&Offline, "a@b.com", "pw"));
    assert!(!outcome.success);
    assert!(matches!(outcome.error, Some(SessionError::ServiceUnavailable { .. })));
}

#[test]
fn login_then_restart_restores_equal_identity() {
    let storage = MemoryStorage::new();
    let identity_at_login = {
        let mut store = SessionStore::new(storage.clone());
        store.initialize();
        let outcome = block_on(store.login(&DemoAuthenticator, "admin@example.com", "password"));
        assert!(outcome.success);
        store.identity().cloned()
    };

    let mut restarted = SessionStore::new(storage);
    assert_eq!(restarted.initialize(), Rehydration::Restored);
    assert_eq!(restarted.identity().cloned(), identity_at_login);
}

#[test]
fn login_storage_failure_rolls_back_both_keys() {
    let storage = RejectingWrites {
        inner: MemoryStorage::new(),
        reject_key: IDENTITY_KEY,
    };
    let mut store = SessionStore::new(&storage);
    store.initialize();

    let outcome = block_on(store.login(&DemoAuthenticator, "a@b.com", "pw"));
    assert!(!outcome.success);
    assert!(matches!(outcome.error, Some(SessionError::Storage(_))));
    assert!(store.identity().is_none());
    assert!(storage.inner.is_empty());
}

// =============================================================
// establish / logout
// =============================================================

#[test]
fn establish_finishes_loading() {
    let mut store = SessionStore::new(MemoryStorage::new());
    store.establish(grant("t")).unwrap();
    assert!(!store.is_loading());
    assert_eq!(store.decision(), GuardDecision::Render);
}

#[test]
fn logout_removes_keys_and_session() {
    let storage = MemoryStorage::new();
    let mut store = SessionStore::new(storage.clone());
    store.establish(grant("t")).unwrap();

    store.logout();
    assert!(store.identity().is_none());
    assert!(store.token().is_none());
    assert!(!storage.contains(TOKEN_KEY));
    assert!(!storage.contains(IDENTITY_KEY));
}

#[test]
fn logout_when_anonymous_is_harmless() {
    let mut store = SessionStore::new(MemoryStorage::new());
    store.logout();
    store.logout();
    assert!(!store.is_loading());
    assert!(store.identity().is_none());
}

#[test]
fn logout_with_failing_storage_still_clears_memory() {
    let mut store = SessionStore::resume(Unreadable, Session::authenticated(alice(), "t"));
    store.logout();
    assert!(store.identity().is_none());
}

// =============================================================
// update_identity / handle_unauthorized
// =============================================================

#[test]
fn update_identity_keeps_token_and_persists() {
    let storage = MemoryStorage::new();
    let mut store = SessionStore::new(storage.clone());
    store.establish(grant("keep-me")).unwrap();

    let renamed = Identity::new("u-1", "alice@example.com", "Alice Cooper", Role::Admin);
    store.update_identity(renamed.clone()).unwrap();

    assert_eq!(store.identity(), Some(&renamed));
    assert_eq!(store.token(), Some("keep-me"));
    let persisted = storage.get(IDENTITY_KEY).unwrap().unwrap();
    assert_eq!(Identity::from_json(&persisted).unwrap(), renamed);
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("keep-me"));
}

#[test]
fn update_identity_without_session_is_rejected() {
    let storage = MemoryStorage::new();
    let mut store = SessionStore::new(storage.clone());
    store.initialize();

    assert_eq!(store.update_identity(alice()), Err(SessionError::NotAuthenticated));
    assert!(storage.is_empty());
    assert_pair_invariant(store.session());
}

#[test]
fn update_identity_write_failure_keeps_previous_identity() {
    let storage = RejectingWrites {
        inner: MemoryStorage::new(),
        reject_key: IDENTITY_KEY,
    };
    let mut store = SessionStore::resume(&storage, Session::authenticated(alice(), "t"));

    let result = store.update_identity(Identity::new("u-1", "x@y.z", "X", Role::Employee));
    assert!(matches!(result, Err(SessionError::Storage(_))));
    assert_eq!(store.identity(), Some(&alice()));
}

#[test]
fn handle_unauthorized_logs_out() {
    let storage = MemoryStorage::new();
    let mut store = SessionStore::new(storage.clone());
    store.establish(grant("stale")).unwrap();

    store.handle_unauthorized();
    assert!(store.identity().is_none());
    assert!(storage.is_empty());
    assert!(matches!(store.decision(), GuardDecision::Redirect { .. }));
}

#[test]
fn resume_is_not_loading() {
    let store = SessionStore::resume(MemoryStorage::new(), Session::anonymous());
    assert!(!store.is_loading());
}
