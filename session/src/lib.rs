//! Client-side session and authorization gate for the Stokio admin tools.
//!
//! This crate owns the one piece of the admin front ends with a real
//! contract: who is logged in, how that survives a reload or restart, and
//! whether a protected view may render. It is shared by the `client` SPA
//! (browser `localStorage`) and the `cli` (session file).
//!
//! ARCHITECTURE
//! ============
//! - [`identity`]: the persisted user record and its role.
//! - [`storage`]: the durable key-value seam plus an in-memory backend.
//! - [`auth`]: credentials, grants and the [`Authenticator`] seam.
//! - [`store`]: the [`SessionStore`] tying storage and session together.
//! - [`guard`]: the pure route-guard decision and the route table.
//! - [`http`]: bearer header and status-code policy shared by REST clients.

pub mod auth;
pub mod error;
pub mod guard;
pub mod http;
pub mod identity;
pub mod storage;
pub mod store;

pub use auth::{Authenticator, Credentials, DemoAuthenticator, Grant, LoginResponse};
pub use error::SessionError;
pub use guard::{GuardDecision, Route};
pub use identity::{Identity, Role};
pub use storage::{MemoryStorage, SessionStorage, StorageError};
pub use store::{LoginOutcome, Rehydration, Session, SessionStore};
