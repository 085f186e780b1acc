//! Error kinds surfaced by the session core.
//!
//! None of these are fatal: every path ends with the user back at the login
//! view or an inline message.

use crate::storage::StorageError;

/// Failure of a session operation or of an authenticated backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Required login fields were missing.
    #[error("Please fill in all fields")]
    InvalidInput,
    /// The authenticator rejected the credentials.
    #[error("{message}")]
    InvalidCredentials { message: String },
    /// The authenticator could not be reached or failed server-side.
    #[error("authentication service unavailable: {message}")]
    ServiceUnavailable { message: String },
    /// The persisted identity could not be parsed.
    #[error("stored session is corrupt: {0}")]
    StorageCorrupt(String),
    /// A backend call answered 401.
    #[error("session expired, please sign in again")]
    Unauthorized,
    /// An identity update was attempted with nobody logged in.
    #[error("no active session")]
    NotAuthenticated,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// Message for the default rejected-credentials case.
    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials {
            message: "Invalid credentials".to_owned(),
        }
    }
}
