//! Credentials, grants and the authenticator seam.
//!
//! DESIGN
//! ======
//! The store never talks to the network itself. It hands validated
//! [`Credentials`] to an [`Authenticator`] and persists whatever [`Grant`]
//! comes back. Backend authenticators live next to each front end's HTTP
//! stack; [`DemoAuthenticator`] fabricates a grant and must be opted into.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::identity::{Identity, Role};

/// Path of the login endpoint, relative to the API base URL.
pub const LOGIN_PATH: &str = "/auth/login";

/// Login form input, validated for presence.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Validate that both fields are present.
    ///
    /// The email is trimmed; the password is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidInput`] when either field is empty.
    pub fn new(email: &str, password: &str) -> Result<Self, SessionError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(SessionError::InvalidInput);
        }
        Ok(Self {
            email: email.to_owned(),
            password: password.to_owned(),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An identity and the bearer token issued for it.
#[derive(Clone, PartialEq, Eq)]
pub struct Grant {
    pub identity: Identity,
    pub token: String,
}

impl std::fmt::Debug for Grant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grant")
            .field("identity", &self.identity)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Body returned by `POST /auth/login`.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Identity,
}

impl From<LoginResponse> for Grant {
    fn from(response: LoginResponse) -> Self {
        Self {
            identity: response.user,
            token: response.token,
        }
    }
}

/// Turns credentials into a [`Grant`].
///
/// Backend implementations map 4xx to [`SessionError::InvalidCredentials`]
/// and network or 5xx failures to [`SessionError::ServiceUnavailable`]
/// (see [`crate::http::login_failure`]).
pub trait Authenticator {
    fn authenticate(&self, credentials: &Credentials) -> impl Future<Output = Result<Grant, SessionError>>;
}

/// Offline authenticator that accepts any credentials.
///
/// Every login yields an `ADMIN` identity named "Admin User" with a fresh
/// random token. Only for demos and local UI work; nothing verifies the
/// password.
#[derive(Clone, Copy, Debug, Default)]
pub struct DemoAuthenticator;

impl DemoAuthenticator {
    /// Display name given to every demo identity.
    pub const DISPLAY_NAME: &'static str = "Admin User";

    /// Build the fabricated grant for `credentials`.
    #[must_use]
    pub fn grant_for(credentials: &Credentials) -> Grant {
        Grant {
            identity: Identity::new("1", credentials.email.clone(), Self::DISPLAY_NAME, Role::Admin),
            token: format!("demo-{}", uuid::Uuid::new_v4().simple()),
        }
    }
}

impl Authenticator for DemoAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Grant, SessionError> {
        tracing::warn!(email = %credentials.email, "demo authenticator issued an unverified session");
        Ok(Self::grant_for(credentials))
    }
}
