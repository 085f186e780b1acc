//! HTTP policy shared by the browser and CLI REST clients.
//!
//! Both front ends attach the same bearer header, treat 401 the same way and
//! map login failures to the same error kinds; the transport differs.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use crate::error::SessionError;

/// Name of the header carrying the bearer token.
pub const AUTHORIZATION: &str = "Authorization";

/// `Authorization` header value for `token`.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Join an API base URL and an endpoint path with exactly one slash.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Coarse outcome of an HTTP response status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    /// 401: the bearer token is no longer accepted.
    Unauthorized,
    /// Any other 4xx.
    ClientError,
    /// 5xx, or anything outside the ranges above.
    ServerError,
}

/// Classify a status code.
#[must_use]
pub fn classify(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        401 => StatusClass::Unauthorized,
        400..=499 => StatusClass::ClientError,
        _ => StatusClass::ServerError,
    }
}

/// Whether a response to an authenticated call must end the session.
///
/// A 401 from the login endpoint itself means bad credentials, not an
/// expired session.
#[must_use]
pub fn ends_session(path: &str, status: u16) -> bool {
    classify(status) == StatusClass::Unauthorized && path != crate::auth::LOGIN_PATH
}

/// Map a failed `POST /auth/login` response to a session error.
///
/// `message` is the backend's `message` field, when it sent one.
#[must_use]
pub fn login_failure(status: u16, message: Option<String>) -> SessionError {
    match classify(status) {
        StatusClass::Unauthorized | StatusClass::ClientError => match message {
            Some(message) if !message.trim().is_empty() => SessionError::InvalidCredentials { message },
            _ => SessionError::invalid_credentials(),
        },
        StatusClass::Success | StatusClass::ServerError => SessionError::ServiceUnavailable {
            message: message.unwrap_or_else(|| format!("HTTP {status}")),
        },
    }
}

/// Pull a human-readable `message` out of an error body, if present.
#[must_use]
pub fn error_message(body: &serde_json::Value) -> Option<String> {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
}
