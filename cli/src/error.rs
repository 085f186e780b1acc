//! CLI error type.

use session::SessionError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("not logged in; run `stokio login` first")]
    NotLoggedIn,
    #[error("session expired; run `stokio login` again")]
    SessionExpired,
    #[error("login failed: {0}")]
    Login(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
