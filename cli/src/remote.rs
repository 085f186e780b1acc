//! Backend HTTP access for the CLI.
//!
//! ERROR HANDLING
//! ==============
//! A 401 from any authenticated call logs the session store out (clearing
//! the session file) and surfaces as [`CliError::SessionExpired`]. Other
//! non-2xx responses become [`CliError::Server`] carrying the backend's
//! `message` field when it sent one.

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use reqwest::Method;
use serde_json::Value;
use session::http::{AUTHORIZATION, StatusClass, bearer, classify, ends_session, error_message, join_url, login_failure};
use session::{Authenticator, Credentials, Grant, LoginResponse, SessionError, SessionStorage, SessionStore};

use crate::error::CliError;

/// One REST call, resolved from a subcommand before any I/O.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl Call {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append `key=value` when `value` is present.
    #[must_use]
    pub fn with_param(mut self, key: &'static str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.query.push((key, value));
        }
        self
    }
}

/// Decode a response body; empty is `null`, non-JSON is kept as a string.
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

#[derive(Clone, Debug)]
pub struct Remote {
    client: reqwest::Client,
    base_url: String,
}

impl Remote {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Send `call` with the store's bearer token.
    ///
    /// # Errors
    ///
    /// [`CliError::NotLoggedIn`] without a session, [`CliError::SessionExpired`]
    /// on 401, [`CliError::Server`] on any other failure status.
    pub async fn send<S: SessionStorage>(&self, store: &mut SessionStore<S>, call: Call) -> Result<Value, CliError> {
        let token = store.token().ok_or(CliError::NotLoggedIn)?.to_owned();
        let url = join_url(&self.base_url, &call.path);
        tracing::debug!(method = %call.method, %url, "api request");

        let mut request = self
            .client
            .request(call.method, &url)
            .header(AUTHORIZATION, bearer(&token));
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let value = parse_body(&response.text().await?);
        match classify(status) {
            StatusClass::Success => Ok(value),
            StatusClass::Unauthorized if ends_session(&call.path, status) => {
                store.handle_unauthorized();
                Err(CliError::SessionExpired)
            }
            _ => Err(CliError::Server {
                status,
                message: error_message(&value).unwrap_or_else(|| value.to_string()),
            }),
        }
    }

    pub fn authenticator(&self) -> ReqwestAuthenticator<'_> {
        ReqwestAuthenticator { remote: self }
    }
}

/// Backend authenticator calling `POST /auth/login`.
#[derive(Clone, Copy, Debug)]
pub struct ReqwestAuthenticator<'a> {
    remote: &'a Remote,
}

impl Authenticator for ReqwestAuthenticator<'_> {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Grant, SessionError> {
        let url = join_url(&self.remote.base_url, session::auth::LOGIN_PATH);
        let unavailable = |e: reqwest::Error| SessionError::ServiceUnavailable { message: e.to_string() };
        let response = self
            .remote
            .client
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(unavailable)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(unavailable)?;
        if classify(status) == StatusClass::Success {
            let body: LoginResponse = serde_json::from_str(&text).map_err(|e| SessionError::ServiceUnavailable {
                message: format!("unexpected login response: {e}"),
            })?;
            return Ok(body.into());
        }
        Err(login_failure(status, error_message(&parse_body(&text))))
    }
}
