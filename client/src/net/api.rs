//! REST API helpers for communicating with the backend.
//!
//! Browser (`csr`): real HTTP calls via `gloo-net`.
//! Native builds: stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call attaches the bearer token when one exists. A 401 from any
//! endpoint other than login expires the session through [`AuthContext`],
//! which makes the route guard redirect to `/login`, and raises a warning
//! notification. Callers still receive [`ApiError::Unauthorized`].

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;
use session::{Authenticator, Credentials, Grant, SessionError};

use super::types::{Category, Product, Registration, Sale};
use crate::state::auth::AuthContext;
use crate::state::notify::Notifier;

pub const PRODUCTS_PATH: &str = "/products";
pub const CATEGORIES_PATH: &str = "/categories";
pub const SALES_PATH: &str = "/sales";
pub const REGISTER_PATH: &str = "/auth/register";

fn product_path(id: &str) -> String {
    format!("{PRODUCTS_PATH}/{id}")
}

/// Failure of a REST call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("session expired, please sign in again")]
    Unauthorized,
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("not available outside the browser")]
    Unavailable,
}

/// HTTP method of a REST call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

/// Authenticated REST client bound to the app's contexts.
#[derive(Clone, Copy, Debug)]
pub struct Api {
    auth: AuthContext,
    notify: Notifier,
}

impl Api {
    pub fn new(auth: AuthContext, notify: Notifier) -> Self {
        Self { auth, notify }
    }

    /// Build from the contexts provided by `App`.
    pub fn expect() -> Self {
        Self::new(AuthContext::expect(), Notifier::expect())
    }

    /// Fetch all products from `GET /products`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn products(self) -> Result<Vec<Product>, ApiError> {
        self.call(Verb::Get, PRODUCTS_PATH, None).await
    }

    /// Delete a product via `DELETE /products/{id}`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn delete_product(self, id: &str) -> Result<(), ApiError> {
        self.call(Verb::Delete, &product_path(id), None).await
    }

    /// Fetch all categories from `GET /categories`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn categories(self) -> Result<Vec<Category>, ApiError> {
        self.call(Verb::Get, CATEGORIES_PATH, None).await
    }

    /// Fetch recorded sales from `GET /sales`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn sales(self) -> Result<Vec<Sale>, ApiError> {
        self.call(Verb::Get, SALES_PATH, None).await
    }

    /// Create an account via `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn register(self, registration: &Registration) -> Result<(), ApiError> {
        let body = serde_json::to_value(registration).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.call(Verb::Post, REGISTER_PATH, Some(body)).await
    }

    async fn call<T: DeserializeOwned>(
        self,
        verb: Verb,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let url = session::http::join_url(self.auth.config().api_base_url, path);
        let token = self.auth.token();
        let result = send(verb, &url, token.as_deref(), body.as_ref()).await;
        if matches!(result, Err(ApiError::Unauthorized)) && session::http::ends_session(path, 401) {
            self.auth.expire();
            self.notify.warning(SessionError::Unauthorized.to_string());
        }
        result
    }
}

/// Backend authenticator calling `POST /auth/login`.
#[derive(Clone, Copy, Debug)]
pub struct ApiAuthenticator {
    base_url: &'static str,
}

impl ApiAuthenticator {
    pub fn new(base_url: &'static str) -> Self {
        Self { base_url }
    }
}

impl Authenticator for ApiAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Grant, SessionError> {
        #[cfg(feature = "csr")]
        {
            use session::http::{StatusClass, classify, error_message, login_failure};

            let url = session::http::join_url(self.base_url, session::auth::LOGIN_PATH);
            let unavailable = |e: gloo_net::Error| SessionError::ServiceUnavailable { message: e.to_string() };
            let resp = gloo_net::http::Request::post(&url)
                .json(credentials)
                .map_err(unavailable)?
                .send()
                .await
                .map_err(unavailable)?;
            let status = resp.status();
            if classify(status) == StatusClass::Success {
                let body: session::LoginResponse = resp.json().await.map_err(unavailable)?;
                return Ok(body.into());
            }
            let message = resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .as_ref()
                .and_then(error_message);
            Err(login_failure(status, message))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (self.base_url, credentials);
            Err(SessionError::ServiceUnavailable {
                message: ApiError::Unavailable.to_string(),
            })
        }
    }
}

#[cfg(feature = "csr")]
async fn send<T: DeserializeOwned>(
    verb: Verb,
    url: &str,
    token: Option<&str>,
    body: Option<&serde_json::Value>,
) -> Result<T, ApiError> {
    use gloo_net::http::{Method, RequestBuilder};
    use session::http::{AUTHORIZATION, StatusClass, bearer, classify, error_message};

    let method = match verb {
        Verb::Get => Method::GET,
        Verb::Post => Method::POST,
        Verb::Put => Method::PUT,
        Verb::Delete => Method::DELETE,
    };
    let mut builder = RequestBuilder::new(url).method(method);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, &bearer(token));
    }
    let request = match body {
        Some(body) => builder.json(body),
        None => builder.build(),
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;
    let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;

    let status = resp.status();
    match classify(status) {
        StatusClass::Success => {
            let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            decode_body(&text)
        }
        StatusClass::Unauthorized => Err(ApiError::Unauthorized),
        StatusClass::ClientError | StatusClass::ServerError => {
            let status_text = resp.status_text();
            let message = resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .as_ref()
                .and_then(error_message)
                .unwrap_or(status_text);
            Err(ApiError::Status { status, message })
        }
    }
}

#[cfg(not(feature = "csr"))]
async fn send<T: DeserializeOwned>(
    verb: Verb,
    url: &str,
    token: Option<&str>,
    body: Option<&serde_json::Value>,
) -> Result<T, ApiError> {
    let _ = (verb, url, token, body);
    Err(ApiError::Unavailable)
}

/// Decode a success body; an empty body (e.g. `204`) decodes as JSON `null`.
#[cfg(any(test, feature = "csr"))]
fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}
