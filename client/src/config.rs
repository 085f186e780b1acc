//! Build-time client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! A static WASM bundle has no process environment, so settings are baked in
//! at compile time from `STOKIO_API_URL` and `STOKIO_DEMO_AUTH`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// API base URL used when `STOKIO_API_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Settings shared by the auth context and the REST client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend API root, without a trailing slash.
    pub api_base_url: &'static str,
    /// Use the offline demo authenticator instead of `POST /auth/login`.
    pub demo_auth: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL,
            demo_auth: false,
        }
    }
}

impl ClientConfig {
    /// Read the values captured when the crate was compiled.
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("STOKIO_API_URL"), option_env!("STOKIO_DEMO_AUTH"))
    }

    fn from_values(api_base_url: Option<&'static str>, demo_auth: Option<&str>) -> Self {
        let api_base_url = api_base_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);
        let demo_auth = demo_auth.and_then(parse_bool).unwrap_or(false);
        Self { api_base_url, demo_auth }
    }
}

/// Parse a boolean flag value (`1/0`, `true/false`, `yes/no`, `on/off`).
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
