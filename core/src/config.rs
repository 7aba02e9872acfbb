//! Client configuration.
//!
//! # Design
//! Configuration is an explicit immutable value built once at process start
//! and passed into `ApiClient` by the caller. There is no ambient/global
//! lookup, so tests can inject a fake token and a mock base URL.

use serde::{Deserialize, Serialize};

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "TIMETRACK_API_TOKEN";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "TIMETRACK_BASE_URL";

/// Default base URL, pointing at the bundled mock server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Immutable client configuration: one credential and one base endpoint.
///
/// An empty `api_token` is allowed here; `ApiClient` rejects it with a
/// configuration error before any network activity, so the failure surfaces
/// per dispatch rather than at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API token sent in the `api-key` header of every request.
    pub api_token: String,

    /// Base URL of the remote service, without a trailing slash.
    pub base_url: String,
}

impl Config {
    pub fn new(api_token: impl Into<String>, base_url: &str) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Read configuration from the environment once, at process start.
    pub fn from_env() -> Self {
        let token = std::env::var(TOKEN_ENV).unwrap_or_default();
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(token, &base_url)
    }
}
