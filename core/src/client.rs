//! Authenticated request executor.
//!
//! # Design
//! `ApiClient` holds the immutable `Config` and a shared `reqwest::Client`;
//! it carries no mutable state, so any number of dispatches can share one
//! instance concurrently. Each `execute` call issues exactly one request:
//! no retries, no timeout, no rate-limit backoff (the remote service
//! documents a 100 req/min/company cap that this layer does not enforce).
//! A hung remote service therefore hangs the caller — known limitation.
//!
//! The fixed header set (`api-key`, `api-version`, content type, accept) is
//! inserted after any caller-supplied headers, so callers can add headers
//! but never remove or replace the credential and version fields.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Error;
use crate::http::Request;

/// Fixed API version sent with every request.
pub const API_VERSION: &str = "2.0";

/// Asynchronous executor for planned requests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute one planned request and return the parsed response payload.
    ///
    /// An empty success body maps to `Value::Null` (delete responses carry
    /// no body); a non-JSON success body is returned as a JSON string.
    pub async fn execute(&self, request: &Request) -> Result<Value, Error> {
        if self.config.api_token.is_empty() {
            return Err(Error::Configuration(format!(
                "no API token configured; set {}",
                crate::config::TOKEN_ENV
            )));
        }

        let endpoint = format!("{} {}", request.method.as_str(), request.path);
        let url = format!("{}{}", self.config.base_url, request.path);
        let headers = self.build_headers(&request.headers)?;

        let mut builder = self
            .http
            .request(request.method.into(), url.as_str())
            .headers(headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(endpoint = %endpoint, "executing request");
        let response = builder.send().await.map_err(|e| {
            warn!(endpoint = %endpoint, error = %e, "transport failure");
            Error::Transport {
                endpoint: endpoint.clone(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        // Best-effort body read; an unreadable body still yields a useful error.
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(Error::Upstream {
                endpoint,
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(_) => Ok(Value::String(body)),
        }
    }

    /// Assemble the header map: caller headers first, fixed set last so the
    /// credential and version headers always win.
    fn build_headers(&self, extra: &[(String, String)]) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::Protocol(format!("invalid header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::Protocol(format!("invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        let token = HeaderValue::from_str(&self.config.api_token).map_err(|e| {
            Error::Configuration(format!("API token is not a valid header value: {e}"))
        })?;
        headers.insert(HeaderName::from_static("api-key"), token);
        headers.insert(
            HeaderName::from_static("api-version"),
            HeaderValue::from_static(API_VERSION),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}
