// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The single configured HTTP client used by every feature.
//!
//! [`ApiClient`] handles request construction, credentials mode, and the
//! defensive extraction of human-readable error messages from non-2xx
//! response bodies. Endpoint methods live in the sibling feature modules
//! (`auth`, `posts`, `users`, `activities`, `messages`).

use std::time::Duration;

use serde::de::DeserializeOwned;
use tanager_config::model::ApiConfig;
use tanager_core::TanagerError;
use tracing::debug;

/// HTTP client for the remote social-network API.
///
/// One instance is shared by all reads and writes. Cloning is cheap; the
/// underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a new API client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, TanagerError> {
        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(
            config.timeout_secs,
        ));
        if config.send_credentials {
            builder = builder.cookie_store(true);
        }
        let client = builder.build().map_err(|e| TanagerError::Transport {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Returns the configured base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// Builds an absolute URL for an API path (`path` starts with `/`).
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a request and decodes a JSON response body.
    pub(crate) async fn expect_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, TanagerError> {
        let body = self.expect_text(request).await?;
        serde_json::from_str(&body).map_err(|e| TanagerError::Internal(format!(
            "failed to decode response body: {e}"
        )))
    }

    /// Sends a request, checks the status, and returns the raw body text.
    pub(crate) async fn expect_text(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<String, TanagerError> {
        let response = request.send().await.map_err(|e| TanagerError::Transport {
            message: format!("request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        debug!(status = %status, "response received");

        let body = response.text().await.unwrap_or_default();
        if status.is_success() {
            return Ok(body);
        }

        let message = extract_error_message(status.as_u16(), &body);
        if status.as_u16() == 401 {
            return Err(TanagerError::Unauthorized { message });
        }
        Err(TanagerError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Sends a request where the caller only cares about success.
    pub(crate) async fn expect_ok(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(), TanagerError> {
        self.expect_text(request).await.map(|_| ())
    }
}

/// Extract a human-readable message from a non-2xx response body.
///
/// The server returns plain-text bodies for some failures and JSON objects
/// (with a `message` or `error` field) for others; the shape is not
/// guaranteed. Preference order: structured `message` field, structured
/// `error` field, the body text verbatim, else a generic fallback naming
/// the status. Never panics on unexpected shapes.
pub fn extract_error_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("request failed with status {status}");
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match value {
            serde_json::Value::Object(map) => {
                for key in ["message", "error"] {
                    if let Some(text) = map.get(key).and_then(|v| v.as_str()) {
                        if !text.trim().is_empty() {
                            return text.trim().to_string();
                        }
                    }
                }
                // Structured but unrecognized shape: stringify it.
                return serde_json::Value::Object(map).to_string();
            }
            serde_json::Value::String(s) if !s.trim().is_empty() => {
                return s.trim().to_string();
            }
            _ => {}
        }
    }

    trimmed.to_string()
}

/// Builds a client pointed at a mock server (wiremock tests).
#[cfg(test)]
pub(crate) fn test_client(base_url: &str) -> ApiClient {
    ApiClient::new(&tanager_config::model::ApiConfig::default())
        .unwrap()
        .with_base_url(base_url)
}
