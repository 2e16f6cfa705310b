// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A wiremock-backed stand-in for the remote API.

use serde_json::Value;
use tanager_api::ApiClient;
use tanager_config::model::ApiConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Wraps a [`MockServer`] with helpers for the routes most tests need.
/// Anything not covered by a helper can mount mocks directly on
/// [`server`](Self::server).
pub struct FakeServer {
    server: MockServer,
}

impl FakeServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// A client pointed at this server, built from default config.
    pub fn client(&self) -> ApiClient {
        match ApiClient::new(&ApiConfig::default()) {
            Ok(client) => client.with_base_url(self.server.uri()),
            Err(e) => panic!("failed to build test client: {e}"),
        }
    }

    /// Serves `posts` from GET `/posts`.
    pub async fn stub_feed(&self, posts: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(posts)))
            .mount(&self.server)
            .await;
    }

    /// Makes GET `/posts` fail with the given status.
    pub async fn stub_feed_error(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Accepts PATCH `/posts/{id}/like` with the given status.
    pub async fn stub_like(&self, id: i64, status: u16) {
        Mock::given(method("PATCH"))
            .and(path(format!("/posts/{id}/like")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }
}
