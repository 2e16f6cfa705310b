// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification (activity) endpoints.

use tanager_core::{Activity, TanagerError};
use tracing::debug;

use crate::client::ApiClient;

impl ApiClient {
    /// GET `/activities/{username}`: the user's notification list.
    pub async fn activities(&self, username: &str) -> Result<Vec<Activity>, TanagerError> {
        self.expect_json(
            self.http()
                .get(self.url(&format!("/activities/{username}"))),
        )
        .await
    }

    /// PATCH `/activities/read?username=&type=`: bulk-marks activities of
    /// the given scope as read. The read flag only ever transitions
    /// false to true, and only through this call.
    pub async fn mark_activities_read(
        &self,
        username: &str,
        scope: &str,
    ) -> Result<(), TanagerError> {
        debug!(username, scope, "marking activities read");
        self.expect_ok(
            self.http()
                .patch(self.url("/activities/read"))
                .query(&[("username", username), ("type", scope)]),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_client;
    use tanager_core::ActivityKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn activities_decode_kind_and_read_flag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/activities/ada"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": 1,
                    "type": "FOLLOW",
                    "actor": {"username": "brian"},
                    "read": false,
                    "createdAt": "2026-03-01T09:00:00"
                },
                {
                    "id": 2,
                    "type": "LIKE",
                    "actor": {"username": "carol"},
                    "post": {"id": 7, "content": "hi"},
                    "read": true,
                    "createdAt": "2026-03-01T10:00:00"
                }
            ])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let activities = client.activities("ada").await.unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].kind, ActivityKind::Follow);
        assert!(!activities[0].read);
        assert_eq!(activities[1].post.as_ref().unwrap().id, 7);
    }

    #[tokio::test]
    async fn mark_read_passes_scope_as_type_query() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/activities/read"))
            .and(query_param("username", "ada"))
            .and(query_param("type", "GENERAL"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.mark_activities_read("ada", "GENERAL").await.unwrap();
    }
}
