// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User endpoints: search, follow, and profile updates.

use reqwest::multipart::{Form, Part};
use tanager_core::{Author, Identity, ProfileUpdate, TanagerError, Upload};
use tracing::{debug, info};

use crate::client::ApiClient;

impl ApiClient {
    /// GET `/users/search?q=`: user search.
    pub async fn search_users(&self, query: &str) -> Result<Vec<Author>, TanagerError> {
        self.expect_json(
            self.http()
                .get(self.url("/users/search"))
                .query(&[("q", query)]),
        )
        .await
    }

    /// POST `/users/{username}/follow?followerUsername=`: toggles whether
    /// `follower` follows `username`.
    pub async fn toggle_follow(
        &self,
        username: &str,
        follower: &str,
    ) -> Result<(), TanagerError> {
        debug!(target = username, follower, "toggling follow");
        self.expect_ok(
            self.http()
                .post(self.url(&format!("/users/{username}/follow")))
                .query(&[("followerUsername", follower)]),
        )
        .await
    }

    /// PUT `/users/{username}`: updates display name and bio.
    pub async fn update_profile(
        &self,
        username: &str,
        update: &ProfileUpdate,
    ) -> Result<Identity, TanagerError> {
        let identity: Identity = self
            .expect_json(
                self.http()
                    .put(self.url(&format!("/users/{username}")))
                    .json(update),
            )
            .await?;
        info!(username, "profile updated");
        Ok(identity)
    }

    /// PATCH `/users/{username}/avatar`: uploads a new avatar (multipart).
    pub async fn update_avatar(
        &self,
        username: &str,
        upload: &Upload,
    ) -> Result<Identity, TanagerError> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)
            .map_err(|e| TanagerError::Internal(format!(
                "invalid mime type `{}`: {e}",
                upload.mime_type
            )))?;
        let form = Form::new().part("file", part);

        let identity: Identity = self
            .expect_json(
                self.http()
                    .patch(self.url(&format!("/users/{username}/avatar")))
                    .multipart(form),
            )
            .await?;
        info!(username, "avatar updated");
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_client;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn search_decodes_user_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/search"))
            .and(query_param("q", "ad"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"username": "ada", "displayName": "Ada L"},
                {"username": "adrian"}
            ])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let users = client.search_users("ad").await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "ada");
        assert!(users[1].display_name.is_none());
    }

    #[tokio::test]
    async fn toggle_follow_passes_follower_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/brian/follow"))
            .and(query_param("followerUsername", "ada"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.toggle_follow("brian", "ada").await.unwrap();
    }

    #[tokio::test]
    async fn update_profile_sends_only_set_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/users/ada"))
            .and(wiremock::matchers::body_json(
                serde_json::json!({"bio": "new bio"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "username": "ada",
                "bio": "new bio"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let update = ProfileUpdate {
            display_name: None,
            bio: Some("new bio".into()),
        };
        let identity = client.update_profile("ada", &update).await.unwrap();
        assert_eq!(identity.bio.as_deref(), Some("new bio"));
    }

    #[tokio::test]
    async fn update_avatar_returns_refreshed_identity() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/users/ada/avatar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "username": "ada",
                "avatarUrl": "/uploads/ada-2.png"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let upload = Upload {
            file_name: "me.png".into(),
            mime_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        };
        let identity = client.update_avatar("ada", &upload).await.unwrap();
        assert_eq!(identity.avatar_url.as_deref(), Some("/uploads/ada-2.png"));
    }
}
