// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post endpoints: feeds, detail, replies, creation, and mutations.

use reqwest::multipart::{Form, Part};
use tanager_core::{Post, PostDraft, TanagerError, Upload};
use tracing::{debug, info};

use crate::client::ApiClient;

impl ApiClient {
    /// GET `/posts`: the general ("for you") feed.
    pub async fn feed(&self) -> Result<Vec<Post>, TanagerError> {
        self.expect_json(self.http().get(self.url("/posts"))).await
    }

    /// GET `/posts/following/{username}`: posts from followed users only.
    pub async fn following_feed(&self, username: &str) -> Result<Vec<Post>, TanagerError> {
        self.expect_json(
            self.http()
                .get(self.url(&format!("/posts/following/{username}"))),
        )
        .await
    }

    /// GET `/posts/{id}`: a single post.
    pub async fn post(&self, id: i64) -> Result<Post, TanagerError> {
        self.expect_json(self.http().get(self.url(&format!("/posts/{id}"))))
            .await
    }

    /// GET `/posts/{id}/replies`: the replies under a post.
    pub async fn replies(&self, id: i64) -> Result<Vec<Post>, TanagerError> {
        self.expect_json(self.http().get(self.url(&format!("/posts/{id}/replies"))))
            .await
    }

    /// POST `/posts`: creates a post or reply (multipart form).
    ///
    /// Fields: `content`, `username`, optional `file`, optional `parentId`.
    pub async fn create_post(
        &self,
        username: &str,
        draft: &PostDraft,
    ) -> Result<Post, TanagerError> {
        let mut form = Form::new()
            .text("content", draft.content.clone())
            .text("username", username.to_string());
        if let Some(parent_id) = draft.parent_id {
            form = form.text("parentId", parent_id.to_string());
        }
        if let Some(upload) = &draft.attachment {
            form = form.part("file", file_part(upload)?);
        }

        let post: Post = self
            .expect_json(self.http().post(self.url("/posts")).multipart(form))
            .await?;
        info!(post_id = post.id, username, "post created");
        Ok(post)
    }

    /// PATCH `/posts/{id}/like?username=`: toggles the viewer's like.
    pub async fn toggle_like(&self, id: i64, username: &str) -> Result<(), TanagerError> {
        debug!(post_id = id, username, "toggling like");
        self.expect_ok(
            self.http()
                .patch(self.url(&format!("/posts/{id}/like")))
                .query(&[("username", username)]),
        )
        .await
    }

    /// POST `/posts/{id}/repost?username=`: toggles the viewer's repost.
    pub async fn toggle_repost(&self, id: i64, username: &str) -> Result<(), TanagerError> {
        debug!(post_id = id, username, "toggling repost");
        self.expect_ok(
            self.http()
                .post(self.url(&format!("/posts/{id}/repost")))
                .query(&[("username", username)]),
        )
        .await
    }

    /// DELETE `/posts/{id}?username=`: deletes the viewer's own post.
    pub async fn delete_post(&self, id: i64, username: &str) -> Result<(), TanagerError> {
        info!(post_id = id, username, "deleting post");
        self.expect_ok(
            self.http()
                .delete(self.url(&format!("/posts/{id}")))
                .query(&[("username", username)]),
        )
        .await
    }

    /// POST `/posts/{id}/share?from=&to=`: shares a post into a conversation.
    pub async fn share_post(&self, id: i64, from: &str, to: &str) -> Result<(), TanagerError> {
        self.expect_ok(
            self.http()
                .post(self.url(&format!("/posts/{id}/share")))
                .query(&[("from", from), ("to", to)]),
        )
        .await
    }
}

fn file_part(upload: &Upload) -> Result<Part, TanagerError> {
    Part::bytes(upload.bytes.clone())
        .file_name(upload.file_name.clone())
        .mime_str(&upload.mime_type)
        .map_err(|e| TanagerError::Internal(format!(
            "invalid mime type `{}`: {e}",
            upload.mime_type
        )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_client;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn post_json(id: i64, likes: i64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "content": "hello",
            "createdAt": "2026-03-01T12:00:00",
            "likesCount": likes,
            "repliesCount": 0,
            "repostsCount": 0,
            "likedByUsers": [],
            "repostedByUsers": [],
            "user": {"username": "ada"}
        })
    }

    #[tokio::test]
    async fn feed_decodes_post_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([post_json(1, 3), post_json(2, 0)])),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let posts = client.feed().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].likes_count, 3);
    }

    #[tokio::test]
    async fn following_feed_hits_username_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/following/ada"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let posts = client.following_feed("ada").await.unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn post_detail_and_replies_decode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(post_json(7, 1)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/posts/7/replies"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([post_json(8, 0)])),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let post = client.post(7).await.unwrap();
        assert_eq!(post.id, 7);
        let replies = client.replies(7).await.unwrap();
        assert_eq!(replies[0].id, 8);
    }

    #[tokio::test]
    async fn toggle_like_uses_patch_with_username() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/posts/7/like"))
            .and(query_param("username", "ada"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.toggle_like(7, "ada").await.unwrap();
    }

    #[tokio::test]
    async fn delete_post_passes_username_query() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/posts/7"))
            .and(query_param("username", "ada"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.delete_post(7, "ada").await.unwrap();
    }

    #[tokio::test]
    async fn create_post_sends_multipart_and_decodes_post() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(post_json(42, 0)))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let draft = PostDraft {
            content: "hello".into(),
            parent_id: Some(7),
            attachment: Some(Upload {
                file_name: "pic.png".into(),
                mime_type: "image/png".into(),
                bytes: vec![0x89, 0x50],
            }),
        };
        let post = client.create_post("ada", &draft).await.unwrap();
        assert_eq!(post.id, 42);
    }

    #[tokio::test]
    async fn create_post_rejects_bad_mime_type() {
        let client = test_client("http://127.0.0.1:1");
        let draft = PostDraft {
            content: "hello".into(),
            parent_id: None,
            attachment: Some(Upload {
                file_name: "x".into(),
                mime_type: "not a mime".into(),
                bytes: vec![],
            }),
        };
        let err = client.create_post("ada", &draft).await.unwrap_err();
        assert!(matches!(err, TanagerError::Internal(_)), "got: {err:?}");
    }

    #[tokio::test]
    async fn share_post_passes_both_usernames() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts/3/share"))
            .and(query_param("from", "ada"))
            .and(query_param("to", "brian"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.share_post(3, "ada", "brian").await.unwrap();
    }
}
