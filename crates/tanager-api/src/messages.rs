// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Direct-message endpoints: contacts, unread counts, conversations.

use tanager_core::{Contact, Message, TanagerError, UnreadCounts};
use tracing::debug;

use crate::client::ApiClient;

impl ApiClient {
    /// GET `/messages/contacts/{username}`: everyone the user has a
    /// conversation with.
    pub async fn contacts(&self, username: &str) -> Result<Vec<Contact>, TanagerError> {
        self.expect_json(
            self.http()
                .get(self.url(&format!("/messages/contacts/{username}"))),
        )
        .await
    }

    /// GET `/messages/unread-counts/{username}`: unread message count per
    /// contact username.
    pub async fn unread_counts(&self, username: &str) -> Result<UnreadCounts, TanagerError> {
        self.expect_json(
            self.http()
                .get(self.url(&format!("/messages/unread-counts/{username}"))),
        )
        .await
    }

    /// GET `/messages/conversation?user1=&user2=`: the full message history
    /// between two users, oldest first.
    pub async fn conversation(
        &self,
        user1: &str,
        user2: &str,
    ) -> Result<Vec<Message>, TanagerError> {
        self.expect_json(
            self.http()
                .get(self.url("/messages/conversation"))
                .query(&[("user1", user1), ("user2", user2)]),
        )
        .await
    }

    /// POST `/messages/send?from=&to=`: sends a message. The body is the
    /// raw message text, not JSON.
    pub async fn send_message(
        &self,
        from: &str,
        to: &str,
        text: &str,
    ) -> Result<Message, TanagerError> {
        debug!(from, to, "sending message");
        self.expect_json(
            self.http()
                .post(self.url("/messages/send"))
                .query(&[("from", from), ("to", to)])
                .header(reqwest::header::CONTENT_TYPE, "text/plain")
                .body(text.to_string()),
        )
        .await
    }

    /// PATCH `/messages/read?username=&from=`: marks every message from
    /// `from` to `username` as read.
    pub async fn mark_messages_read(
        &self,
        username: &str,
        from: &str,
    ) -> Result<(), TanagerError> {
        debug!(username, from, "marking conversation read");
        self.expect_ok(
            self.http()
                .patch(self.url("/messages/read"))
                .query(&[("username", username), ("from", from)]),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_client;
    use wiremock::matchers::{body_string, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn contacts_decode_author_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/messages/contacts/ada"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"username": "brian", "displayName": "Brian K"},
                {"username": "carol"}
            ])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let contacts = client.contacts("ada").await.unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].username, "brian");
    }

    #[tokio::test]
    async fn unread_counts_decode_per_contact_map() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/messages/unread-counts/ada"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"brian": 2, "carol": 0})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let counts = client.unread_counts("ada").await.unwrap();
        assert_eq!(counts.get("brian"), Some(&2));
        assert_eq!(counts.get("carol"), Some(&0));
        assert_eq!(counts.get("nobody"), None);
    }

    #[tokio::test]
    async fn conversation_passes_both_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/messages/conversation"))
            .and(query_param("user1", "ada"))
            .and(query_param("user2", "brian"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": 1,
                    "sender": {"username": "brian"},
                    "content": "hey",
                    "read": false,
                    "createdAt": "2026-03-01T08:00:00"
                }
            ])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let messages = client.conversation("ada", "brian").await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender.username, "brian");
        assert!(!messages[0].read);
    }

    #[tokio::test]
    async fn send_message_uses_plain_text_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages/send"))
            .and(query_param("from", "ada"))
            .and(query_param("to", "brian"))
            .and(body_string("hello there"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 9,
                "sender": {"username": "ada"},
                "content": "hello there",
                "read": false,
                "createdAt": "2026-03-01T08:05:00"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let message = client.send_message("ada", "brian", "hello there").await.unwrap();
        assert_eq!(message.id, 9);
        assert_eq!(message.content, "hello there");
    }

    #[tokio::test]
    async fn mark_messages_read_passes_both_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/messages/read"))
            .and(query_param("username", "ada"))
            .and(query_param("from", "brian"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.mark_messages_read("ada", "brian").await.unwrap();
    }
}
