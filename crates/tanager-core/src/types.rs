// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire model shared across the Tanager workspace.
//!
//! Field names follow the remote API's JSON (camelCase). Timestamps arrive
//! without a UTC offset, so they are carried as [`chrono::NaiveDateTime`].
//! The client only ever holds read-mostly projections of these records plus
//! transient optimistic deltas; nothing here is authoritative.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The signed-in actor. Created on successful login, persisted to the local
/// key-value store, read back on startup, destroyed on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A user projection embedded in posts, activities, messages, and search
/// results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A `{username}` entry in a post's actor-relation lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRef {
    pub username: String,
}

/// A feed item.
///
/// Counters and the actor-relation lists (`liked_by_users`,
/// `reposted_by_users`) are server-computed; the lists are used only to
/// derive the viewer's own like/repost state at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub content: String,
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub replies_count: i64,
    #[serde(default)]
    pub reposts_count: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Set when this card is a repost; names the user who reposted.
    #[serde(default)]
    pub repost_from_user_name: Option<String>,
    #[serde(default)]
    pub liked_by_users: Vec<ActorRef>,
    #[serde(default)]
    pub reposted_by_users: Vec<ActorRef>,
    #[serde(default)]
    pub user: Option<Author>,
}

impl Post {
    /// Whether `viewer` has liked this post, derived from the relation list.
    pub fn liked_by(&self, viewer: &str) -> bool {
        self.liked_by_users.iter().any(|u| u.username == viewer)
    }

    /// Whether `viewer` has reposted this post.
    ///
    /// True when the viewer appears in the repost relation list, or when
    /// this card is the viewer's own repost (the viewer authored the card
    /// and a repost annotation is present).
    pub fn reposted_by(&self, viewer: &str) -> bool {
        let in_list = self.reposted_by_users.iter().any(|u| u.username == viewer);
        let own_repost_card = self.repost_from_user_name.is_some()
            && self.user.as_ref().is_some_and(|u| u.username == viewer);
        in_list || own_repost_card
    }

    /// The author's username, if the projection is present.
    pub fn author_username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}

/// The kind of a notification event. String forms match the server exactly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityKind {
    Follow,
    Like,
    Repost,
    Reply,
}

/// A notification record. `read` transitions false to true only via the
/// bulk mark-read call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub actor: Author,
    #[serde(default)]
    pub post: Option<Post>,
    #[serde(default)]
    pub read: bool,
    pub created_at: Option<NaiveDateTime>,
}

/// A chat peer, as returned by the contacts endpoint (a user projection).
pub type Contact = Author;

/// One message in a conversation between the current session and a peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub sender: Author,
    pub content: String,
    #[serde(default)]
    pub shared_post: Option<Post>,
    #[serde(default)]
    pub read: bool,
    pub created_at: Option<NaiveDateTime>,
}

/// Per-peer unread message counts, keyed by the peer's username.
pub type UnreadCounts = HashMap<String, i64>;

/// Login/register request body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Profile update request body (PUT /users/{username}).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// A new post, reply, or attached upload.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub content: String,
    /// Set when the draft is a reply to an existing post.
    pub parent_id: Option<i64>,
    pub attachment: Option<Upload>,
}

/// Raw file bytes for multipart uploads (post attachments, avatars).
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_with_relations() -> Post {
        serde_json::from_value(serde_json::json!({
            "id": 7,
            "content": "hello",
            "createdAt": "2026-03-01T12:00:00",
            "likesCount": 3,
            "repliesCount": 0,
            "repostsCount": 1,
            "likedByUsers": [{"username": "ada"}],
            "repostedByUsers": [{"username": "brian"}],
            "user": {"username": "carol", "displayName": "Carol"}
        }))
        .unwrap()
    }

    #[test]
    fn post_deserializes_camel_case() {
        let post = post_with_relations();
        assert_eq!(post.id, 7);
        assert_eq!(post.likes_count, 3);
        assert_eq!(post.author_username(), Some("carol"));
        assert!(post.created_at.is_some());
    }

    #[test]
    fn liked_by_derives_from_relation_list() {
        let post = post_with_relations();
        assert!(post.liked_by("ada"));
        assert!(!post.liked_by("carol"));
    }

    #[test]
    fn reposted_by_detects_own_repost_card() {
        let mut post = post_with_relations();
        assert!(post.reposted_by("brian"));
        assert!(!post.reposted_by("carol"));

        // The viewer's own repost card: author == viewer plus annotation.
        post.repost_from_user_name = Some("carol".into());
        assert!(post.reposted_by("carol"));
    }

    #[test]
    fn post_tolerates_missing_optional_fields() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "id": 1,
            "content": "bare"
        }))
        .unwrap();
        assert_eq!(post.likes_count, 0);
        assert!(post.liked_by_users.is_empty());
        assert!(post.user.is_none());
        assert!(post.created_at.is_none());
    }

    #[test]
    fn activity_kind_round_trips_server_strings() {
        for (kind, s) in [
            (ActivityKind::Follow, "FOLLOW"),
            (ActivityKind::Like, "LIKE"),
            (ActivityKind::Repost, "REPOST"),
            (ActivityKind::Reply, "REPLY"),
        ] {
            assert_eq!(kind.to_string(), s);
            let json = format!("\"{s}\"");
            let parsed: ActivityKind = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn activity_uses_type_field_on_the_wire() {
        let activity: Activity = serde_json::from_value(serde_json::json!({
            "id": 4,
            "type": "LIKE",
            "actor": {"username": "ada"},
            "read": false,
            "createdAt": "2026-03-01T08:30:00"
        }))
        .unwrap();
        assert_eq!(activity.kind, ActivityKind::Like);
        assert!(!activity.read);
    }

    #[test]
    fn identity_round_trips() {
        let identity = Identity {
            username: "ada".into(),
            display_name: Some("Ada L".into()),
            bio: None,
            avatar_url: Some("/uploads/ada.png".into()),
        };
        let json = serde_json::to_string(&identity).unwrap();
        assert!(json.contains("displayName"));
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identity);
    }

    #[test]
    fn unread_counts_deserializes_as_map() {
        let counts: UnreadCounts =
            serde_json::from_value(serde_json::json!({"ada": 2, "brian": 0})).unwrap();
        assert_eq!(counts.get("ada"), Some(&2));
    }
}
