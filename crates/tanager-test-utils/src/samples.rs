// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire-shaped JSON builders matching the server's camelCase output.

use serde_json::{Value, json};

/// A post with explicit like state. `liked_by` lists usernames present in
/// the post's like relation list.
pub fn post(id: i64, likes: i64, liked_by: &[&str]) -> Value {
    json!({
        "id": id,
        "content": format!("post {id}"),
        "createdAt": "2026-03-01T12:00:00",
        "likesCount": likes,
        "repliesCount": 0,
        "repostsCount": 0,
        "likedByUsers": liked_by.iter().map(|u| json!({"username": u})).collect::<Vec<_>>(),
        "repostedByUsers": [],
        "user": {"username": "author", "displayName": "The Author"}
    })
}

pub fn author(username: &str) -> Value {
    json!({"username": username})
}

pub fn message(id: i64, sender: &str, content: &str, read: bool) -> Value {
    json!({
        "id": id,
        "sender": {"username": sender},
        "content": content,
        "read": read,
        "createdAt": "2026-03-01T08:00:00"
    })
}

pub fn activity(id: i64, kind: &str, actor: &str, read: bool) -> Value {
    json!({
        "id": id,
        "type": kind,
        "actor": {"username": actor},
        "read": read,
        "createdAt": "2026-03-01T09:00:00"
    })
}
