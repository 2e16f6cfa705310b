// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The post feed: tab selection, polling, and optimistic post mutations.

use std::time::Duration;

use tanager_api::ApiClient;
use tanager_core::{ActorRef, Post, PostDraft, TanagerError};
use tracing::warn;

use crate::bus::{ChangeBus, ChangeEvent};
use crate::optimistic;
use crate::scheduler::RefetchTask;
use crate::state::ViewState;

/// Which feed source is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedTab {
    #[default]
    ForYou,
    Following,
}

/// Holds the visible post list for the active tab and applies the viewer's
/// optimistic like/repost/delete mutations to it.
pub struct FeedStore {
    api: ApiClient,
    bus: ChangeBus,
    viewer: String,
    tab: ViewState<FeedTab>,
    posts: ViewState<Vec<Post>>,
    task: Option<RefetchTask>,
}

impl FeedStore {
    pub fn new(api: ApiClient, bus: ChangeBus, viewer: impl Into<String>) -> Self {
        Self {
            api,
            bus,
            viewer: viewer.into(),
            tab: ViewState::default(),
            posts: ViewState::default(),
            task: None,
        }
    }

    pub fn posts(&self) -> &ViewState<Vec<Post>> {
        &self.posts
    }

    pub fn tab(&self) -> FeedTab {
        self.tab.get()
    }

    /// Starts polling: immediate fetch, then every `period`, plus whenever
    /// content changes elsewhere. Restarting replaces the previous task.
    pub fn start(&mut self, period: Duration) {
        let api = self.api.clone();
        let tab = self.tab.clone();
        let posts = self.posts.clone();
        let viewer = self.viewer.clone();
        self.task = Some(RefetchTask::spawn(
            period,
            Some((self.bus.clone(), ChangeEvent::ContentChanged)),
            move || {
                let api = api.clone();
                let tab = tab.clone();
                let posts = posts.clone();
                let viewer = viewer.clone();
                async move { refresh_into(&api, tab.get(), &viewer, &posts).await }
            },
        ));
    }

    /// Stops polling. Dropping the store has the same effect.
    pub fn stop(&mut self) {
        self.task = None;
    }

    /// One manual fetch of the active tab.
    pub async fn refresh(&self) {
        refresh_into(&self.api, self.tab.get(), &self.viewer, &self.posts).await;
    }

    /// Switches tab and refetches from the new source.
    pub async fn set_tab(&self, tab: FeedTab) {
        if self.tab.get() != tab {
            self.tab.set(tab);
            self.refresh().await;
        }
    }

    /// Optimistically toggles the viewer's like on a post.
    pub async fn like(&self, id: i64) -> Result<(), TanagerError> {
        let viewer = self.viewer.clone();
        optimistic::mutate(
            &self.posts,
            move |posts| toggle_like_local(posts, id, &viewer),
            self.api.toggle_like(id, &self.viewer),
        )
        .await
    }

    /// Optimistically toggles the viewer's repost. A successful repost
    /// changes what other feeds show, so it announces a content change.
    pub async fn repost(&self, id: i64) -> Result<(), TanagerError> {
        let viewer = self.viewer.clone();
        optimistic::mutate(
            &self.posts,
            move |posts| toggle_repost_local(posts, id, &viewer),
            self.api.toggle_repost(id, &self.viewer),
        )
        .await?;
        self.bus.publish(ChangeEvent::ContentChanged);
        Ok(())
    }

    /// Deletes the viewer's post, gated on an explicit confirmation
    /// decision. Declined means no request and no state change; a failed
    /// request rolls the post back into the list and surfaces the error.
    ///
    /// Returns whether a deletion was performed.
    pub async fn delete(&self, id: i64, confirmed: bool) -> Result<bool, TanagerError> {
        if !confirmed {
            return Ok(false);
        }
        optimistic::mutate(
            &self.posts,
            move |posts| posts.retain(|p| p.id != id),
            self.api.delete_post(id, &self.viewer),
        )
        .await?;
        self.bus.publish(ChangeEvent::ContentChanged);
        Ok(true)
    }

    /// Creates a post (or reply) and announces the content change so every
    /// feed picks it up.
    pub async fn create(&self, draft: &PostDraft) -> Result<Post, TanagerError> {
        let post = self.api.create_post(&self.viewer, draft).await?;
        self.bus.publish(ChangeEvent::ContentChanged);
        Ok(post)
    }
}

async fn refresh_into(api: &ApiClient, tab: FeedTab, viewer: &str, posts: &ViewState<Vec<Post>>) {
    let fetched = match tab {
        FeedTab::ForYou => api.feed().await,
        FeedTab::Following => api.following_feed(viewer).await,
    };
    match fetched {
        Ok(list) => posts.set(list),
        // Keep showing the last good list; the next poll supersedes this.
        Err(e) => warn!(error = %e, ?tab, "feed refresh failed"),
    }
}

fn toggle_like_local(posts: &mut Vec<Post>, id: i64, viewer: &str) {
    if let Some(post) = posts.iter_mut().find(|p| p.id == id) {
        if post.liked_by(viewer) {
            post.liked_by_users.retain(|u| u.username != viewer);
            post.likes_count -= 1;
        } else {
            post.liked_by_users.push(ActorRef {
                username: viewer.to_string(),
            });
            post.likes_count += 1;
        }
    }
}

fn toggle_repost_local(posts: &mut Vec<Post>, id: i64, viewer: &str) {
    if let Some(post) = posts.iter_mut().find(|p| p.id == id) {
        if post.reposted_by(viewer) {
            post.reposted_by_users.retain(|u| u.username != viewer);
            post.reposts_count -= 1;
        } else {
            post.reposted_by_users.push(ActorRef {
                username: viewer.to_string(),
            });
            post.reposts_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, likes: i64, liked_by: &[&str]) -> Post {
        Post {
            id,
            content: format!("post {id}"),
            created_at: None,
            likes_count: likes,
            replies_count: 0,
            reposts_count: 0,
            image_url: None,
            repost_from_user_name: None,
            liked_by_users: liked_by
                .iter()
                .map(|u| ActorRef {
                    username: u.to_string(),
                })
                .collect(),
            reposted_by_users: vec![],
            user: None,
        }
    }

    #[test]
    fn local_like_toggle_flips_both_directions() {
        let mut posts = vec![post(1, 3, &[])];
        toggle_like_local(&mut posts, 1, "ada");
        assert_eq!(posts[0].likes_count, 4);
        assert!(posts[0].liked_by("ada"));

        toggle_like_local(&mut posts, 1, "ada");
        assert_eq!(posts[0].likes_count, 3);
        assert!(!posts[0].liked_by("ada"));
    }

    #[test]
    fn local_toggle_ignores_unknown_post() {
        let mut posts = vec![post(1, 0, &[])];
        toggle_like_local(&mut posts, 99, "ada");
        assert_eq!(posts[0].likes_count, 0);
    }
}
