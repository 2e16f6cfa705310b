// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile-page follow control.

use tanager_api::ApiClient;
use tanager_core::TanagerError;

use crate::optimistic;
use crate::state::ViewState;

/// The viewer's relation to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FollowState {
    pub following: bool,
    pub follower_count: i64,
}

/// Optimistic follow/unfollow toggle for one profile.
pub struct FollowControl {
    api: ApiClient,
    viewer: String,
    target: String,
    state: ViewState<FollowState>,
}

impl FollowControl {
    pub fn new(
        api: ApiClient,
        viewer: impl Into<String>,
        target: impl Into<String>,
        initial: FollowState,
    ) -> Self {
        Self {
            api,
            viewer: viewer.into(),
            target: target.into(),
            state: ViewState::new(initial),
        }
    }

    pub fn state(&self) -> &ViewState<FollowState> {
        &self.state
    }

    /// Flips the follow flag and follower count locally, then confirms
    /// with the server; a failure restores both exactly.
    pub async fn toggle(&self) -> Result<(), TanagerError> {
        optimistic::mutate(
            &self.state,
            |s| {
                if s.following {
                    s.following = false;
                    s.follower_count -= 1;
                } else {
                    s.following = true;
                    s.follower_count += 1;
                }
            },
            self.api.toggle_follow(&self.target, &self.viewer),
        )
        .await
    }
}
