// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The notification view.

use tanager_api::ApiClient;
use tanager_core::{Activity, ActivityKind, TanagerError};
use tracing::warn;

use crate::state::ViewState;

/// Holds the user's notifications. Opening the view fetches the list and
/// then bulk-marks it read; the kind filter is purely client-side.
pub struct ActivityStore {
    api: ApiClient,
    viewer: String,
    activities: ViewState<Vec<Activity>>,
}

impl ActivityStore {
    pub fn new(api: ApiClient, viewer: impl Into<String>) -> Self {
        Self {
            api,
            viewer: viewer.into(),
            activities: ViewState::default(),
        }
    }

    pub fn activities(&self) -> &ViewState<Vec<Activity>> {
        &self.activities
    }

    /// Fetches notifications, then marks the whole batch read on the
    /// server. The in-memory list keeps the as-fetched read flags so the
    /// view can still highlight what was new this time.
    pub async fn refresh(&self) -> Result<(), TanagerError> {
        let list = self.api.activities(&self.viewer).await?;
        let had_unread = list.iter().any(|a| !a.read);
        self.activities.set(list);

        if had_unread {
            if let Err(e) = self.api.mark_activities_read(&self.viewer, "GENERAL").await {
                // Best effort; the flags converge on the next open.
                warn!(error = %e, "failed to mark activities read");
            }
        }
        Ok(())
    }

    /// The current list, optionally narrowed to one kind.
    pub fn filtered(&self, kind: Option<ActivityKind>) -> Vec<Activity> {
        let list = self.activities.get();
        match kind {
            Some(kind) => list.into_iter().filter(|a| a.kind == kind).collect(),
            None => list,
        }
    }
}
