// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application-wide change notifications.
//!
//! Mutations that invalidate other views publish here instead of calling
//! into them. Subscribers (typically a [`crate::scheduler::RefetchTask`])
//! react by refetching out of cycle.

use tokio::sync::broadcast;
use tracing::debug;

/// What changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Posts were created, reposted, or deleted; feeds should refetch.
    ContentChanged,
    /// A message was sent; conversation and contact views should refetch.
    MessagesChanged,
}

/// Broadcast channel scoped to the application lifetime.
#[derive(Debug, Clone)]
pub struct ChangeBus {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(32);
        Self { tx }
    }

    /// Publishes an event. Having no subscribers is not an error.
    pub fn publish(&self, event: ChangeEvent) {
        debug!(?event, "change published");
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}
