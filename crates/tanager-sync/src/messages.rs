// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Direct-message views: one open conversation and the contact list.
//!
//! The conversation polls fast (3s by default) and marks incoming
//! messages read as part of each successful fetch, so the peer's unread
//! counter clears as soon as the conversation is on screen.

use std::time::Duration;

use tanager_api::ApiClient;
use tanager_core::{Contact, Message, TanagerError, UnreadCounts};
use tracing::warn;

use crate::bus::{ChangeBus, ChangeEvent};
use crate::scheduler::RefetchTask;
use crate::state::ViewState;

/// One open conversation with a peer, plus the outgoing draft.
pub struct ConversationStore {
    api: ApiClient,
    bus: ChangeBus,
    viewer: String,
    peer: String,
    messages: ViewState<Vec<Message>>,
    draft: ViewState<String>,
    task: Option<RefetchTask>,
}

impl ConversationStore {
    pub fn new(
        api: ApiClient,
        bus: ChangeBus,
        viewer: impl Into<String>,
        peer: impl Into<String>,
    ) -> Self {
        Self {
            api,
            bus,
            viewer: viewer.into(),
            peer: peer.into(),
            messages: ViewState::default(),
            draft: ViewState::default(),
            task: None,
        }
    }

    pub fn messages(&self) -> &ViewState<Vec<Message>> {
        &self.messages
    }

    pub fn draft(&self) -> &ViewState<String> {
        &self.draft
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Starts polling the conversation, refetching early when a message is
    /// sent elsewhere in the app.
    pub fn start(&mut self, period: Duration) {
        let api = self.api.clone();
        let viewer = self.viewer.clone();
        let peer = self.peer.clone();
        let messages = self.messages.clone();
        self.task = Some(RefetchTask::spawn(
            period,
            Some((self.bus.clone(), ChangeEvent::MessagesChanged)),
            move || {
                let api = api.clone();
                let viewer = viewer.clone();
                let peer = peer.clone();
                let messages = messages.clone();
                async move { refresh_conversation(&api, &viewer, &peer, &messages).await }
            },
        ));
    }

    pub fn stop(&mut self) {
        self.task = None;
    }

    /// One manual fetch (plus mark-read).
    pub async fn refresh(&self) {
        refresh_conversation(&self.api, &self.viewer, &self.peer, &self.messages).await;
    }

    /// Sends the current draft.
    ///
    /// The draft clears immediately; on failure the exact text comes back
    /// so nothing the user typed is lost. An empty draft sends nothing.
    pub async fn send(&self) -> Result<(), TanagerError> {
        let text = self.draft.get();
        if text.trim().is_empty() {
            return Ok(());
        }
        self.draft.set(String::new());

        match self.api.send_message(&self.viewer, &self.peer, &text).await {
            Ok(message) => {
                self.messages.update(|list| list.push(message));
                self.bus.publish(ChangeEvent::MessagesChanged);
                Ok(())
            }
            Err(e) => {
                self.draft.set(text);
                Err(e)
            }
        }
    }
}

async fn refresh_conversation(
    api: &ApiClient,
    viewer: &str,
    peer: &str,
    messages: &ViewState<Vec<Message>>,
) {
    match api.conversation(viewer, peer).await {
        Ok(list) => {
            // Anything unread from the peer is on screen now.
            let has_unread = list
                .iter()
                .any(|m| !m.read && m.sender.username == peer);
            messages.set(list);
            if has_unread {
                if let Err(e) = api.mark_messages_read(viewer, peer).await {
                    warn!(error = %e, peer, "failed to mark conversation read");
                }
            }
        }
        Err(e) => warn!(error = %e, peer, "conversation refresh failed"),
    }
}

/// The contact sidebar: peers plus per-peer unread counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactsView {
    pub contacts: Vec<Contact>,
    pub unread: UnreadCounts,
}

pub struct ContactsStore {
    api: ApiClient,
    bus: ChangeBus,
    viewer: String,
    state: ViewState<ContactsView>,
    task: Option<RefetchTask>,
}

impl ContactsStore {
    pub fn new(api: ApiClient, bus: ChangeBus, viewer: impl Into<String>) -> Self {
        Self {
            api,
            bus,
            viewer: viewer.into(),
            state: ViewState::default(),
            task: None,
        }
    }

    pub fn view(&self) -> &ViewState<ContactsView> {
        &self.state
    }

    pub fn start(&mut self, period: Duration) {
        let api = self.api.clone();
        let viewer = self.viewer.clone();
        let state = self.state.clone();
        self.task = Some(RefetchTask::spawn(
            period,
            Some((self.bus.clone(), ChangeEvent::MessagesChanged)),
            move || {
                let api = api.clone();
                let viewer = viewer.clone();
                let state = state.clone();
                async move { refresh_contacts(&api, &viewer, &state).await }
            },
        ));
    }

    pub fn stop(&mut self) {
        self.task = None;
    }

    pub async fn refresh(&self) {
        refresh_contacts(&self.api, &self.viewer, &self.state).await;
    }
}

async fn refresh_contacts(api: &ApiClient, viewer: &str, state: &ViewState<ContactsView>) {
    let (contacts, unread) =
        futures::join!(api.contacts(viewer), api.unread_counts(viewer));
    // Each half keeps its last good value independently.
    match contacts {
        Ok(contacts) => state.update(|v| v.contacts = contacts),
        Err(e) => warn!(error = %e, "contacts refresh failed"),
    }
    match unread {
        Ok(unread) => state.update(|v| v.unread = unread),
        Err(e) => warn!(error = %e, "unread counts refresh failed"),
    }
}
