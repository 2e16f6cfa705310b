// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data synchronization runtime: observable view state, optimistic
//! mutation with exact rollback, periodic refetching with a
//! content-changed broadcast, and the concrete view stores built on top.

pub mod activity;
pub mod bus;
pub mod feed;
pub mod messages;
pub mod optimistic;
pub mod profile;
pub mod scheduler;
pub mod state;

pub use activity::ActivityStore;
pub use bus::{ChangeBus, ChangeEvent};
pub use feed::{FeedStore, FeedTab};
pub use messages::{ContactsStore, ContactsView, ConversationStore};
pub use profile::{FollowControl, FollowState};
pub use scheduler::RefetchTask;
pub use state::ViewState;
