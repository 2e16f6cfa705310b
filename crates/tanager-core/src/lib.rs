// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tanager client runtime.
//!
//! This crate provides the error taxonomy, the wire model shared by every
//! feature, and the storage trait implemented by persistence backends.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TanagerError;
pub use traits::KeyValueStore;
pub use types::{
    Activity, ActivityKind, ActorRef, Author, Contact, Credentials, Identity, Message, Post,
    PostDraft, ProfileUpdate, UnreadCounts, Upload,
};
