// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the remote social-network API.
//!
//! [`ApiClient`] is the single configured entry point; every endpoint is a
//! method on it, grouped into feature modules. All methods return
//! [`tanager_core::TanagerError`] with human-readable messages recovered
//! from whatever body shape the server sent.

mod activities;
mod auth;
pub mod client;
mod messages;
mod posts;
mod users;

pub use client::{ApiClient, extract_error_message};
