// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Tanager integration tests.
//!
//! Provides a wiremock-backed fake server and sample-data builders for
//! fast, deterministic, CI-runnable tests without a real backend.
//!
//! # Components
//!
//! - [`FakeServer`] - wiremock server with helpers for the common routes
//! - [`samples`] - wire-shaped JSON builders for posts, users, messages

pub mod fake_server;
pub mod samples;

pub use fake_server::FakeServer;
