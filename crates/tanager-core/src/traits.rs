// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits at the workspace seams.

use async_trait::async_trait;

use crate::error::TanagerError;

/// Persisted client state, modeled as a simple key-value store with
/// get/set/remove. Implementations must tolerate absent keys; a `get` for a
/// missing key returns `Ok(None)`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, TanagerError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), TanagerError>;
    async fn remove(&self, key: &str) -> Result<(), TanagerError>;
}
