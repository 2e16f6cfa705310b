// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value persistence backends.
//!
//! [`FileStore`] keeps all entries in a single JSON object file, created on
//! first write. [`MemoryStore`] backs tests and ephemeral sessions.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tanager_core::{KeyValueStore, TanagerError};
use tokio::sync::Mutex;
use tracing::debug;

fn storage_err(e: impl std::error::Error + Send + Sync + 'static) -> TanagerError {
    TanagerError::Storage {
        source: Box::new(e),
    }
}

/// File-backed store: one JSON object (`{"key": "value", ...}`) per file.
///
/// Writes serialize through an internal lock, so concurrent `set`/`remove`
/// calls on the same store never interleave a read-modify-write cycle.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<HashMap<String, String>, TanagerError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => serde_json::from_str(&raw).map_err(storage_err),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(storage_err(e)),
        }
    }

    async fn write_map(&self, map: &HashMap<String, String>) -> Result<(), TanagerError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(storage_err)?;
        }
        let raw = serde_json::to_string_pretty(map).map_err(storage_err)?;
        tokio::fs::write(&self.path, raw).await.map_err(storage_err)?;
        debug!(path = %self.path.display(), entries = map.len(), "store written");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, TanagerError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_map().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), TanagerError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }

    async fn remove(&self, key: &str) -> Result<(), TanagerError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: std::sync::Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an entry (test setup).
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.guard().insert(key.to_string(), value.to_string());
        self
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, TanagerError> {
        Ok(self.guard().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), TanagerError> {
        self.guard().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), TanagerError> {
        self.guard().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_store_round_trips_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("kv.json"));

        assert_eq!(store.get("session").await.unwrap(), None);

        store.set("session", r#"{"username":"ada"}"#).await.unwrap();
        assert_eq!(
            store.get("session").await.unwrap().as_deref(),
            Some(r#"{"username":"ada"}"#)
        );

        store.remove("session").await.unwrap();
        assert_eq!(store.get("session").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_remove_of_missing_key_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("kv.json"));
        store.remove("absent").await.unwrap();
        // The file was never created.
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv.json");

        FileStore::new(&path).set("k", "v").await.unwrap();
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryStore::new();
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
