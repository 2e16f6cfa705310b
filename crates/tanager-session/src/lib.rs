// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session lifecycle: restore on startup, login, logout, and subscription.
//!
//! [`SessionStore`] owns the signed-in [`Identity`]. It restores the
//! persisted session once at startup, after which `is_restored()` turns
//! true. Callers that gate rendering (the [`guard::RouteGuard`]) use that
//! flag to avoid acting on a session that merely has not loaded yet.
//!
//! A corrupt persisted entry (the literal string `"undefined"`, or JSON
//! that does not decode) is treated as no session and is removed, never
//! surfaced as an error.

pub mod guard;
pub mod persist;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arc_swap::ArcSwapOption;
use tanager_core::{Identity, KeyValueStore, TanagerError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub use persist::{FileStore, MemoryStore};

/// The key under which the serialized identity is persisted.
const SESSION_KEY: &str = "session";

/// Broadcast state of the session, as seen by subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Startup: the persisted session has not been read yet.
    Unrestored,
    SignedOut,
    SignedIn(Identity),
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::SignedIn(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Owns the current session and its persisted copy.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    current: ArcSwapOption<Identity>,
    restored: AtomicBool,
    tx: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (tx, _) = watch::channel(SessionState::Unrestored);
        Self {
            store,
            current: ArcSwapOption::empty(),
            restored: AtomicBool::new(false),
            tx,
        }
    }

    /// Reads the persisted session back into memory.
    ///
    /// Absent, corrupt, or undecodable entries yield `None`; corrupt
    /// entries are removed so they are not re-parsed on the next startup.
    /// Idempotent, and infallible from the caller's point of view.
    pub async fn restore(&self) -> Option<Identity> {
        let identity = match self.store.get(SESSION_KEY).await {
            Ok(Some(raw)) => self.decode_persisted(&raw).await,
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "failed to read persisted session");
                None
            }
        };

        match &identity {
            Some(identity) => {
                info!(username = identity.username.as_str(), "session restored");
                self.current.store(Some(Arc::new(identity.clone())));
                let _ = self.tx.send(SessionState::SignedIn(identity.clone()));
            }
            None => {
                debug!("no persisted session");
                self.current.store(None);
                let _ = self.tx.send(SessionState::SignedOut);
            }
        }
        self.restored.store(true, Ordering::Release);
        identity
    }

    async fn decode_persisted(&self, raw: &str) -> Option<Identity> {
        // Historical clients persisted the literal string "undefined".
        if raw.trim().is_empty() || raw.trim() == "undefined" {
            warn!("persisted session is corrupt, clearing it");
            self.clear_persisted().await;
            return None;
        }
        match serde_json::from_str::<Identity>(raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!(error = %e, "persisted session failed to decode, clearing it");
                self.clear_persisted().await;
                None
            }
        }
    }

    async fn clear_persisted(&self) {
        if let Err(e) = self.store.remove(SESSION_KEY).await {
            warn!(error = %e, "failed to clear persisted session");
        }
    }

    /// Records a successful sign-in: in-memory state first, then the
    /// persisted copy, then subscribers.
    pub async fn login(&self, identity: Identity) -> Result<(), TanagerError> {
        let raw = serde_json::to_string(&identity)
            .map_err(|e| TanagerError::Internal(format!("failed to encode session: {e}")))?;
        self.current.store(Some(Arc::new(identity.clone())));
        self.restored.store(true, Ordering::Release);
        self.store.set(SESSION_KEY, &raw).await?;
        info!(username = identity.username.as_str(), "signed in");
        let _ = self.tx.send(SessionState::SignedIn(identity));
        Ok(())
    }

    /// Clears the in-memory session and its persisted copy.
    pub async fn logout(&self) -> Result<(), TanagerError> {
        self.current.store(None);
        self.store.remove(SESSION_KEY).await?;
        info!("signed out");
        let _ = self.tx.send(SessionState::SignedOut);
        Ok(())
    }

    /// Snapshot of the signed-in identity, if any.
    pub fn current(&self) -> Option<Identity> {
        self.current.load_full().map(|arc| (*arc).clone())
    }

    /// Whether the startup restore has completed (regardless of outcome).
    pub fn is_restored(&self) -> bool {
        self.restored.load(Ordering::Acquire)
    }

    /// Subscribes to session state transitions.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }
}
