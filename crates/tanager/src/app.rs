// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared command context: config, API client, session, change bus.

use std::sync::Arc;

use tanager_api::ApiClient;
use tanager_config::TanagerConfig;
use tanager_core::{Identity, TanagerError};
use tanager_session::guard::{GuardDecision, RouteGuard};
use tanager_session::{FileStore, SessionStore};
use tanager_sync::ChangeBus;

pub struct App {
    pub config: TanagerConfig,
    pub api: ApiClient,
    pub session: Arc<SessionStore>,
    pub bus: ChangeBus,
}

impl App {
    /// Builds the context and restores the persisted session.
    pub async fn init(config: TanagerConfig) -> Result<Self, TanagerError> {
        let api = ApiClient::new(&config.api)?;
        let store = FileStore::new(config.session.storage_path.clone());
        let session = Arc::new(SessionStore::new(Arc::new(store)));
        session.restore().await;

        Ok(Self {
            config,
            api,
            session,
            bus: ChangeBus::new(),
        })
    }

    /// The signed-in identity, or an auth error telling the user to log in.
    /// Protected commands go through this, mirroring the route guard.
    pub fn require_identity(&self) -> Result<Identity, TanagerError> {
        let guard = RouteGuard::new(&self.session);
        if guard.check("/") == GuardDecision::Allow {
            if let Some(identity) = self.session.current() {
                return Ok(identity);
            }
        }
        Err(TanagerError::Unauthorized {
            message: "no active session; run `tanager login` first".into(),
        })
    }
}
