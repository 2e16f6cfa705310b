// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication endpoints.

use tanager_core::{Credentials, Identity, TanagerError};
use tracing::info;

use crate::client::ApiClient;

impl ApiClient {
    /// POST `/auth/login`: exchanges credentials for the signed-in identity.
    pub async fn login(&self, credentials: &Credentials) -> Result<Identity, TanagerError> {
        let identity: Identity = self
            .expect_json(self.http().post(self.url("/auth/login")).json(credentials))
            .await?;
        info!(username = identity.username.as_str(), "login succeeded");
        Ok(identity)
    }

    /// POST `/auth/register`: creates an account and returns its identity.
    pub async fn register(&self, credentials: &Credentials) -> Result<Identity, TanagerError> {
        let identity: Identity = self
            .expect_json(
                self.http()
                    .post(self.url("/auth/register"))
                    .json(credentials),
            )
            .await?;
        info!(username = identity.username.as_str(), "registration succeeded");
        Ok(identity)
    }
}
