// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./tanager.toml` > `~/.config/tanager/tanager.toml`
//! > `/etc/tanager/tanager.toml` with environment variable overrides via the
//! `TANAGER_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TanagerConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tanager/tanager.toml` (system-wide)
/// 3. `~/.config/tanager/tanager.toml` (user XDG config)
/// 4. `./tanager.toml` (local directory)
/// 5. `TANAGER_*` environment variables
pub fn load_config() -> Result<TanagerConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TanagerConfig::default()))
        .merge(Toml::file("/etc/tanager/tanager.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("tanager/tanager.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("tanager.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TanagerConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TanagerConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TANAGER_API_BASE_URL` must map to
/// `api.base_url`, not `api.base.url`.
fn env_provider() -> Env {
    Env::prefixed("TANAGER_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: TANAGER_API_BASE_URL -> "api_base_url"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("api_", "api.", 1)
            .replacen("session_", "session.", 1)
            .replacen("sync_", "sync.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}
