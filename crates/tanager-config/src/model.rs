// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Tanager client runtime.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Tanager configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TanagerConfig {
    /// Remote API connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Session persistence settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Polling and refetch settings.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Remote API connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the remote API, including any path prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Send cookies with every request (the server uses cookie sessions).
    #[serde(default = "default_send_credentials")]
    pub send_credentials: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            send_credentials: default_send_credentials(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_send_credentials() -> bool {
    true
}

/// Session persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Path to the JSON file holding the persisted session entry.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("tanager").join("session.json"))
        .unwrap_or_else(|| std::path::PathBuf::from("session.json"))
        .to_string_lossy()
        .into_owned()
}

/// Polling and refetch configuration.
///
/// Periods mirror the product's observed behavior: the active conversation
/// polls fastest, the contact list a little slower, the feed slowest (the
/// feed mostly refetches on the content-changed signal).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Feed refetch period in seconds.
    #[serde(default = "default_feed_interval_secs")]
    pub feed_interval_secs: u64,

    /// Contact list and unread-count refetch period in seconds.
    #[serde(default = "default_contacts_interval_secs")]
    pub contacts_interval_secs: u64,

    /// Active conversation refetch period in seconds.
    #[serde(default = "default_conversation_interval_secs")]
    pub conversation_interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            feed_interval_secs: default_feed_interval_secs(),
            contacts_interval_secs: default_contacts_interval_secs(),
            conversation_interval_secs: default_conversation_interval_secs(),
        }
    }
}

fn default_feed_interval_secs() -> u64 {
    10
}

fn default_contacts_interval_secs() -> u64 {
    5
}

fn default_conversation_interval_secs() -> u64 {
    3
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
