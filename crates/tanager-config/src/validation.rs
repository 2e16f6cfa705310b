// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: well-formed base URLs, non-zero polling periods, and a
//! non-empty session storage path.

use crate::diagnostic::ConfigError;
use crate::model::TanagerConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TanagerConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    } else {
        match url::Url::parse(base_url) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
            Ok(parsed) => {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "api.base_url must use http or https, got scheme `{}`",
                        parsed.scheme()
                    ),
                });
            }
            Err(e) => {
                errors.push(ConfigError::Validation {
                    message: format!("api.base_url `{base_url}` is not a valid URL: {e}"),
                });
            }
        }
    }

    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.session.storage_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "session.storage_path must not be empty".to_string(),
        });
    }

    for (name, value) in [
        ("sync.feed_interval_secs", config.sync.feed_interval_secs),
        (
            "sync.contacts_interval_secs",
            config.sync.contacts_interval_secs,
        ),
        (
            "sync.conversation_interval_secs",
            config.sync.conversation_interval_secs,
        ),
    ] {
        if value == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{name} must be at least 1, got {value}"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
