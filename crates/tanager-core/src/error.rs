// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tanager client runtime.

use thiserror::Error;

/// The primary error type used across the Tanager workspace.
///
/// Variants follow the failure taxonomy of the remote API contract:
/// transport failures (no response at all), authorization failures (401),
/// other non-2xx responses with a server-supplied message, local storage
/// failures, and configuration problems.
#[derive(Debug, Error)]
pub enum TanagerError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/transport failures where no HTTP response was received.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Non-2xx API responses. `message` is extracted defensively from the
    /// response body (structured `message`/`error` field, plain text, or a
    /// generic fallback) and is always safe to show to the user.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 401 responses. The current session should be treated as invalid.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Persisted key-value storage errors (read, write, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TanagerError {
    /// Returns true for errors that invalidate the current session.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, TanagerError::Unauthorized { .. })
    }

    /// The user-facing message for this error, without the variant prefix.
    pub fn user_message(&self) -> String {
        match self {
            TanagerError::Api { message, .. } | TanagerError::Unauthorized { message } => {
                message.clone()
            }
            TanagerError::Transport { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_auth_error() {
        let err = TanagerError::Unauthorized {
            message: "session expired".into(),
        };
        assert!(err.is_auth_error());
    }

    #[test]
    fn api_error_is_not_auth_error() {
        let err = TanagerError::Api {
            status: 422,
            message: "username taken".into(),
        };
        assert!(!err.is_auth_error());
    }

    #[test]
    fn user_message_strips_variant_prefix() {
        let err = TanagerError::Api {
            status: 400,
            message: "content must not be empty".into(),
        };
        assert_eq!(err.user_message(), "content must not be empty");
        assert!(err.to_string().contains("400"));
    }
}
