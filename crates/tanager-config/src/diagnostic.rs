// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostics for configuration failures.
//!
//! Figment reports deserialization problems as a flat error list; this
//! module turns each one into a miette diagnostic, attaching a source span
//! and a fuzzy "did you mean" hint for misspelled keys.

#![allow(unused_assignments)] // triggered by miette's Diagnostic derive

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score below which a near-miss is not offered as a hint.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration problem, rendered to the user through miette.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key the config model does not know about.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(tanager::config::unknown_key),
        help("{}", unknown_key_hint(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Closest valid key, when one scores above the hint threshold.
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a recognized key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value of the wrong TOML type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(tanager::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A well-formed value that fails a semantic check.
    #[error("validation error: {message}")]
    #[diagnostic(code(tanager::config::validation))]
    Validation { message: String },

    /// Any figment error without a richer mapping. Every config field has
    /// a serde default, so missing-field errors cannot occur; anything
    /// unexpected lands here verbatim.
    #[error("configuration error: {0}")]
    #[diagnostic(code(tanager::config::other))]
    Other(String),
}

fn unknown_key_hint(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Maps every entry of a `figment::Error` onto a [`ConfigError`].
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                let located = locate_key(&error, field, toml_sources);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, &valid_keys),
                    valid_keys: valid_keys.join(", "),
                    span: located.as_ref().map(|(span, _)| *span),
                    src: located.map(|(_, src)| src),
                }
            }
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: joined_path(&error),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

fn joined_path(error: &figment::Error) -> String {
    error
        .path
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Resolves an unknown key to a span in the TOML file figment read it from.
fn locate_key(
    error: &figment::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let path = error
        .metadata
        .as_ref()?
        .source
        .as_ref()
        .and_then(|source| match source {
            figment::Source::File(p) => Some(p.display().to_string()),
            _ => None,
        })?;
    let (name, content) = toml_sources.iter().find(|(p, _)| p == &path)?;
    let section: Vec<String> = error.path.iter().map(|s| s.to_string()).collect();
    let offset = find_key_offset(content, &section, field)?;
    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(name, content.clone()),
    ))
}

/// Byte offset of `field` within `content`, scoped to the `[section]` the
/// error path names. An empty path searches from the top of the file.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let start = match path.first() {
        None => 0,
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header)? + header.len()
        }
    };

    let mut offset = start;
    for line in content[start..].lines() {
        let key = line.trim_start();
        if let Some(rest) = key.strip_prefix(field) {
            // Only a whole-key match counts, not a shared prefix.
            if rest.starts_with([' ', '\t', '=']) {
                return Some(offset + (line.len() - key.len()));
            }
        }
        offset += line.len() + 1;
    }
    None
}

/// Closest valid key by Jaro-Winkler similarity, if any scores above the
/// hint threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Prints each diagnostic to stderr through miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut out = String::new();
        if handler.render_report(&mut out, error as &dyn Diagnostic).is_ok() {
            eprint!("{out}");
        } else {
            eprintln!("error: {error}");
        }
    }
}
