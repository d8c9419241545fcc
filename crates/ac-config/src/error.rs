// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::path::PathBuf;

/// Failures while building an [`crate::AutocompleteConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("environment overlay: {0}")]
    Environment(#[from] config::ConfigError),

    #[error("config schema validation failed:\n  - {}", .0.join("\n  - "))]
    Schema(Vec<String>),

    #[error("config conversion failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}
