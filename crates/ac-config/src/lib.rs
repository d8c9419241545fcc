// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Configuration for the inline autocomplete plugin
//!
//! Layers are resolved as JSON, lowest precedence first:
//! built-in defaults < TOML file < `AC_*` environment variables.
//! The merged value is validated against a schema generated from
//! [`AutocompleteConfig`] before it is deserialized.

pub mod env;
pub mod error;
pub mod loader;
pub mod merge;

use std::path::Path;
use std::str::FromStr;

use ac_logging::{LogFormat, LogLevel};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as J;
use tracing::debug;

pub use error::ConfigError;

/// Two-character marker that opens a match region
pub const DEFAULT_TRIGGER: &str = "<>";

/// Upper bound on the number of candidates offered at once
pub const DEFAULT_MAX_SUGGESTIONS: usize = 8;

/// Built-in suggestion corpus, in rank order
pub const DEFAULT_SUGGESTIONS: &[&str] = &[
    "world",
    "work",
    "wonder",
    "word",
    "workflow",
    "workspace",
    "hello",
    "help",
    "heart",
    "home",
    "house",
    "history",
    "javascript",
    "java",
    "json",
    "jsx",
    "journey",
    "react",
    "redux",
    "router",
    "render",
    "return",
    "typescript",
    "test",
    "template",
    "theme",
    "token",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct AutocompleteConfig {
    /// Sequence that starts a match; must be non-empty and single-line
    pub trigger: String,
    /// Maximum number of candidates shown
    pub max_suggestions: usize,
    /// Ordered corpus; candidates keep this order
    pub suggestions: Vec<String>,
    /// error, warn, info, debug or trace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// plaintext or json
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<String>,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            trigger: DEFAULT_TRIGGER.to_string(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            suggestions: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            log_level: None,
            log_format: None,
        }
    }
}

impl AutocompleteConfig {
    /// Defaults overlaid with a TOML document
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let layer = loader::parse_toml_to_json(toml_str)?;
        loader::validate_against_schema(&layer)?;
        Self::resolve([layer])
    }

    /// Defaults < optional file < process environment
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let file_layer = file.map(loader::read_layer_from_file).transpose()?;
        let env_layer = env::env_overlay()?;
        Self::resolve(file_layer.into_iter().chain([env_layer]))
    }

    /// Like [`AutocompleteConfig::load`], with the environment given explicitly
    pub fn load_with_env(
        file: Option<&Path>,
        vars: config::Map<String, String>,
    ) -> Result<Self, ConfigError> {
        let file_layer = file.map(loader::read_layer_from_file).transpose()?;
        let env_layer = env::env_overlay_from(vars)?;
        Self::resolve(file_layer.into_iter().chain([env_layer]))
    }

    fn resolve(layers: impl IntoIterator<Item = J>) -> Result<Self, ConfigError> {
        let mut json = serde_json::to_value(Self::default())?;
        for layer in layers {
            merge::merge_two_json(&mut json, layer);
        }
        loader::validate_against_schema(&json)?;

        let config: Self = serde_json::from_value(json)?;
        config.validate()?;
        debug!(
            trigger = %config.trigger,
            max_suggestions = config.max_suggestions,
            corpus = config.suggestions.len(),
            "resolved autocomplete configuration"
        );
        Ok(config)
    }

    /// Checks the constraints the schema cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trigger.is_empty() {
            return Err(ConfigError::Invalid {
                key: "trigger",
                reason: "must not be empty".into(),
            });
        }
        if self.trigger.contains(['\n', '\r']) {
            return Err(ConfigError::Invalid {
                key: "trigger",
                reason: "must not contain a line break".into(),
            });
        }
        if self.max_suggestions == 0 {
            return Err(ConfigError::Invalid {
                key: "max-suggestions",
                reason: "must be at least 1".into(),
            });
        }
        self.log_level()?;
        self.log_format()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<LogLevel, ConfigError> {
        self.log_level
            .as_deref()
            .map(LogLevel::from_str)
            .transpose()
            .map(Option::unwrap_or_default)
            .map_err(|reason| ConfigError::Invalid {
                key: "log-level",
                reason,
            })
    }

    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        self.log_format
            .as_deref()
            .map(LogFormat::from_str)
            .transpose()
            .map(Option::unwrap_or_default)
            .map_err(|reason| ConfigError::Invalid {
                key: "log-format",
                reason,
            })
    }

    /// Installs the global subscriber with this configuration's level and format.
    pub fn init_logging(&self, component: &str) -> anyhow::Result<()> {
        ac_logging::init(component, self.log_level()?.into(), self.log_format()?)
    }
}
