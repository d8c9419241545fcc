// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! TOML loading and JSON schema validation

use std::path::Path;
use std::sync::OnceLock;

use jsonschema::{Draft, JSONSchema};
use serde_json::Value as J;

use crate::error::ConfigError;
use crate::AutocompleteConfig;

/// Parse a TOML document into JSON for validation and merging
pub fn parse_toml_to_json(toml_str: &str) -> Result<J, ConfigError> {
    let table: toml::Table = toml::from_str(toml_str)?;
    Ok(serde_json::to_value(table)?)
}

/// Read one configuration file as a validated JSON layer
pub fn read_layer_from_file(path: &Path) -> Result<J, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let json = parse_toml_to_json(&content)?;
    validate_against_schema(&json)?;
    Ok(json)
}

/// JSON schema generated from [`AutocompleteConfig`]
pub fn config_schema() -> Result<&'static J, ConfigError> {
    static SCHEMA: OnceLock<Result<J, String>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            let root = schemars::schema_for!(AutocompleteConfig);
            serde_json::to_value(root).map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(|e| ConfigError::Schema(vec![format!("schema generation failed: {e}")]))
}

/// Keys the schema declares at the top level
pub fn known_keys() -> Result<Vec<String>, ConfigError> {
    Ok(config_schema()?
        .get("properties")
        .and_then(J::as_object)
        .map(|props| props.keys().cloned().collect())
        .unwrap_or_default())
}

/// Validate a JSON layer against the configuration schema
pub fn validate_against_schema(v: &J) -> Result<(), ConfigError> {
    static VALIDATOR: OnceLock<Result<JSONSchema, String>> = OnceLock::new();
    let schema = config_schema()?;
    let validator = VALIDATOR
        .get_or_init(|| {
            JSONSchema::options()
                .with_draft(Draft::Draft202012)
                .compile(schema)
                .map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(|e| ConfigError::Schema(vec![format!("schema compilation failed: {e}")]))?;

    if let Err(errors) = validator.validate(v) {
        return Err(ConfigError::Schema(errors.map(|e| e.to_string()).collect()));
    }
    Ok(())
}
