// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Environment variable overlay

use serde_json::Value as J;
use tracing::debug;

use crate::error::ConfigError;

/// Prefix of every environment variable the overlay reads
pub const ENV_PREFIX: &str = "AC";

/// JSON overlay from `AC_*` variables of the process environment
pub fn env_overlay() -> Result<J, ConfigError> {
    overlay_from(None)
}

/// JSON overlay from an explicit variable map instead of the process environment
pub fn env_overlay_from(vars: config::Map<String, String>) -> Result<J, ConfigError> {
    overlay_from(Some(vars))
}

fn overlay_from(vars: Option<config::Map<String, String>>) -> Result<J, ConfigError> {
    // config-rs maps AC_MAX_SUGGESTIONS -> "max-suggestions"
    let built = config::Config::builder()
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .convert_case(config::Case::Kebab)
                .source(vars),
        )
        .build()?;
    let raw = built.try_deserialize::<serde_json::Map<String, J>>()?;

    let known = crate::loader::known_keys()?;
    let mut overlay = serde_json::Map::new();
    for (key, value) in raw {
        if !known.contains(&key) {
            debug!(key = %key, "ignoring unrelated {}_ variable", ENV_PREFIX);
            continue;
        }
        let value = coerce(&key, value)?;
        overlay.insert(key, value);
    }
    Ok(J::Object(overlay))
}

/// Environment values arrive as strings; give them the shape the schema expects.
fn coerce(key: &str, value: J) -> Result<J, ConfigError> {
    let J::String(raw) = value else {
        return Ok(value);
    };
    match key {
        "max-suggestions" => raw
            .trim()
            .parse::<u64>()
            .map(J::from)
            .map_err(|e| ConfigError::Invalid {
                key: "max-suggestions",
                reason: format!("{raw:?} is not a count: {e}"),
            }),
        "suggestions" => Ok(J::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| J::String(s.to_string()))
                .collect(),
        )),
        _ => Ok(J::String(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_keys_become_kebab_case() {
        let overlay = env_overlay_from(vars(&[
            ("AC_MAX_SUGGESTIONS", "3"),
            ("AC_LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert_eq!(overlay, json!({"max-suggestions": 3, "log-level": "debug"}));
    }

    #[test]
    fn test_suggestions_are_comma_separated() {
        let overlay = env_overlay_from(vars(&[("AC_SUGGESTIONS", "alpha, beta,,gamma")])).unwrap();
        assert_eq!(overlay, json!({"suggestions": ["alpha", "beta", "gamma"]}));
    }

    #[test]
    fn test_unrelated_variables_are_ignored() {
        let overlay = env_overlay_from(vars(&[("AC_SOMETHING_ELSE", "1"), ("PATH", "/bin")])).unwrap();
        assert_eq!(overlay, json!({}));
    }

    #[test]
    fn test_bad_count_is_rejected() {
        let err = env_overlay_from(vars(&[("AC_MAX_SUGGESTIONS", "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "max-suggestions", .. }));
    }
}
