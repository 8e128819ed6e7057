//! Deep-merge of JSON runtime overrides into the base runtime config.

use serde_json::Value;

use super::RuntimeConfig;
use crate::error::ConfigError;

/// Recursively merge `overrides` into `base`.
///
/// Objects merge key-by-key (nested keys merge rather than replacing the
/// whole object); any other value kind in `overrides` wins outright.
pub fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            for (key, value) in override_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base_slot, other) => *base_slot = other,
    }
}

impl RuntimeConfig {
    /// Apply a caller-supplied JSON override string over this base config.
    ///
    /// Unspecified keys retain base values. Returns the merged, immutable
    /// runtime config.
    pub fn with_overrides(&self, overrides: Option<&str>) -> Result<RuntimeConfig, ConfigError> {
        let Some(overrides) = overrides else {
            return Ok(self.clone());
        };
        let override_value: Value = serde_json::from_str(overrides)?;
        let mut base = serde_json::to_value(self)?;
        merge_json(&mut base, override_value);
        Ok(serde_json::from_value(base)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_override_teams_preserves_other_keys() {
        let base = RuntimeConfig {
            fps: 5,
            allow_single_frame: false,
            teams: vec!["A".to_string()],
        };
        let merged = base
            .with_overrides(Some(r#"{"teams": ["B", "C"]}"#))
            .unwrap();

        assert_eq!(merged.fps, 5);
        assert!(!merged.allow_single_frame);
        assert_eq!(merged.teams, vec!["B".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_no_overrides_returns_base() {
        let base = RuntimeConfig::default();
        let merged = base.with_overrides(None).unwrap();
        assert_eq!(merged, base);
    }

    #[test]
    fn test_invalid_override_json_is_an_error() {
        let err = RuntimeConfig::default()
            .with_overrides(Some("{not json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::OverrideError(_)));
    }

    #[test]
    fn test_merge_json_recurses_into_nested_objects() {
        let mut base = json!({"outer": {"a": 1, "b": 2}, "keep": true});
        merge_json(&mut base, json!({"outer": {"b": 3}}));
        assert_eq!(base, json!({"outer": {"a": 1, "b": 3}, "keep": true}));
    }

    #[test]
    fn test_merge_json_scalar_replaces_object() {
        let mut base = json!({"outer": {"a": 1}});
        merge_json(&mut base, json!({"outer": 7}));
        assert_eq!(base, json!({"outer": 7}));
    }

    #[test]
    fn test_merge_json_inserts_new_keys() {
        let mut base = json!({"a": 1});
        merge_json(&mut base, json!({"b": 2}));
        assert_eq!(base, json!({"a": 1, "b": 2}));
    }
}
