//! Configuration parsing from YAML/JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::schema::validate_config_schema;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config does not match schema: {}", .0.join("; "))]
    SchemaError(Vec<String>),

    #[error("Config schema unavailable: {0}")]
    SchemaUnavailable(String),

    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Thresholds and switches consulted by the vote policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootRollConfig {
    /// Global restriction: 0 passes everything, 1 downgrades one tier,
    /// 2+ or unset leaves the policy's vote untouched.
    pub loot_roll_level: Option<u32>,

    /// Allow NEED on bind-on-equip gear.
    pub allow_boe_need_if_upgrade: bool,

    /// Allow NEED on bind-on-use gear.
    pub allow_bou_need_if_upgrade: bool,

    /// Greed instead of need when an item's stats do not fit the spec.
    pub smart_need_by_spec: bool,

    /// Score ratio an off-type armor piece must reach over the equipped one.
    pub cross_armor_extra_margin: f32,

    /// Fraction above the average item level a token must reach.
    pub token_ilevel_margin: f32,

    /// Tell the controlling player which vote was cast.
    pub announce_to_master: bool,
}

impl Default for LootRollConfig {
    fn default() -> Self {
        Self {
            loot_roll_level: None,
            allow_boe_need_if_upgrade: false,
            allow_bou_need_if_upgrade: false,
            smart_need_by_spec: true,
            cross_armor_extra_margin: 1.2,
            token_ilevel_margin: 0.1,
            announce_to_master: false,
        }
    }
}

impl LootRollConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Self::from_value(serde_json::Value::Null);
        }
        let value: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load a file, choosing the format by extension (`.json`, else YAML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_yaml_file(path),
        }
    }

    fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        // An empty YAML document parses as null; treat it as all defaults.
        let value = if value.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            value
        };

        validate_config_schema(&value)?;

        let config: LootRollConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate numeric thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cross_armor_extra_margin.is_finite() || self.cross_armor_extra_margin < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "cross_armor_extra_margin must be a finite number >= 0, got {}",
                self.cross_armor_extra_margin
            )));
        }

        if !self.token_ilevel_margin.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "token_ilevel_margin must be finite, got {}",
                self.token_ilevel_margin
            )));
        }

        Ok(())
    }

    /// Effective restriction level; unset behaves like level 2.
    pub fn restriction_level(&self) -> u32 {
        self.loot_roll_level.unwrap_or(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_yaml_keeps_defaults() {
        let config = LootRollConfig::from_yaml(
            r#"
loot_roll_level: 1
allow_boe_need_if_upgrade: true
"#,
        )
        .unwrap();

        assert_eq!(config.loot_roll_level, Some(1));
        assert!(config.allow_boe_need_if_upgrade);
        assert!(!config.allow_bou_need_if_upgrade);
        assert!(config.smart_need_by_spec);
        assert_eq!(config.cross_armor_extra_margin, 1.2);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = LootRollConfig::from_yaml("").unwrap();
        assert_eq!(config, LootRollConfig::default());
        assert_eq!(config.restriction_level(), 2);
    }

    #[test]
    fn test_parse_json() {
        let config =
            LootRollConfig::from_json(r#"{"token_ilevel_margin": 0.02, "announce_to_master": true}"#)
                .unwrap();
        assert_eq!(config.token_ilevel_margin, 0.02);
        assert!(config.announce_to_master);
    }

    #[test]
    fn test_unknown_key_rejected_by_schema() {
        let result = LootRollConfig::from_yaml("loot_roll_levle: 1\n");
        assert!(matches!(result, Err(ConfigError::SchemaError(_))));
    }

    #[test]
    fn test_negative_cross_armor_margin_rejected() {
        let config = LootRollConfig {
            cross_armor_extra_margin: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_non_positive_token_margin_is_allowed() {
        let config = LootRollConfig::from_yaml("token_ilevel_margin: -0.5\n").unwrap();
        assert_eq!(config.token_ilevel_margin, -0.5);
    }
}
