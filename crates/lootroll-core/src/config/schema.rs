//! JSON Schema validation for configuration documents.
//!
//! Documents are validated against schema/config.schema.json, embedded at
//! compile time.

use jsonschema::Validator;
use std::sync::OnceLock;

use super::parser::ConfigError;

const CONFIG_SCHEMA_JSON: &str = include_str!("../../schema/config.schema.json");

/// The embedded schema, compiled on first use.
struct ConfigSchema {
    validator: Validator,
}

static CONFIG_SCHEMA: OnceLock<Result<ConfigSchema, String>> = OnceLock::new();

impl ConfigSchema {
    fn compile() -> Result<Self, String> {
        let document: serde_json::Value = serde_json::from_str(CONFIG_SCHEMA_JSON)
            .map_err(|e| format!("invalid schema JSON: {}", e))?;
        let validator = jsonschema::options()
            .build(&document)
            .map_err(|e| format!("schema does not compile: {}", e))?;
        Ok(Self { validator })
    }

    fn shared() -> Result<&'static Self, ConfigError> {
        CONFIG_SCHEMA
            .get_or_init(Self::compile)
            .as_ref()
            .map_err(|reason| ConfigError::SchemaUnavailable(reason.clone()))
    }

    fn violations(&self, document: &serde_json::Value) -> Vec<String> {
        self.validator
            .iter_errors(document)
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect()
    }
}

/// Validate a configuration document against the schema.
///
/// Every violation is reported as `"<message> at <instance path>"`.
pub fn validate_config_schema(document: &serde_json::Value) -> Result<(), ConfigError> {
    let violations = ConfigSchema::shared()?.violations(document);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::SchemaError(violations))
    }
}

/// Check whether a configuration document matches the schema.
pub fn is_valid_config(document: &serde_json::Value) -> bool {
    ConfigSchema::shared()
        .map(|schema| schema.validator.is_valid(document))
        .unwrap_or(false)
}
