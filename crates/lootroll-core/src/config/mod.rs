//! Loot roll configuration.
//!
//! Configuration is structured data loaded from YAML/JSON, validated
//! semantically and against an embedded JSON Schema. It is read-only for the
//! lifetime of the process and passed by reference into every policy call.

mod parser;
mod schema;

pub use parser::{ConfigError, LootRollConfig};
pub use schema::{is_valid_config, validate_config_schema};
