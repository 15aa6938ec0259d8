//! Mapping file loading.
//!
//! A mapping document is a flat object keyed by canonical indicator id. Each
//! value is a column name, or `null` / `""` to mark the indicator absent.
//!
//! ```json
//! { "general_health": "ph003", "terminally_ill": null }
//! ```
//!
//! TOML documents use the same shape; with no null in TOML, absence is written
//! as an empty string.

use std::path::Path;

use cfs_model::VariableMap;
use serde_json::Value;
use tracing::debug;

use crate::error::MappingError;

/// Parse a JSON mapping document.
pub fn parse_mapping_json(text: &str) -> Result<VariableMap, MappingError> {
    let document: Value = serde_json::from_str(text)?;
    let object = match document {
        Value::Object(object) => object,
        other => {
            return Err(MappingError::configuration(format!(
                "expected a JSON object of id -> column, found {}",
                json_kind(&other)
            )));
        }
    };
    object
        .into_iter()
        .map(|(id, value)| match value {
            Value::String(column) => Ok((id, Some(column))),
            Value::Null => Ok((id, None)),
            other => Err(MappingError::configuration(format!(
                "value for '{id}' must be a column name or null, found {}",
                json_kind(&other)
            ))),
        })
        .collect()
}

/// Parse a TOML mapping document.
pub fn parse_mapping_toml(text: &str) -> Result<VariableMap, MappingError> {
    let table: toml::Table = toml::from_str(text)?;
    table
        .into_iter()
        .map(|(id, value)| match value {
            toml::Value::String(column) => Ok((id, Some(column))),
            other => Err(MappingError::configuration(format!(
                "value for '{id}' must be a column name string, found {}",
                other.type_str()
            ))),
        })
        .collect()
}

/// Load a mapping file, picking the parser from the file extension.
pub fn load_mapping(path: &Path) -> Result<VariableMap, MappingError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let parse: fn(&str) -> Result<VariableMap, MappingError> = match extension.as_deref() {
        Some("json") => parse_mapping_json,
        Some("toml") => parse_mapping_toml,
        _ => {
            return Err(MappingError::configuration(format!(
                "unsupported mapping file {} (expected .json or .toml)",
                path.display()
            )));
        }
    };
    let text = std::fs::read_to_string(path).map_err(|source| MappingError::io(path, source))?;
    let map = parse(&text)?;
    debug!(path = %path.display(), entries = map.len(), "loaded variable mapping");
    Ok(map)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
