//! Raw configuration loading.
//!
//! Reads a flat JSON record from a file, a reader or a string into a
//! [`RawConfig`]. Only the JSON shape is checked here; field validation is left
//! to [`crate::config::validate`] so that every field error is reported together.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::common::LoadError;
use crate::config::RawConfig;

/// Parses a raw configuration from a JSON string.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for malformed JSON and [`LoadError::NotAnObject`] when
/// the document is not a JSON object.
pub fn parse_raw(json: &str) -> Result<RawConfig, LoadError> {
    let value: Value = serde_json::from_str(json)?;
    into_object(value)
}

/// Reads a raw configuration from any reader (e.g. stdin).
///
/// # Errors
///
/// Same as [`parse_raw`].
pub fn read_raw<R: Read>(reader: R) -> Result<RawConfig, LoadError> {
    let value: Value = serde_json::from_reader(reader)?;
    into_object(value)
}

/// Loads a raw configuration from a JSON file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise as [`parse_raw`].
pub fn load_raw(path: &Path) -> Result<RawConfig, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_raw(&text)
}

fn into_object(value: Value) -> Result<RawConfig, LoadError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(LoadError::NotAnObject("null")),
        Value::Bool(_) => Err(LoadError::NotAnObject("a boolean")),
        Value::Number(_) => Err(LoadError::NotAnObject("a number")),
        Value::String(_) => Err(LoadError::NotAnObject("a string")),
        Value::Array(_) => Err(LoadError::NotAnObject("an array")),
    }
}
