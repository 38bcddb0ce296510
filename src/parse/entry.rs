//! Reads one raw configuration entry into a [`TableSpec`].
//!
//! Entries are JSON objects. Only two keys are recognized, checked in a fixed
//! order: `table` first, then `tables`. Anything else in the object is
//! ignored; an object with neither key is rejected.

use log::debug;
use serde_json::{Map, Value};

use super::TableSpec;
use crate::error::{Error, Result};

/// Parse the raw text supplied for option `option` (`include` or `exclude`).
pub fn parse_entry(option: &str, raw: &str) -> Result<TableSpec> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| Error::invalid_config(option, raw, format!("invalid json: {e}")))?;

    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(Error::invalid_config(
                option,
                raw,
                format!("must be a json object, got {}", json_type(&other)),
            ));
        }
    };

    if let Some(name) = string_attr(option, raw, &map, "table")? {
        return Ok(TableSpec::Table(name));
    }
    if let Some(pattern) = string_attr(option, raw, &map, "tables")? {
        return Ok(TableSpec::Tables(pattern));
    }

    Err(Error::invalid_config(
        option,
        raw,
        "expected a \"table\" or \"tables\" key",
    ))
}

/// Look up `attr`; present values must be non-empty strings.
fn string_attr(
    option: &str,
    raw: &str,
    map: &Map<String, Value>,
    attr: &str,
) -> Result<Option<String>> {
    match map.get(attr) {
        None => {
            debug!("json attr {attr} not found");
            Ok(None)
        }
        Some(Value::String(s)) if s.is_empty() => Err(Error::invalid_config(
            option,
            raw,
            format!("\"{attr}\" must not be empty"),
        )),
        Some(Value::String(s)) => {
            debug!("json attr {attr} = {s}");
            Ok(Some(s.clone()))
        }
        Some(other) => Err(Error::invalid_config(
            option,
            raw,
            format!("\"{attr}\" must be a string, got {}", json_type(other)),
        )),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
