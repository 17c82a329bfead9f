//! Response shape normalization.
//!
//! List endpoints answer with a bare array, `{<field>: [...]}` or
//! `{data: [...]}` depending on the route. Anything else is treated as an
//! empty list.

use crate::api::errors::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn parse_json(body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        message: e.to_string(),
    })
}

/// Extracts the list of `T` from a response body.
///
/// Items that fail to decode are skipped with a warning so one bad row does
/// not hide the rest.
pub fn normalize_list<T: DeserializeOwned>(body: &str, field: &str) -> Result<Vec<T>, ApiError> {
    let value = parse_json(body)?;
    let items = match list_items(value, field) {
        Some(items) => items,
        None => {
            tracing::warn!(field, "Unexpected list response shape; treating as empty");
            return Ok(Vec::new());
        }
    };

    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(parsed) => out.push(parsed),
            Err(e) => tracing::warn!(field, index, error = %e, "Skipping malformed list item"),
        }
    }
    Ok(out)
}

fn list_items(value: Value, field: &str) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Null => Some(Vec::new()),
        Value::Object(mut map) => match map.remove(field) {
            Some(Value::Array(items)) => Some(items),
            _ => match map.remove("data") {
                Some(Value::Array(items)) => Some(items),
                Some(Value::Object(mut inner)) => match inner.remove(field) {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                },
                _ => None,
            },
        },
        _ => None,
    }
}

/// Extracts a single object, unwrapping `{<field>: {...}}` or `{data: {...}}`.
pub fn normalize_object<T: DeserializeOwned>(body: &str, field: &str) -> Result<T, ApiError> {
    let value = parse_json(body)?;
    let inner = match value {
        Value::Object(mut map) => {
            if let Some(found @ Value::Object(_)) = map.remove(field) {
                found
            } else if let Some(found @ Value::Object(_)) = map.remove("data") {
                found
            } else {
                Value::Object(map)
            }
        }
        other => other,
    };
    serde_json::from_value(inner).map_err(|e| ApiError::Decode {
        message: format!("{}: {}", field, e),
    })
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
