//! Presence checks and typed field access over a decoded request payload.
//!
//! Payloads are kept as a JSON object so that JSON and urlencoded bodies go
//! through the same rules; form values arrive as strings and are coerced here.

use serde_json::{Map, Value};

use crate::domain::error::DomainError;

pub type Payload = Map<String, Value>;

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// One `"<field> is required"` message per field that is absent, null or "".
/// An empty result means the payload may proceed.
pub fn validate(payload: &Payload, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|field| is_blank(payload.get(**field)))
        .map(|field| format!("{field} is required"))
        .collect()
}

/// Like [`validate`], but only the key has to exist; `null` is accepted.
pub fn require_keys(payload: &Payload, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|field| !payload.contains_key(**field))
        .map(|field| format!("{field} is required"))
        .collect()
}

/// Turn a non-empty message list into a validation error.
pub fn ensure(messages: Vec<String>) -> Result<(), DomainError> {
    if messages.is_empty() {
        Ok(())
    } else {
        Err(DomainError::validation(messages))
    }
}

pub fn text(payload: &Payload, field: &str) -> Result<String, DomainError> {
    match payload.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(DomainError::invalid_field(field, "a string")),
    }
}

/// Accepts JSON booleans, 0/1, and the strings "true"/"false"/"1"/"0".
pub fn boolean(payload: &Payload, field: &str) -> Result<bool, DomainError> {
    let parsed = match payload.get(field) {
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };
    parsed.ok_or_else(|| DomainError::invalid_field(field, "a boolean"))
}

/// Absent, null and "" all mean "no value".
pub fn optional_id(payload: &Payload, field: &str) -> Result<Option<i64>, DomainError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| DomainError::invalid_field(field, "an integer")),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| DomainError::invalid_field(field, "an integer")),
        Some(_) => Err(DomainError::invalid_field(field, "an integer")),
    }
}
