//! Strict structural decoder for model output.
//!
//! Turns raw reply text into a typed value or a tagged error; it never
//! panics and never retries. Extraction tolerates markdown code fences, but
//! kind checking is strict: no coercion across primitive kinds, enum values
//! must be in the declared set, required object fields must be present.
//! Undeclared extra fields are tolerated.

use crate::error::Error;
use crate::schema::{FieldKind, SchemaContract};
use crate::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

static FENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"```json\s*([\s\S]*?)\s*```",
        r"```\s*([\s\S]*?)\s*```",
        r"\{[\s\S]*\}",
        r"\[[\s\S]*\]",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("fence pattern compiles"))
    .collect()
});

/// Decode `raw_text` against `contract` into a typed payload.
pub fn decode<T: DeserializeOwned>(raw_text: &str, contract: &SchemaContract) -> Result<T> {
    let value = decode_value(raw_text, contract)?;
    serde_json::from_value(value).map_err(|e| Error::malformed(e.to_string()))
}

/// Decode `raw_text` against `contract`, keeping the validated JSON value.
pub fn decode_value(raw_text: &str, contract: &SchemaContract) -> Result<Value> {
    let value = extract_json(raw_text)?;
    check_kind(&value, contract.root(), "$")?;
    Ok(value)
}

/// Parse JSON out of reply text, with support for markdown code blocks.
fn extract_json(text: &str) -> Result<Value> {
    let trimmed = text.trim();

    // Try direct parsing first
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    for pattern in FENCE_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(trimmed) {
            let candidate = match captures.get(1) {
                Some(inner) => inner.as_str(),
                None => captures.get(0).map(|c| c.as_str()).unwrap_or(trimmed),
            };
            if let Ok(value) = serde_json::from_str::<Value>(candidate.trim()) {
                return Ok(value);
            }
        }
    }

    Err(Error::malformed(format!(
        "no JSON value found in reply ({} chars)",
        trimmed.len()
    )))
}

/// Recursive kind check. The first violation wins.
fn check_kind(value: &Value, kind: &FieldKind, path: &str) -> Result<()> {
    match kind {
        FieldKind::String => {
            if !value.is_string() {
                return Err(Error::violation(path, "string", value_kind_name(value)));
            }
        }
        FieldKind::Integer => {
            if !value.is_i64() && !value.is_u64() {
                return Err(Error::violation(path, "integer", value_kind_name(value)));
            }
        }
        FieldKind::Boolean => {
            if !value.is_boolean() {
                return Err(Error::violation(path, "boolean", value_kind_name(value)));
            }
        }
        FieldKind::StringEnum(allowed) => {
            let s = value
                .as_str()
                .ok_or_else(|| Error::violation(path, "enum string", value_kind_name(value)))?;
            if !allowed.iter().any(|a| a == s) {
                return Err(Error::violation(
                    path,
                    format!("one of [{}]", allowed.join(", ")),
                    format!("\"{s}\""),
                ));
            }
        }
        FieldKind::Object { fields, required } => {
            let obj = value
                .as_object()
                .ok_or_else(|| Error::violation(path, "object", value_kind_name(value)))?;
            for name in required {
                if !obj.contains_key(name) {
                    return Err(Error::violation(
                        format!("{path}.{name}"),
                        "required field",
                        "missing",
                    ));
                }
            }
            for (name, field_kind) in fields {
                if let Some(field_value) = obj.get(name) {
                    check_kind(field_value, field_kind, &format!("{path}.{name}"))?;
                }
            }
        }
        FieldKind::Array(item) => {
            let arr = value
                .as_array()
                .ok_or_else(|| Error::violation(path, "array", value_kind_name(value)))?;
            for (i, element) in arr.iter().enumerate() {
                check_kind(element, item, &format!("{path}[{i}]"))?;
            }
        }
    }
    Ok(())
}

fn value_kind_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::Bool(_) => "boolean",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        Value::Null => "null",
    }
}
