//! Lenient field decoders for stored ban records.
//!
//! The ban file is edited by hand and by other tools, so a field of the
//! wrong JSON type must not make the whole record (or the whole list)
//! unreadable. Each decoder maps any JSON value onto the field's type.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings as-is; numbers and booleans in their JSON spelling; anything else absent.
pub(super) fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Like [`optional_string`], with absent mapped to the empty string.
pub(super) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_string(deserializer)?.unwrap_or_default())
}

/// Truthiness: `false`, `null`, `0`, and `""` are false; everything else is true.
pub(super) fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}
