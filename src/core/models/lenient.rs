//! Forgiving field deserializers for inbound payloads
//!
//! Browser clients send ids as numbers or strings, counters as numbers,
//! numeric strings or blanks, and flags as booleans or `"TRUE"`. These
//! helpers accept all of those and fall back to the field default on
//! `null` or blank input.

use crate::core::cell::format_number;
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

fn number_text(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        int.to_string()
    } else if let Some(uint) = number.as_u64() {
        uint.to_string()
    } else {
        number.as_f64().map(format_number).unwrap_or_default()
    }
}

fn number_int(number: &Number) -> Option<i64> {
    number
        .as_i64()
        .or_else(|| number.as_f64().filter(|n| n.is_finite()).map(|n| n.trunc() as i64))
}

/// String field: accepts strings, numbers and booleans; `null` is empty.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text),
        Some(Value::Number(number)) => Ok(number_text(&number)),
        Some(Value::Bool(flag)) => Ok(flag.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, found {}",
            other
        ))),
    }
}

/// Signed integer field: numbers or numeric strings; `null` and `""` are 0.
pub fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => number_int(&number)
            .ok_or_else(|| D::Error::custom(format!("invalid integer {}", number))),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(0);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(|n| n.trunc() as i64)
                .ok_or_else(|| D::Error::custom(format!("invalid integer \"{}\"", text)))
        }
        Some(other) => Err(D::Error::custom(format!(
            "expected an integer, found {}",
            other
        ))),
    }
}

/// Non-negative counter field.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = integer(deserializer)?;
    u64::try_from(value)
        .map_err(|_| D::Error::custom(format!("expected a non-negative count, found {}", value)))
}

/// Boolean field: booleans, `"TRUE"`/`"FALSE"` in any case, numbers.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(flag),
        Some(Value::Number(number)) => Ok(number.as_f64().is_some_and(|n| n != 0.0)),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(D::Error::custom(format!("invalid boolean \"{}\"", text)))
            }
        }
        Some(other) => Err(D::Error::custom(format!(
            "expected a boolean, found {}",
            other
        ))),
    }
}
