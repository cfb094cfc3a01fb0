//! Tolerant deserialization helpers for AI-generated summary JSON.
//!
//! The upstream generator does not follow a strict schema: numbers show up
//! where text is expected, arrays contain stray entries, keys go missing.
//! Everything here degrades to "absent" instead of failing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Render a scalar JSON value as display text. Blank strings, arrays,
/// objects and null yield `None`.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "Sim" } else { "Não" }.to_string()),
        _ => None,
    }
}

/// Look up `key` on an object and render it as text.
pub fn text_at(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(text)
}

/// Borrow `data[key]` as an array, or an empty slice when absent or not an array.
pub fn array_at<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Parse an array leniently — skip items that fail to deserialize.
pub fn parse_array_lenient<T: for<'de> Deserialize<'de>>(items: &[Value]) -> Vec<T> {
    items
        .iter()
        .filter_map(|v| serde_json::from_value(v.clone()).ok())
        .collect()
}

/// `deserialize_with` for required text: missing or non-scalar becomes "".
pub fn de_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(text).unwrap_or_default())
}

/// `deserialize_with` for optional text.
pub fn de_opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(text))
}

/// `deserialize_with` for an optional integer; accepts numeric strings.
pub fn de_opt_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// `deserialize_with` for a yes/no flag; accepts booleans and "true"/"sim".
pub fn de_flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "sim" | "yes"),
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        _ => false,
    })
}

/// `deserialize_with` for a list of strings; non-array or non-text entries are dropped.
pub fn de_text_vec<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(text).collect(),
        Some(other) => text(&other).into_iter().collect(),
        None => Vec::new(),
    })
}

/// `deserialize_with` for a list of arbitrary records, skipping bad entries.
pub fn de_lenient_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: for<'a> Deserialize<'a>,
{
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Array(items)) => parse_array_lenient(&items),
        _ => Vec::new(),
    })
}
