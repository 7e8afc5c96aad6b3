//! Inline `data-srcs` parsing

use serde_json::Value;
use tracing::trace;

/// Parse an inline image list: `a.jpg,b.jpg` or `["a.jpg","b.jpg"]`.
///
/// - A JSON array keeps its string entries, trimmed, dropping blanks and
///   non-strings.
/// - Valid JSON that is not an array yields nothing.
/// - Anything that fails to parse as JSON is split on commas. A malformed
///   JSON attempt such as `[bad json` therefore survives as one literal entry.
pub fn parse_inline_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(values)) => string_entries(&values),
        Ok(other) => {
            trace!(kind = json_kind(&other), "Inline list is JSON but not an array");
            Vec::new()
        }
        Err(_) => raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Keep trimmed, non-empty string entries of a JSON array
pub(crate) fn string_entries(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
