//! Row-data normalization.

use serde_json::Value;

/// Normalize row data into JSON text.
///
/// Strings are taken to be JSON-encoded already and pass through untouched;
/// any other non-null value is serialized. Null, blank text or a failed
/// serialization yields `None`.
pub fn normalize_row_data(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).ok()?,
    };

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
