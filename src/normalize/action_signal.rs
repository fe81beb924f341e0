//! Action-signal normalization.
//!
//! The action signal arrives as a string in several historical shapes
//! (`"1,0,1"`, `"[1,0,1]"`, `"1 0 1"`, `"101"`, any of them wrapped across
//! lines). All of them collapse to the bare digit string `"101"`.

use serde_json::Value;

/// Normalize a raw action signal into a non-empty string of `0`/`1` digits.
///
/// Only JSON strings are accepted; a JSON array such as `[1,0,1]` is rejected
/// even though its text form would be valid.
pub fn normalize_action_signal(value: &Value) -> Option<String> {
    let raw = value.as_str()?;
    let digits: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .filter(|c| !matches!(c, '[' | ']'))
        .filter(|c| *c != ',')
        .collect();

    if !digits.is_empty() && digits.chars().all(|c| matches!(c, '0' | '1')) {
        Some(digits)
    } else {
        None
    }
}
