//! Inbound payload decoding.

use serde_json::{Map, Value};

/// Decoded request body: field name to generic JSON value.
pub type RawPayload = Map<String, Value>;

/// Decode a request body into a payload map.
///
/// Anything that is not a JSON object (invalid syntax, bad UTF-8, `null`,
/// arrays, scalars) yields `None`.
pub fn decode_payload(body: &[u8]) -> Option<RawPayload> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Look up the first alias holding a non-null value; missing keys read as null.
pub fn lookup<'a>(payload: &'a RawPayload, aliases: &[&str]) -> &'a Value {
    aliases
        .iter()
        .filter_map(|name| payload.get(*name))
        .find(|value| !value.is_null())
        .unwrap_or(&Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_objects_only() {
        assert!(decode_payload(br#"{"a": 1}"#).is_some());
        assert!(decode_payload(b"{}").is_some());
        assert!(decode_payload(b"").is_none());
        assert!(decode_payload(b"null").is_none());
        assert!(decode_payload(b"[1,2]").is_none());
        assert!(decode_payload(b"{\"a\":").is_none());
        assert!(decode_payload(&[0xff, 0xfe]).is_none());
    }

    #[test]
    fn test_lookup_prefers_first_alias() {
        let payload = decode_payload(br#"{"b": "second", "a": "first"}"#).unwrap();
        assert_eq!(lookup(&payload, &["a", "b"]), &json!("first"));
        assert_eq!(lookup(&payload, &["missing", "b"]), &json!("second"));
        assert_eq!(lookup(&payload, &["missing"]), &Value::Null);
    }

    #[test]
    fn test_lookup_skips_null_aliases() {
        let payload = decode_payload(br#"{"a": null, "b": "second"}"#).unwrap();
        assert_eq!(lookup(&payload, &["a", "b"]), &json!("second"));
        assert_eq!(lookup(&payload, &["a"]), &Value::Null);
    }
}
