//! Scalar coercion for optional numeric parameters.
//!
//! Clients send numbers as JSON numbers, numeric strings, empty strings or the
//! literal token `"null"`. The lenient coercers collapse every unusable input
//! into "absent"; the strict parsers report what could not be read so that a
//! caller can surface it.

use serde_json::Value;

/// A value that was supplied but could not be read as the target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected;

/// Coerce a raw value into an optional integer, downgrading failures to `None`.
pub fn coerce_int(value: &Value) -> Option<i64> {
    parse_int(value).ok().flatten()
}

/// Coerce a raw value into an optional float, downgrading failures to `None`.
pub fn coerce_float(value: &Value) -> Option<f64> {
    parse_float(value).ok().flatten()
}

/// Read an integer, distinguishing "absent" from "present but unreadable".
pub fn parse_int(value: &Value) -> Result<Option<i64>, Rejected> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Some(i64::try_from(u).unwrap_or(i64::MAX)))
            } else {
                // Fractional numbers truncate toward zero; `as` saturates.
                Ok(n.as_f64().map(|f| f.trunc() as i64))
            }
        }
        Value::String(s) => match trimmed_token(s) {
            None => Ok(None),
            Some(token) => token.parse::<i64>().map(Some).map_err(|_| Rejected),
        },
        _ => Err(Rejected),
    }
}

/// Read a finite float, distinguishing "absent" from "present but unreadable".
pub fn parse_float(value: &Value) -> Result<Option<f64>, Rejected> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) => match trimmed_token(s) {
            None => Ok(None),
            Some(token) => match token.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(Some(f)),
                _ => Err(Rejected),
            },
        },
        _ => Err(Rejected),
    }
}

/// Trim a string value; empty and `null` (any case) mean "no value".
fn trimmed_token(s: &str) -> Option<&str> {
    let token = s.trim();
    if token.is_empty() || token.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_inputs() {
        assert_eq!(coerce_int(&Value::Null), None);
        assert_eq!(coerce_int(&json!("")), None);
        assert_eq!(coerce_int(&json!("   ")), None);
        assert_eq!(coerce_int(&json!("null")), None);
        assert_eq!(coerce_int(&json!(" NULL ")), None);
        assert_eq!(coerce_float(&json!("Null")), None);
    }

    #[test]
    fn test_int_from_numbers_and_strings() {
        assert_eq!(coerce_int(&json!(7)), Some(7));
        assert_eq!(coerce_int(&json!("7")), Some(7));
        assert_eq!(coerce_int(&json!("  -12 ")), Some(-12));
        assert_eq!(coerce_int(&json!(3.9)), Some(3));
        assert_eq!(coerce_int(&json!(-3.9)), Some(-3));
    }

    #[test]
    fn test_int_range_is_i64() {
        assert_eq!(coerce_int(&json!("2147483648")), Some(2_147_483_648));
        assert_eq!(coerce_int(&json!(1e10)), Some(10_000_000_000));
        assert_eq!(coerce_int(&json!(u64::MAX)), Some(i64::MAX));
        assert_eq!(coerce_int(&json!(-1e30)), Some(i64::MIN));
        assert_eq!(coerce_int(&json!("99999999999999999999")), None);
    }

    #[test]
    fn test_unparseable_strings_are_lenient() {
        assert_eq!(coerce_int(&json!("abc")), None);
        assert_eq!(coerce_int(&json!("7.5")), None);
        assert_eq!(coerce_float(&json!("abc")), None);
        assert_eq!(parse_int(&json!("abc")), Err(Rejected));
        assert_eq!(parse_float(&json!("0.x")), Err(Rejected));
    }

    #[test]
    fn test_other_types() {
        assert_eq!(coerce_int(&json!(true)), None);
        assert_eq!(coerce_int(&json!([1])), None);
        assert_eq!(parse_int(&json!({"a": 1})), Err(Rejected));
        assert_eq!(parse_float(&json!(false)), Err(Rejected));
    }

    #[test]
    fn test_float_parsing() {
        assert_eq!(coerce_float(&json!(0.05)), Some(0.05));
        assert_eq!(coerce_float(&json!(1)), Some(1.0));
        assert_eq!(coerce_float(&json!(" 1e-3 ")), Some(0.001));
        assert_eq!(parse_float(&json!("NaN")), Err(Rejected));
        assert_eq!(parse_float(&json!("inf")), Err(Rejected));
    }
}
