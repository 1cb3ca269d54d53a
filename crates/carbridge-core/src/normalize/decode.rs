//! Decoding of the vendor's `{type, value}` wrappers
//!
//! All knowledge of how the vendor encodes scalars lives here:
//! booleans are the literal string `"True"`, and a numeric value is only
//! trusted when the wrapper's `type` is `"Number"`.

use serde_json::Value;

use crate::error::{NormalizeError, NormalizeResult};
use crate::upstream::WrappedField;

/// Wrapper type tag marking a numeric value
pub const NUMBER_TYPE: &str = "Number";

/// String the vendor uses for boolean true
pub const TRUE_STRING: &str = "True";

/// `true` iff the wrapped value is exactly the string `"True"`.
///
/// Case-sensitive: `"true"`, `"TRUE"` and JSON `true` all decode to `false`.
pub fn decode_boolean(field: &WrappedField) -> bool {
    matches!(&field.value, Value::String(s) if s == TRUE_STRING)
}

/// Integer value of a wrapper whose `type` is `"Number"`, else `None`.
///
/// String values are parsed by their leading integer (`"30.2"` gives 30).
/// A value with no leading digits fails closed to `None`.
pub fn decode_optional_number(field: &WrappedField) -> Option<i64> {
    if field.kind.as_deref() != Some(NUMBER_TYPE) {
        return None;
    }

    match &field.value {
        Value::String(s) => parse_int_prefix(s),
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        _ => None,
    }
}

/// Plain string value of a wrapper.
///
/// Non-string scalars are rendered as text; a missing or structured value is
/// a malformed response.
pub fn decode_string(name: &str, field: &WrappedField) -> NormalizeResult<String> {
    match &field.value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(NormalizeError::MalformedResponse(format!(
            "field '{}' has no string value",
            name
        ))),
    }
}

/// Parse the leading integer of `s`, skipping leading whitespace and
/// accepting one optional sign. Returns `None` when no digit follows, or on
/// overflow.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
