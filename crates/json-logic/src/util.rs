//! Value model helpers: truthiness, coercion, equality, ordering.

use crate::error::Error;
use serde_json::{Number, Value};
use std::cmp::Ordering;

// -------------------------------------------------------------- Truthiness

/// Returns whether a value is truthy under JsonLogic rules.
///
/// Follows <https://jsonlogic.com/truthy.html>: empty strings, empty
/// arrays, zero and null are falsy. Objects are always truthy, even `{}`.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(_) => true,
    }
}

// ---------------------------------------------------------------- Coercion

fn numeric_literal_regex() -> &'static regex::Regex {
    use std::sync::OnceLock;
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap()
    })
}

/// Parses a string the way ToNumber does: empty and blank strings are 0,
/// decimal and exponent literals parse, everything else misses. The regex
/// gate keeps `inf`/`nan` spellings (which `f64::from_str` accepts) out.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    if !numeric_literal_regex().is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Converts a value to a number, failing on shapes with no numeric reading.
///
/// A one-element array coerces through its element, so `[["5"]]` is 5.
pub fn to_number(value: &Value) -> Result<f64, Error> {
    match value {
        Value::Null => Ok(0.0),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => parse_number(s)
            .ok_or_else(|| Error::CoercionError(format!("Cannot coerce {:?} to a number.", s))),
        Value::Array(a) if a.len() == 1 => to_number(&a[0]),
        Value::Array(_) => Err(Error::CoercionError(
            "Cannot coerce an array to a number.".to_string(),
        )),
        Value::Object(_) => Err(Error::CoercionError(
            "Cannot coerce an object to a number.".to_string(),
        )),
    }
}

/// Converts an f64 result back into a JSON number. Integral values within
/// i64 range come back as integer numbers; non-finite values have no JSON
/// representation and collapse to null, like `JSON.stringify(Infinity)`.
pub fn num_to_value(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        return Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

// ----------------------------------------------------------------- Strings

/// Formats a JSON number without a trailing ".0" when it is integral.
pub fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        // 2^53: beyond this an f64 no longer holds exact integers
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9007199254740992.0 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// Stringifies any value for concatenation contexts.
pub fn str_val(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        // Arrays and objects render as their JSON encoding
        _ => value.to_string(),
    }
}

/// Extracts a substring by character position. A negative start counts from
/// the end; a negative length stops that many characters short of the end.
pub fn substr_slice(s: &str, start: i64, length: Option<i64>) -> String {
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len() as i64;
    let from = if start < 0 {
        (len + start).max(0)
    } else {
        start.min(len)
    };
    let to = match length {
        None => len,
        Some(l) if l < 0 => (len + l).max(from),
        Some(l) => (from + l).min(len),
    };
    chars[from as usize..to as usize].iter().collect()
}

// ---------------------------------------------------------------- Equality

fn num_eq(x: &Number, y: &Number) -> bool {
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => x == y,
    }
}

/// Structural equality with numbers compared as one type, so `1` and `1.0`
/// are deeply equal. Arrays are order-sensitive; objects compare by key set
/// and values.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => num_eq(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(v, w)| deep_equal(v, w))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).map(|w| deep_equal(v, w)).unwrap_or(false))
        }
        _ => false,
    }
}

/// Loose equality for `==`/`!=`.
///
/// Same-type values compare structurally; cross-type scalar pairs coerce
/// numerically; unparsable strings are simply not equal (never an error).
/// Arrays and objects never equal scalars or each other cross-type.
pub fn equals_loose(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => num_eq(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            deep_equal(a, b)
        }
        (Value::Bool(x), Value::Number(y)) | (Value::Number(y), Value::Bool(x)) => y
            .as_f64()
            .map(|f| f == if *x { 1.0 } else { 0.0 })
            .unwrap_or(false),
        (Value::Number(x), Value::String(s)) | (Value::String(s), Value::Number(x)) => {
            match (x.as_f64(), parse_number(s)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
        (Value::Bool(x), Value::String(s)) | (Value::String(s), Value::Bool(x)) => parse_number(s)
            .map(|f| f == if *x { 1.0 } else { 0.0 })
            .unwrap_or(false),
        _ => false,
    }
}

/// Strict equality for `===`/`!==`: no coercion. Number subtype does not
/// matter (`1 === 1.0`). Distinct arrays and objects are never strictly
/// equal.
pub fn equals_strict(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => num_eq(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        _ => false,
    }
}

// ---------------------------------------------------------------- Ordering

/// Ordered comparison for `<`, `<=`, `>`, `>=`. Two strings compare
/// lexicographically; any other pair compares numerically via `to_number`.
pub fn compare_ordered(a: &Value, b: &Value) -> Result<Ordering, Error> {
    if let (Value::String(x), Value::String(y)) = (a, b) {
        return Ok(x.cmp(y));
    }
    let x = to_number(a)?;
    let y = to_number(b)?;
    // to_number never yields NaN, so the partial order is total here
    Ok(x.partial_cmp(&y).unwrap_or(Ordering::Equal))
}
