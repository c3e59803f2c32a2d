//! Variable resolution against the data context.
//!
//! A path miss is never an error here: `resolve` returns `Ok(None)` and the
//! `var` operator decides between the default and null. Only structurally
//! invalid keys (a boolean, a non-integer number) are reported as errors.

use crate::error::Error;
use serde_json::Value;

/// Indexes a slice with negative-from-the-end support.
fn index<T>(slice: &[T], idx: i64) -> Option<&T> {
    let adjusted = if idx >= 0 {
        usize::try_from(idx).ok()?
    } else {
        let back = usize::try_from(-idx).ok()?;
        slice.len().checked_sub(back)?
    };
    slice.get(adjusted)
}

/// Walks a dotted string key through objects, arrays, and strings.
///
/// An empty key addresses the whole data value. Array and string steps
/// parse the segment as an integer index (negative counts from the end);
/// string steps yield one-character strings. Any unparsable segment,
/// missing key, out-of-range index, or unindexable value is a miss.
fn get_str_key(data: &Value, key: &str) -> Option<Value> {
    if key.is_empty() {
        return Some(data.clone());
    }
    key.split('.').try_fold(data.clone(), |acc, segment| match acc {
        Value::Object(map) => map.get(segment).cloned(),
        Value::Array(arr) => segment
            .parse::<i64>()
            .ok()
            .and_then(|i| index(&arr, i))
            .cloned(),
        Value::String(s) => {
            let chars: Vec<char> = s.chars().collect();
            segment
                .parse::<i64>()
                .ok()
                .and_then(|i| index(&chars, i))
                .map(|c| Value::String(c.to_string()))
        }
        _ => None,
    })
}

/// Resolves an already-evaluated variable key against the data.
///
/// A null key addresses the whole data value (the "entire context" idiom).
/// Numeric keys index arrays and strings positionally, negative from the
/// end, and fall back to string lookup against objects. `Ok(None)` is a
/// miss; `Err` is reserved for keys of an invalid type.
pub fn resolve(data: &Value, key: &Value) -> Result<Option<Value>, Error> {
    match key {
        Value::Null => Ok(Some(data.clone())),
        Value::String(s) => Ok(get_str_key(data, s)),
        Value::Number(n) => {
            let i = n.as_i64().ok_or_else(|| {
                Error::InvalidRuleShape(format!(
                    "Numeric variable keys must be integers, got {}.",
                    n
                ))
            })?;
            Ok(match data {
                Value::Object(_) => get_str_key(data, &i.to_string()),
                Value::Array(arr) => index(arr, i).cloned(),
                Value::String(s) => {
                    let chars: Vec<char> = s.chars().collect();
                    index(&chars, i).map(|c| Value::String(c.to_string()))
                }
                _ => None,
            })
        }
        other => Err(Error::InvalidRuleShape(format!(
            "Variable keys must be strings, numbers, or null, got {}.",
            other
        ))),
    }
}

/// Returns the sub-list of keys that fail to resolve, for `missing`.
///
/// Null keys always resolve (they address the whole data) and are skipped.
pub fn resolve_missing(data: &Value, keys: &[Value]) -> Result<Vec<Value>, Error> {
    let mut missing = Vec::new();
    for key in keys {
        if key.is_null() {
            continue;
        }
        if resolve(data, key)?.is_none() {
            missing.push(key.clone());
        }
    }
    Ok(missing)
}

/// Returns the missing keys unless at least `min_required` of them resolve,
/// in which case the result is empty. Scanning stops as soon as the
/// threshold is met.
pub fn resolve_missing_some(
    data: &Value,
    min_required: u64,
    keys: &[Value],
) -> Result<Vec<Value>, Error> {
    let mut missing = Vec::new();
    let mut present: u64 = 0;
    for key in keys {
        if present >= min_required {
            break;
        }
        if key.is_null() {
            continue;
        }
        if resolve(data, key)?.is_none() {
            if !missing.contains(key) {
                missing.push(key.clone());
            }
        } else {
            present += 1;
        }
    }
    if present >= min_required {
        Ok(Vec::new())
    } else {
        Ok(missing)
    }
}
