//! Defensive accessors for reading stored content documents.
//!
//! None of these fail. A missing key, a `null`, or a value of the wrong JSON
//! type all read as the empty value of the requested shape.

use serde_json::{Map, Value};

/// Follow `keys` through nested objects.
pub fn path<'a>(value: Option<&'a Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .try_fold(value?, |current, key| current.as_object()?.get(*key))
}

/// Borrow `value` as an object, if it is one.
pub fn as_map(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

/// Clone `value` as an object, or an empty object.
pub fn map_or_empty(value: Option<&Value>) -> Map<String, Value> {
    as_map(value).cloned().unwrap_or_default()
}

/// Borrow `value` as an array, or an empty slice.
pub fn list_or_empty(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Borrow `value` as an array only when it has at least one entry.
pub fn non_empty_list(value: Option<&Value>) -> Option<&[Value]> {
    let list = list_or_empty(value);
    (!list.is_empty()).then_some(list)
}

pub fn str_or<'a>(value: Option<&'a Value>, default: &'a str) -> &'a str {
    value.and_then(Value::as_str).unwrap_or(default)
}

/// Non-empty string content of `value`.
pub fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

pub fn bool_or(value: Option<&Value>, default: bool) -> bool {
    value.and_then(Value::as_bool).unwrap_or(default)
}

/// Integer content of `value`. Numeric strings are accepted since older
/// documents stored ordering fields as text.
pub fn i64_or(value: Option<&Value>, default: i64) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(default),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
        _ => default,
    }
}

/// A document is empty when it is absent, not an object, or has no keys.
pub fn is_empty_document(value: Option<&Value>) -> bool {
    as_map(value).map_or(true, Map::is_empty)
}

/// Overlay the keys of `overlay` onto `base`, replacing existing values.
pub fn shallow_merge(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        base.insert(key.clone(), value.clone());
    }
}
