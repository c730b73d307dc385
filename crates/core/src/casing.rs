//! Key-casing normalisation for envelope payloads.

use serde_json::{Map, Value};

/// Convert a `snake_case`, `kebab-case` or space separated key to `camelCase`.
///
/// Separators are dropped and the character following one is upper-cased; the
/// first character is lower-cased. Everything else is left untouched, so keys
/// that are already camelCase come back unchanged.
///
/// ```
/// use envelope_core::casing::to_camel;
///
/// assert_eq!(to_camel("current_page"), "currentPage");
/// assert_eq!(to_camel("per-page"), "perPage");
/// assert_eq!(to_camel("lastPage"), "lastPage");
/// ```
pub fn to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;

    for ch in key.chars() {
        if matches!(ch, '_' | '-' | ' ') {
            upper_next = true;
            continue;
        }
        if out.is_empty() {
            out.extend(ch.to_lowercase());
        } else if upper_next {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        upper_next = false;
    }

    out
}

/// Recursively rewrite every object key in `value` to camelCase.
///
/// Arrays are walked so objects nested inside lists are converted too. When
/// two keys collapse to the same camelCase form the later one wins.
pub fn keys_to_camel(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(map_keys_to_camel(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(keys_to_camel).collect()),
        other => other,
    }
}

pub(crate) fn map_keys_to_camel(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (to_camel(&key), keys_to_camel(value)))
        .collect()
}
