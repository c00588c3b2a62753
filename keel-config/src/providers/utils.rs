//! Helpers shared by the provider definitions

use super::OptionsMap;
use crate::snapshot::EnvironmentSnapshot;
use serde_json::Value;

/// Use `value` when provided, otherwise the literal `default`
pub fn string_or(value: Option<&str>, default: &str) -> String {
    value.unwrap_or(default).to_string()
}

/// Value of an input that a rule's activation already guarantees
pub fn required(snapshot: &EnvironmentSnapshot, name: &str) -> Value {
    Value::String(string_or(snapshot.get(name), ""))
}

/// Insert `key` only when the input `name` was provided
pub fn insert_present(
    options: &mut OptionsMap,
    key: &str,
    snapshot: &EnvironmentSnapshot,
    name: &str,
) {
    if let Some(value) = snapshot.get(name) {
        options.insert(key.to_string(), Value::String(value.to_string()));
    }
}

/// Turn a `json!` object literal into an options map
pub fn into_options(value: Value) -> OptionsMap {
    match value {
        Value::Object(map) => map,
        _ => OptionsMap::new(),
    }
}

/// Redis-backed modules all take the connection string under `redisUrl`
pub fn redis_url_options(snapshot: &EnvironmentSnapshot, name: &str) -> OptionsMap {
    let mut options = OptionsMap::new();
    options.insert("redisUrl".to_string(), required(snapshot, name));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_or() {
        assert_eq!(string_or(Some("x"), "d"), "x");
        assert_eq!(string_or(None, "d"), "d");
    }

    #[test]
    fn test_insert_present_skips_absent() {
        let snapshot = EnvironmentSnapshot::from_pairs([("A", "1")]);
        let mut options = OptionsMap::new();
        insert_present(&mut options, "a", &snapshot, "A");
        insert_present(&mut options, "b", &snapshot, "B");
        assert_eq!(Value::Object(options), json!({ "a": "1" }));
    }

    #[test]
    fn test_into_options_non_object() {
        assert!(into_options(json!([1, 2])).is_empty());
        assert_eq!(into_options(json!({ "k": true })).len(), 1);
    }
}
