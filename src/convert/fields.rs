//! Field access and value coercion helpers shared by the converters.
//!
//! The source schema is loose: numbers arrive as text as often as not, and
//! "field is absent" and "field is present but has no target equivalent"
//! are different situations with different rules. Omission decisions travel
//! as `Option<Value>` and are materialised by [`put`] as a JSON null, which
//! the pruning pass strips before serialization. Null never appears as a
//! legitimate payload value in either schema, so the marker cannot collide
//! with real data.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{FdError, Result};

/// Check whether `key` holds actual data: present, and not an empty
/// string, array or object.
pub(crate) fn has_data(map: &Map<String, Value>, key: &str) -> bool {
    match map.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(entries)) => !entries.is_empty(),
        Some(_) => true,
    }
}

/// The value at `key`, if the key is present at all.
pub(crate) fn opt_val(map: &Map<String, Value>, key: &str) -> Option<Value> {
    map.get(key).cloned()
}

/// The value at `key`, or `default` when the key is absent.
pub(crate) fn val_or(map: &Map<String, Value>, key: &str, default: Value) -> Value {
    map.get(key).cloned().unwrap_or(default)
}

/// Insert `value` under `key`, or a null omit-marker when there is no
/// value. Converters list every field once; pruning decides what survives.
pub(crate) fn put(out: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    out.insert(key.to_string(), value.unwrap_or(Value::Null));
}

/// Coerce a source value to a number: numbers pass through, text is parsed
/// as an integer first and as a real on failure. Anything else is fatal.
pub(crate) fn coerce_number(value: &Value, what: &str, file: &Path) -> Result<Value> {
    match value {
        Value::Number(_) => Ok(value.clone()),
        Value::String(text) => {
            let text = text.trim();
            if let Ok(int) = text.parse::<i64>() {
                return Ok(Value::from(int));
            }
            text.parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| FdError::Parse {
                    path: file.to_path_buf(),
                    message: format!("{what} is not a number: {text:?}"),
                })
        }
        other => Err(FdError::Parse {
            path: file.to_path_buf(),
            message: format!("{what} is not a number: {other}"),
        }),
    }
}

/// Coerce a source value to an integer: integral numbers pass through,
/// floats truncate, text must parse as an integer.
pub(crate) fn coerce_int(value: &Value, what: &str, file: &Path) -> Result<i64> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Ok(int)
            } else if let Some(real) = number.as_f64() {
                Ok(real.trunc() as i64)
            } else {
                Err(FdError::Parse {
                    path: file.to_path_buf(),
                    message: format!("{what} is out of integer range: {number}"),
                })
            }
        }
        Value::String(text) => text.trim().parse::<i64>().map_err(|_| FdError::Parse {
            path: file.to_path_buf(),
            message: format!("{what} is not an integer: {text:?}"),
        }),
        other => Err(FdError::Parse {
            path: file.to_path_buf(),
            message: format!("{what} is not an integer: {other}"),
        }),
    }
}

/// Fetch a structurally required key or fail with a descriptive error.
pub(crate) fn require<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    what: &str,
    file: &Path,
) -> Result<&'a Value> {
    map.get(key)
        .ok_or_else(|| FdError::input(file, format!("{what} is missing required field `{key}`")))
}

/// Fetch a required key that must hold an object.
pub(crate) fn require_object<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    what: &str,
    file: &Path,
) -> Result<&'a Map<String, Value>> {
    match require(map, key, what, file)? {
        Value::Object(entries) => Ok(entries),
        _ => Err(FdError::input(
            file,
            format!("`{key}` in {what} must be an object"),
        )),
    }
}

/// Fetch a required key that must hold an array.
pub(crate) fn require_array<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    what: &str,
    file: &Path,
) -> Result<&'a Vec<Value>> {
    match require(map, key, what, file)? {
        Value::Array(items) => Ok(items),
        _ => Err(FdError::input(
            file,
            format!("`{key}` in {what} must be an array"),
        )),
    }
}

/// View a value as an object or fail with a descriptive error.
pub(crate) fn as_object<'a>(value: &'a Value, what: &str, file: &Path) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| FdError::input(file, format!("{what} must be an object")))
}

/// View a value as text or fail with a descriptive error.
pub(crate) fn as_text<'a>(value: &'a Value, what: &str, file: &Path) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| FdError::input(file, format!("{what} must be text")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn file() -> PathBuf {
        PathBuf::from("item@Test.json")
    }

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(entries) => entries,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_has_data() {
        let map = obj(json!({
            "text": "hi",
            "empty_text": "",
            "list": [1],
            "empty_list": [],
            "object": {"a": 1},
            "empty_object": {},
            "zero": 0,
            "flag": false,
            "null": null,
        }));

        assert!(has_data(&map, "text"));
        assert!(has_data(&map, "list"));
        assert!(has_data(&map, "object"));
        assert!(has_data(&map, "zero"));
        assert!(has_data(&map, "flag"));

        assert!(!has_data(&map, "empty_text"));
        assert!(!has_data(&map, "empty_list"));
        assert!(!has_data(&map, "empty_object"));
        assert!(!has_data(&map, "null"));
        assert!(!has_data(&map, "missing"));
    }

    #[test]
    fn test_val_or_default() {
        let map = obj(json!({"present": "here"}));

        assert_eq!(val_or(&map, "present", json!("x")), json!("here"));
        assert_eq!(val_or(&map, "missing", json!("x")), json!("x"));
    }

    #[test]
    fn test_put_materialises_omit_marker() {
        let mut out = Map::new();
        put(&mut out, "kept", Some(json!(3)));
        put(&mut out, "omitted", None);

        assert_eq!(out["kept"], json!(3));
        assert_eq!(out["omitted"], Value::Null);
    }

    #[test]
    fn test_coerce_number_text() {
        assert_eq!(coerce_number(&json!("8"), "v", &file()).unwrap(), json!(8));
        assert_eq!(
            coerce_number(&json!("8.25"), "v", &file()).unwrap(),
            json!(8.25)
        );
        assert_eq!(
            coerce_number(&json!(" 12 "), "v", &file()).unwrap(),
            json!(12)
        );
    }

    #[test]
    fn test_coerce_number_passes_numbers_through() {
        assert_eq!(coerce_number(&json!(5), "v", &file()).unwrap(), json!(5));
        assert_eq!(
            coerce_number(&json!(2.5), "v", &file()).unwrap(),
            json!(2.5)
        );
    }

    #[test]
    fn test_coerce_number_rejects_garbage() {
        assert!(coerce_number(&json!("five"), "v", &file()).is_err());
        assert!(coerce_number(&json!(true), "v", &file()).is_err());
        assert!(coerce_number(&json!([1]), "v", &file()).is_err());
    }

    #[test]
    fn test_coerce_int() {
        assert_eq!(coerce_int(&json!(7), "v", &file()).unwrap(), 7);
        assert_eq!(coerce_int(&json!(7.9), "v", &file()).unwrap(), 7);
        assert_eq!(coerce_int(&json!("7"), "v", &file()).unwrap(), 7);
        assert!(coerce_int(&json!("7.9"), "v", &file()).is_err());
        assert!(coerce_int(&json!(null), "v", &file()).is_err());
    }

    #[test]
    fn test_require_reports_context() {
        let map = obj(json!({}));
        let err = require(&map, "type", "item status effect", &file()).unwrap_err();
        let message = err.to_string();

        assert!(message.contains("item status effect"));
        assert!(message.contains("`type`"));
        assert!(message.contains("item@Test.json"));
    }

    #[test]
    fn test_require_object_rejects_scalars() {
        let map = obj(json!({"Trigger": 3}));
        assert!(require_object(&map, "Trigger", "modifier", &file()).is_err());
        let ok = obj(json!({"Trigger": {}}));
        assert!(require_object(&ok, "Trigger", "modifier", &file()).is_ok());
    }
}
