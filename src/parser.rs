//! Tolerant parsing of item definition files.
//!
//! Item files in the wild are JSON only in spirit: they carry comments,
//! trailing commas, single-quoted strings and the occasional stray bytes
//! before the opening brace. Reading clips the text to the first `{` and
//! hands the rest to a JSON5 parser. Output is always strict JSON.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{FdError, Result};

/// Read and parse an item document from disk.
pub fn read_item(path: &Path) -> Result<Value> {
    let source = fs::read_to_string(path).map_err(|e| FdError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;
    parse_item(&source, path)
}

/// Parse item document text. Everything before the first `{` is discarded.
pub fn parse_item(source: &str, path: &Path) -> Result<Value> {
    let Some(start) = source.find('{') else {
        return Err(FdError::Parse {
            path: path.to_path_buf(),
            message: "no `{` found in file".to_string(),
        });
    };
    let value: Value = json5::from_str(&source[start..]).map_err(|e| FdError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(normalize_numbers(value))
}

/// Rewrite integral floats as integers, recursively.
///
/// The JSON5 deserializer reads every number as `f64` when the target is an
/// untyped tree, which would turn a source `5` into `5.0` on the way back
/// out. Whole numbers within `i64` range collapse back to integers so
/// integer literals survive the round trip.
fn normalize_numbers(value: Value) -> Value {
    match value {
        Value::Number(number) => {
            if number.is_f64() {
                if let Some(real) = number.as_f64() {
                    // The upper bound is strict: `i64::MAX as f64` rounds up
                    // to 2^63, one past the last representable `i64`.
                    if real.fract() == 0.0 && real >= i64::MIN as f64 && real < i64::MAX as f64 {
                        return Value::from(real as i64);
                    }
                }
            }
            Value::Number(number)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_numbers).collect()),
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(key, member)| (key, normalize_numbers(member)))
                .collect(),
        ),
        other => other,
    }
}
