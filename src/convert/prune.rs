//! Removal of empty and placeholder values from converted documents.
//!
//! Converters write every candidate field, inserting JSON null where a rule
//! decided the field has no target equivalent. A final bottom-up pass strips
//! those markers along with values the target schema treats as "not set":
//! empty strings, `false`, and containers that end up with nothing in them.
//! Numeric zero is meaningful (a free-to-use item has a real cost of 0) and
//! always survives.

use serde_json::{Map, Value};

/// Prune a document bottom-up. Returns `None` when nothing remains.
///
/// Nulls vanish wherever they appear. Object members and array elements are
/// pruned recursively and dropped when they prune to nothing, or when the
/// pruned result is an empty string or `false`. A container whose members
/// are all dropped is itself dropped. Scalars other than null pass through
/// unchanged, so pruning an already-pruned tree is a no-op.
pub fn prune(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(entries) => {
            let kept: Map<String, Value> = entries
                .into_iter()
                .filter_map(|(key, member)| {
                    prune(member).filter(keep_in_container).map(|member| (key, member))
                })
                .collect();
            if kept.is_empty() {
                None
            } else {
                Some(Value::Object(kept))
            }
        }
        Value::Array(items) => {
            let kept: Vec<Value> = items
                .into_iter()
                .filter_map(prune)
                .filter(keep_in_container)
                .collect();
            if kept.is_empty() {
                None
            } else {
                Some(Value::Array(kept))
            }
        }
        other => Some(other),
    }
}

/// Whether a pruned value is worth keeping as a container member.
fn keep_in_container(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}
