use serde_json::{Map, Value};
use tracing::trace;

use crate::path::SimpleKey;

/// Builds `{head: {seg1: … {segN: leaf}}}` from the innermost level outwards.
pub(crate) fn build_branch(key: &SimpleKey<'_>, leaf: Value) -> Map<String, Value> {
    let child = key
        .segments()
        .iter()
        .rev()
        .fold(leaf, |child, segment| {
            let mut level = Map::with_capacity(1);
            level.insert((*segment).to_string(), child);
            Value::Object(level)
        });
    let mut root = Map::with_capacity(1);
    root.insert(key.head().to_string(), child);
    root
}

/// Deep-merges `source` into `target`.
///
/// Two mappings under the same key merge key by key; any other collision is
/// resolved in favour of `source`. Replaced keys keep their position.
pub(crate) fn merge_into(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match target.get_mut(&key) {
            None => {
                target.insert(key, value);
            }
            Some(existing) => match (existing, value) {
                (Value::Object(existing_obj), Value::Object(new_obj)) => {
                    merge_into(existing_obj, new_obj);
                }
                (existing_value, new_value) => {
                    trace!(key = %key, "replacing existing value");
                    *existing_value = new_value;
                }
            },
        }
    }
}
