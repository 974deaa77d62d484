//! Dotted-path access to nested JSON structures.
//!
//! A path like `license.slug` addresses `{"license": {"slug": ...}}`. These
//! helpers are shared by the [`Store`](crate::domain::store::Store) and the
//! `setJSONValue` directive, which patches arbitrary JSON documents with the
//! same addressing scheme.

use serde_json::{Map, Value};

/// Get a value by dotted path. Intermediate array segments may be numeric
/// indices. Returns `None` when any segment is missing.
pub fn get<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = map.get(first)?;
    for segment in segments {
        current = match current {
            Value::Object(obj) => obj.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Check whether a dotted path resolves to a value.
///
/// Present-with-null and absent are different things: `has` returns `true`
/// for a key that was explicitly set to `null`.
pub fn has(map: &Map<String, Value>, path: &str) -> bool {
    get(map, path).is_some()
}

/// Set a value at a dotted path, creating intermediate objects as needed.
///
/// Setting `a.b` when `a` currently holds a non-container value overwrites
/// `a` with a fresh object.
pub fn set(map: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let last = match segments.pop() {
        Some(last) => last,
        None => return,
    };

    let mut current = map;
    for segment in segments {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = match slot.as_object_mut() {
            Some(obj) => obj,
            None => return, // just replaced with an object above
        };
    }
    current.insert(last.to_string(), value);
}

/// Remove a value at a dotted path, pruning parent objects that become
/// empty. Returns `true` if something was removed.
pub fn forget(map: &mut Map<String, Value>, path: &str) -> bool {
    let segments: Vec<&str> = path.split('.').collect();
    forget_segments(map, &segments)
}

fn forget_segments(map: &mut Map<String, Value>, segments: &[&str]) -> bool {
    match segments {
        [] => false,
        [last] => map.remove(*last).is_some(),
        [head, rest @ ..] => {
            let removed = match map.get_mut(*head) {
                Some(Value::Object(child)) => forget_segments(child, rest),
                _ => false,
            };
            if removed {
                let now_empty = matches!(map.get(*head), Some(Value::Object(o)) if o.is_empty());
                if now_empty {
                    map.remove(*head);
                }
            }
            removed
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
