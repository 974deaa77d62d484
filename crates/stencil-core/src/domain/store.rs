//! The per-run data store.
//!
//! An ordered map from dotted string paths to JSON values, holding every
//! prompt answer and derived path for the duration of one scaffolding
//! invocation. It is always passed explicitly (`&`/`&mut`) into the
//! pipeline, evaluator and directive calls rather than living in ambient
//! state, so tests can construct isolated stores.

use serde_json::{Map, Value};

use super::paths;

/// Ordered key→value bag shared by all components of a single run.
#[derive(Debug, Clone, Default)]
pub struct Store {
    data: Map<String, Value>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded from an existing map.
    pub fn from_map(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Set a value at a dotted path, creating intermediate objects.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        paths::set(&mut self.data, path, value.into());
    }

    /// Get the value at a dotted path. An ancestor prefix of a deeper path
    /// returns the nested structure beneath it.
    pub fn get(&self, path: &str) -> Option<&Value> {
        paths::get(&self.data, path)
    }

    /// Get a string value at a dotted path.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Whether a dotted path resolves. A path set to `null` still counts as
    /// present.
    pub fn has(&self, path: &str) -> bool {
        paths::has(&self.data, path)
    }

    /// Remove a path, pruning parent containers that become empty.
    pub fn forget(&mut self, path: &str) -> bool {
        paths::forget(&mut self.data, path)
    }

    /// Bulk-set top-level entries. Later keys win on conflict.
    pub fn merge(&mut self, data: Map<String, Value>) {
        for (key, value) in data {
            self.data.insert(key, value);
        }
    }

    /// The underlying ordered map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }

    /// The store contents as a JSON object, for substitution data.
    pub fn to_value(&self) -> Value {
        Value::Object(self.data.clone())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
