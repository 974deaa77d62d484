//! The `compare` rule: stored value vs. literal, with an operator table.

use std::cmp::Ordering;

use serde_json::Value;

use crate::application::ports::Filesystem;
use crate::domain::{ConditionSpec, DomainError, Store};
use crate::error::StencilResult;

use super::Condition;

/// Compares `store.get(key)` against a literal `value`.
///
/// Without an explicit operator, arrays and objects test membership (`in`)
/// and everything else tests strict equality (`eq`).
#[derive(Debug)]
pub struct Compare {
    key: String,
    value: Value,
    op: Option<String>,
}

impl Compare {
    pub fn from_spec(spec: &ConditionSpec) -> StencilResult<Box<dyn Condition>> {
        let key = require_str(spec, "key")?;
        let value = spec
            .arg("value")
            .cloned()
            .ok_or_else(|| DomainError::ConditionFieldMissing {
                field: "value".into(),
                kind: spec.condition.clone(),
            })?;
        let op = spec.arg_str("compare").map(str::to_string);
        Ok(Box::new(Self { key, value, op }))
    }
}

impl Condition for Compare {
    fn validate(&self, store: &Store) -> StencilResult<()> {
        if !store.has(&self.key) {
            return Err(DomainError::StoreKeyMissing {
                key: self.key.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn evaluate(&self, store: &Store, _fs: &dyn Filesystem) -> StencilResult<bool> {
        let stored = store.get(&self.key).unwrap_or(&Value::Null);
        let op = self
            .op
            .as_deref()
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| default_operator(stored).to_string());

        let result = match op.as_str() {
            "contains" | "includes" | "in" => contains(stored, &self.value),
            "notcontains" | "notincludes" | "notin" | "nin" => !contains(stored, &self.value),
            "<" | "lt" => matches!(ordered(stored, &self.value), Some(Ordering::Less)),
            "<=" | "lte" => matches!(
                ordered(stored, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            ">" | "gt" => matches!(ordered(stored, &self.value), Some(Ordering::Greater)),
            ">=" | "gte" => matches!(
                ordered(stored, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            "!=" | "!==" | "ne" | "notequals" => *stored != self.value,
            // "===", "==", "=", "eq", "equals", and anything else
            _ => *stored == self.value,
        };
        Ok(result)
    }
}

/// Default operator when the config doesn't provide one: containers check
/// membership, scalars check equality.
fn default_operator(stored: &Value) -> &'static str {
    match stored {
        Value::Array(_) | Value::Object(_) => "in",
        _ => "eq",
    }
}

/// Needle detection across arrays, objects and strings.
///
/// Arrays use strict element equality; objects test key existence; strings
/// test case-insensitively with the needle lowercased first — an inherited
/// asymmetry, kept as-is (see the tests).
fn contains(haystack: &Value, needle: &Value) -> bool {
    match haystack {
        Value::Array(items) => items.contains(needle),
        Value::Object(map) => needle.as_str().is_some_and(|key| map.contains_key(key)),
        Value::String(s) => needle
            .as_str()
            .is_some_and(|n| s.to_lowercase().contains(&n.to_lowercase())),
        _ => false,
    }
}

/// Ordering for the numeric operators: numbers compare numerically, strings
/// lexicographically, mixed or non-orderable types not at all.
fn ordered(stored: &Value, value: &Value) -> Option<Ordering> {
    match (stored, value) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn require_str(spec: &ConditionSpec, field: &str) -> StencilResult<String> {
    match spec.arg(field) {
        None => Err(DomainError::ConditionFieldMissing {
            field: field.into(),
            kind: spec.condition.clone(),
        }
        .into()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(DomainError::ConditionFieldInvalid {
            field: field.into(),
            kind: spec.condition.clone(),
        }
        .into()),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
