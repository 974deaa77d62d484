//! The `exists` / `notExists` rules: store path presence.

use crate::application::ports::Filesystem;
use crate::domain::{ConditionSpec, DomainError, Store};
use crate::error::StencilResult;

use super::Condition;

/// Tests whether a store path is present. These are the only rules for
/// which a missing key is a legitimate answer rather than a validation
/// error.
#[derive(Debug)]
pub struct Exists {
    key: String,
    negate: bool,
}

impl Exists {
    pub fn from_spec(spec: &ConditionSpec) -> StencilResult<Box<dyn Condition>> {
        Ok(Box::new(Self {
            key: require_key(spec)?,
            negate: false,
        }))
    }

    pub fn negated_from_spec(spec: &ConditionSpec) -> StencilResult<Box<dyn Condition>> {
        Ok(Box::new(Self {
            key: require_key(spec)?,
            negate: true,
        }))
    }
}

impl Condition for Exists {
    fn validate(&self, _store: &Store) -> StencilResult<()> {
        Ok(())
    }

    fn evaluate(&self, store: &Store, _fs: &dyn Filesystem) -> StencilResult<bool> {
        Ok(store.has(&self.key) != self.negate)
    }
}

fn require_key(spec: &ConditionSpec) -> StencilResult<String> {
    spec.arg_str("key")
        .map(str::to_string)
        .ok_or_else(|| {
            DomainError::ConditionFieldMissing {
                field: "key".into(),
                kind: spec.condition.clone(),
            }
            .into()
        })
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubFilesystem;
    use serde_json::json;

    fn store() -> Store {
        let mut store = Store::new();
        store.set("present", json!(false));
        store
    }

    #[test]
    fn exists_finds_falsy_values() {
        let spec = serde_json::from_value(json!({"condition": "exists", "key": "present"})).unwrap();
        let condition = Exists::from_spec(&spec).unwrap();
        assert!(condition.evaluate(&store(), &StubFilesystem::new()).unwrap());
    }

    #[test]
    fn not_exists_negates() {
        let spec =
            serde_json::from_value(json!({"condition": "notExists", "key": "absent"})).unwrap();
        let condition = Exists::negated_from_spec(&spec).unwrap();
        assert!(condition.evaluate(&store(), &StubFilesystem::new()).unwrap());
    }

    #[test]
    fn missing_key_field_fails_construction() {
        let spec = serde_json::from_value(json!({"condition": "exists"})).unwrap();
        assert!(Exists::from_spec(&spec).is_err());
    }
}
