//! The condition evaluator: a small expression-free boolean rule engine.
//!
//! Conditions gate prompt visibility (`showIf`) and directive execution
//! (`runCommand.conditions`). Each rule type registers a factory keyed by
//! its tag string; unknown tags are a typed error, never a silent `false`.
//!
//! Evaluation folds every rule with `&&`/`||` *without* short-circuiting —
//! each rule's validation must run regardless of earlier results, so a
//! broken spec fails fast even when an earlier rule already decided the
//! outcome.

mod compare;
mod composer;
mod exists;
mod file_present;

use std::collections::BTreeMap;

use crate::application::ports::Filesystem;
use crate::domain::{ConditionSpec, DomainError, Store};
use crate::error::StencilResult;

pub use compare::Compare;
pub use composer::ComposerPackageInstalled;
pub use exists::Exists;
pub use file_present::FilePresent;

/// How multiple rules combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Relation {
    /// All rules must pass. The identity for an empty list is `true`.
    #[default]
    And,
    /// Any rule may pass. The identity for an empty list is `false`.
    Or,
}

/// A named boolean rule.
///
/// `validate` checks rule-specific fields against the store and fails
/// fatally on anything missing or malformed; `evaluate` then produces the
/// boolean. A rule referencing a missing store key fails validation rather
/// than evaluating to `false` — except the existence rules, whose entire
/// purpose is presence-testing.
pub trait Condition: std::fmt::Debug {
    fn validate(&self, store: &Store) -> StencilResult<()>;
    fn evaluate(&self, store: &Store, fs: &dyn Filesystem) -> StencilResult<bool>;
}

/// Factory producing a rule instance from its declarative spec. Factories
/// reject specs with missing or malformed rule-specific fields.
pub type ConditionFactory = fn(&ConditionSpec) -> StencilResult<Box<dyn Condition>>;

/// Registry mapping rule-type tags to factories.
pub struct ConditionRegistry {
    factories: BTreeMap<&'static str, ConditionFactory>,
}

impl ConditionRegistry {
    /// Registry with all built-in rule types.
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            factories: BTreeMap::new(),
        };
        registry.register("compare", Compare::from_spec);
        registry.register("exists", Exists::from_spec);
        registry.register("notExists", Exists::negated_from_spec);
        registry.register("filePresent", FilePresent::from_spec);
        registry.register("fileNotPresent", FilePresent::negated_from_spec);
        registry.register("composerPackageInstalled", ComposerPackageInstalled::from_spec);
        registry
    }

    /// Register (or replace) a rule type.
    pub fn register(&mut self, kind: &'static str, factory: ConditionFactory) {
        self.factories.insert(kind, factory);
    }

    /// Resolve a spec to a rule instance.
    pub fn make(&self, spec: &ConditionSpec) -> StencilResult<Box<dyn Condition>> {
        if spec.condition.is_empty() {
            return Err(DomainError::ConditionTypeMissing.into());
        }
        let factory = self.factories.get(spec.condition.as_str()).ok_or_else(|| {
            DomainError::ConditionTypeUnknown {
                kind: spec.condition.clone(),
            }
        })?;
        factory(spec)
    }

    /// Evaluate a list of rules against the store, folding with `relation`.
    pub fn evaluate(
        &self,
        specs: &[ConditionSpec],
        relation: Relation,
        store: &Store,
        fs: &dyn Filesystem,
    ) -> StencilResult<bool> {
        let mut result = matches!(relation, Relation::And);
        for spec in specs {
            let condition = self.make(spec)?;
            condition.validate(store)?;
            let value = condition.evaluate(store, fs)?;
            result = match relation {
                Relation::And => result && value,
                Relation::Or => result || value,
            };
        }
        Ok(result)
    }
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StencilError;
    use crate::test_support::StubFilesystem;
    use serde_json::json;

    fn spec(value: serde_json::Value) -> ConditionSpec {
        serde_json::from_value(value).unwrap()
    }

    fn store_with(value: serde_json::Value) -> Store {
        match value {
            serde_json::Value::Object(map) => Store::from_map(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn empty_list_identities() {
        let registry = ConditionRegistry::with_builtins();
        let store = Store::new();
        let fs = StubFilesystem::new();
        assert!(registry.evaluate(&[], Relation::And, &store, &fs).unwrap());
        assert!(!registry.evaluate(&[], Relation::Or, &store, &fs).unwrap());
    }

    #[test]
    fn and_requires_all_rules() {
        let registry = ConditionRegistry::with_builtins();
        let store = store_with(json!({"a": 1}));
        let fs = StubFilesystem::new();
        let specs = [
            spec(json!({"condition": "exists", "key": "a"})),
            spec(json!({"condition": "exists", "key": "b"})),
        ];
        assert!(!registry
            .evaluate(&specs, Relation::And, &store, &fs)
            .unwrap());
    }

    #[test]
    fn or_recovers_after_a_failing_rule() {
        let registry = ConditionRegistry::with_builtins();
        let store = store_with(json!({"a": 1}));
        let fs = StubFilesystem::new();
        let specs = [
            spec(json!({"condition": "exists", "key": "b"})),
            spec(json!({"condition": "exists", "key": "a"})),
        ];
        assert!(registry.evaluate(&specs, Relation::Or, &store, &fs).unwrap());
    }

    #[test]
    fn unknown_type_is_a_typed_error() {
        let registry = ConditionRegistry::with_builtins();
        let err = registry
            .make(&spec(json!({"condition": "isWeekend"})))
            .unwrap_err();
        assert!(matches!(
            err,
            StencilError::Domain(DomainError::ConditionTypeUnknown { kind }) if kind == "isWeekend"
        ));
    }

    #[test]
    fn missing_type_is_a_typed_error() {
        let registry = ConditionRegistry::with_builtins();
        let err = registry.make(&spec(json!({"key": "a"}))).unwrap_err();
        assert!(matches!(
            err,
            StencilError::Domain(DomainError::ConditionTypeMissing)
        ));
    }

    #[test]
    fn invalid_rule_fails_even_when_or_already_passed() {
        // No short-circuit: the second rule's validation still runs.
        let registry = ConditionRegistry::with_builtins();
        let store = store_with(json!({"a": 1}));
        let fs = StubFilesystem::new();
        let specs = [
            spec(json!({"condition": "exists", "key": "a"})),
            spec(json!({"condition": "compare", "key": "missing", "value": 1})),
        ];
        assert!(registry.evaluate(&specs, Relation::Or, &store, &fs).is_err());
    }
}
