//! Directives: declarative side-effecting actions.
//!
//! A directive spec's `action` tag resolves through a registry of factory
//! functions. Each factory runs the initialize half of the lifecycle
//! (populating fields from the spec, substituting store-based values,
//! resolving path bases) and validates fatally before returning the
//! instance; the caller then executes. Directives run exactly once, in
//! declaration order, with no retry and no rollback of earlier directives.

mod command_exists;
mod copy;
mod execute;
mod run_command;
mod set_json_value;

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::application::conditions::ConditionRegistry;
use crate::application::ports::{CommandRunner, Filesystem, Renderer};
use crate::domain::{DirectiveSpec, DomainError, Store};
use crate::error::StencilResult;

pub use command_exists::CommandExistsDirective;
pub use copy::CopyDirective;
pub use execute::ExecuteDirective;
pub use run_command::RunCommandDirective;
pub use set_json_value::SetJsonValueDirective;

/// Per-run facts every directive may need.
#[derive(Debug, Clone)]
pub struct RunEnv {
    /// Absolute path of the resolved template directory.
    pub template_dir: PathBuf,
    /// The invocation's working directory.
    pub working_dir: PathBuf,
    /// Name of the template configuration file, always excluded from
    /// copies.
    pub config_filename: String,
    /// Process-wide force flag: overwrite existing files.
    pub overwrite: bool,
}

/// The ports and environment shared by all directives of a run. The store
/// travels separately as `&mut` so directives can derive new paths into it.
pub struct DirectiveServices<'a> {
    pub fs: &'a dyn Filesystem,
    pub renderer: &'a dyn Renderer,
    pub runner: &'a dyn CommandRunner,
    pub conditions: &'a ConditionRegistry,
    pub env: &'a RunEnv,
}

/// A ready-to-run directive. Construction already initialized and
/// validated it; `execute` performs the side effects.
pub trait Directive: std::fmt::Debug {
    fn execute(&self, services: &DirectiveServices<'_>, store: &mut Store) -> StencilResult<()>;
}

/// Factory producing a directive from its declarative spec. Factories fail
/// fatally on missing or invalid action-specific fields.
pub type DirectiveFactory =
    fn(&DirectiveSpec, &DirectiveServices<'_>, &Store) -> StencilResult<Box<dyn Directive>>;

/// Registry mapping action tags to factories.
pub struct DirectiveRegistry {
    factories: BTreeMap<&'static str, DirectiveFactory>,
}

impl DirectiveRegistry {
    /// Registry with all built-in actions.
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            factories: BTreeMap::new(),
        };
        registry.register("copy", CopyDirective::from_spec);
        registry.register("execute", ExecuteDirective::from_spec);
        registry.register("runCommand", RunCommandDirective::from_spec);
        registry.register("setJSONValue", SetJsonValueDirective::from_spec);
        registry.register("commandExists", CommandExistsDirective::from_spec);
        registry
    }

    /// Register (or replace) an action.
    pub fn register(&mut self, action: &'static str, factory: DirectiveFactory) {
        self.factories.insert(action, factory);
    }

    /// Resolve a spec to an initialized, validated directive.
    pub fn make(
        &self,
        spec: &DirectiveSpec,
        services: &DirectiveServices<'_>,
        store: &Store,
    ) -> StencilResult<Box<dyn Directive>> {
        if spec.action.is_empty() {
            return Err(DomainError::DirectiveActionMissing.into());
        }
        let factory = self.factories.get(spec.action.as_str()).ok_or_else(|| {
            DomainError::DirectiveActionUnknown {
                action: spec.action.clone(),
            }
        })?;
        factory(spec, services, store)
    }

    /// Execute a list of directive specs in declaration order. The first
    /// failure aborts the remainder; already-executed directives are not
    /// rolled back.
    pub fn run_all(
        &self,
        specs: &[DirectiveSpec],
        services: &DirectiveServices<'_>,
        store: &mut Store,
    ) -> StencilResult<()> {
        for spec in specs {
            let directive = self.make(spec, services, store)?;
            directive.execute(services, store)?;
        }
        Ok(())
    }
}

impl Default for DirectiveRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Resolve the `relativeTo` base shared by `copy` and `runCommand`:
/// `projectRoot` reads `project_root` from the store, anything else is the
/// working directory.
pub(crate) fn relative_base(
    spec: &DirectiveSpec,
    services: &DirectiveServices<'_>,
    store: &Store,
) -> StencilResult<PathBuf> {
    if spec.arg_str("relativeTo") == Some("projectRoot") {
        store
            .get_str("project_root")
            .map(PathBuf::from)
            .ok_or_else(|| {
                DomainError::StoreKeyMissing {
                    key: "project_root".into(),
                }
                .into()
            })
    } else {
        Ok(services.env.working_dir.clone())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StencilError;
    use crate::test_support::{LookupRenderer, RecordingRunner, StubFilesystem};
    use serde_json::json;

    fn env() -> RunEnv {
        RunEnv {
            template_dir: "/templates/default/plugin".into(),
            working_dir: "/project".into(),
            config_filename: "stencil.json".into(),
            overwrite: false,
        }
    }

    #[test]
    fn unknown_action_is_a_typed_error() {
        let fs = StubFilesystem::new();
        let renderer = LookupRenderer;
        let runner = RecordingRunner::new();
        let conditions = ConditionRegistry::with_builtins();
        let env = env();
        let services = DirectiveServices {
            fs: &fs,
            renderer: &renderer,
            runner: &runner,
            conditions: &conditions,
            env: &env,
        };

        let registry = DirectiveRegistry::with_builtins();
        let spec: DirectiveSpec = serde_json::from_value(json!({"action": "teleport"})).unwrap();
        let err = registry.make(&spec, &services, &Store::new()).unwrap_err();
        assert!(matches!(
            err,
            StencilError::Domain(DomainError::DirectiveActionUnknown { action }) if action == "teleport"
        ));
    }

    #[test]
    fn missing_action_is_a_typed_error() {
        let fs = StubFilesystem::new();
        let renderer = LookupRenderer;
        let runner = RecordingRunner::new();
        let conditions = ConditionRegistry::with_builtins();
        let env = env();
        let services = DirectiveServices {
            fs: &fs,
            renderer: &renderer,
            runner: &runner,
            conditions: &conditions,
            env: &env,
        };

        let registry = DirectiveRegistry::with_builtins();
        let spec: DirectiveSpec = serde_json::from_value(json!({"from": "src"})).unwrap();
        let err = registry.make(&spec, &services, &Store::new()).unwrap_err();
        assert!(matches!(
            err,
            StencilError::Domain(DomainError::DirectiveActionMissing)
        ));
    }

    #[test]
    fn directives_run_in_declaration_order() {
        let fs = StubFilesystem::new();
        let renderer = LookupRenderer;
        let runner = RecordingRunner::new();
        let conditions = ConditionRegistry::with_builtins();
        let env = env();
        let services = DirectiveServices {
            fs: &fs,
            renderer: &renderer,
            runner: &runner,
            conditions: &conditions,
            env: &env,
        };

        let specs: Vec<DirectiveSpec> = serde_json::from_value(json!([
            {"action": "runCommand", "command": "first"},
            {"action": "runCommand", "command": "second"}
        ]))
        .unwrap();

        let registry = DirectiveRegistry::with_builtins();
        registry
            .run_all(&specs, &services, &mut Store::new())
            .unwrap();
        assert_eq!(runner.ran(), ["first", "second"]);
    }

    #[test]
    fn failed_directive_aborts_the_remainder() {
        let fs = StubFilesystem::new();
        let renderer = LookupRenderer;
        let mut runner = RecordingRunner::new();
        runner.fail_on = Some("boom".into());
        let conditions = ConditionRegistry::with_builtins();
        let env = env();
        let services = DirectiveServices {
            fs: &fs,
            renderer: &renderer,
            runner: &runner,
            conditions: &conditions,
            env: &env,
        };

        let specs: Vec<DirectiveSpec> = serde_json::from_value(json!([
            {"action": "runCommand", "command": "boom"},
            {"action": "runCommand", "command": "never"}
        ]))
        .unwrap();

        let registry = DirectiveRegistry::with_builtins();
        let result = registry.run_all(&specs, &services, &mut Store::new());
        assert!(result.is_err());
        assert_eq!(runner.ran(), ["boom"]);
    }
}
