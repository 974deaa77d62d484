//! The `runCommand` directive: gated external command execution.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::application::conditions::Relation;
use crate::domain::{ConditionSpec, DirectiveSpec, DomainError, Store};
use crate::error::StencilResult;

use super::{relative_base, Directive, DirectiveServices};

/// Runs a command after substituting it against the store. Optional
/// `conditions` gate execution with AND semantics; a false gate is a
/// silent no-op, a non-zero exit is fatal.
#[derive(Debug)]
pub struct RunCommandDirective {
    command: String,
    conditions: Vec<ConditionSpec>,
    path: PathBuf,
}

impl RunCommandDirective {
    pub fn from_spec(
        spec: &DirectiveSpec,
        services: &DirectiveServices<'_>,
        store: &Store,
    ) -> StencilResult<Box<dyn Directive>> {
        let command = spec
            .arg_str("command")
            .filter(|s| !s.is_empty())
            .ok_or(DomainError::DirectiveFieldMissing {
                field: "command",
                action: "runCommand",
            })?
            .to_string();

        let conditions: Vec<ConditionSpec> = match spec.arg("conditions") {
            None => Vec::new(),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                DomainError::DirectiveFieldInvalid {
                    field: "conditions",
                    action: "runCommand",
                    reason: e.to_string(),
                }
            })?,
        };

        let path = relative_base(spec, services, store)?;

        Ok(Box::new(Self {
            command,
            conditions,
            path,
        }))
    }
}

impl Directive for RunCommandDirective {
    #[instrument(skip_all, fields(command = %self.command))]
    fn execute(&self, services: &DirectiveServices<'_>, store: &mut Store) -> StencilResult<()> {
        if !self.conditions.is_empty()
            && !services
                .conditions
                .evaluate(&self.conditions, Relation::And, store, services.fs)?
        {
            debug!("conditions evaluated false, skipping command");
            return Ok(());
        }

        let command = services.renderer.replace(&self.command, &store.to_value())?;
        info!(%command, "Running command");
        services.runner.run(&command, &self.path)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
