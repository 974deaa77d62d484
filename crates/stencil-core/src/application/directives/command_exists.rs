//! The `commandExists` directive: pre-flight executable check.

use crate::application::ApplicationError;
use crate::domain::{DirectiveSpec, DomainError, Store};
use crate::error::StencilResult;

use super::{Directive, DirectiveServices};

/// Fails the run when the named executable is not on the system path.
/// Typically the first directive in a list, guarding everything after it.
#[derive(Debug)]
pub struct CommandExistsDirective {
    command: String,
}

impl CommandExistsDirective {
    pub fn from_spec(
        spec: &DirectiveSpec,
        _services: &DirectiveServices<'_>,
        _store: &Store,
    ) -> StencilResult<Box<dyn Directive>> {
        let command = spec
            .arg_str("command")
            .filter(|s| !s.is_empty())
            .ok_or(DomainError::DirectiveFieldMissing {
                field: "command",
                action: "commandExists",
            })?
            .to_string();
        Ok(Box::new(Self { command }))
    }
}

impl Directive for CommandExistsDirective {
    fn execute(&self, services: &DirectiveServices<'_>, _store: &mut Store) -> StencilResult<()> {
        if !services.runner.exists(&self.command) {
            return Err(ApplicationError::CommandNotAvailable {
                command: self.command.clone(),
            }
            .into());
        }
        Ok(())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
