//! The `execute` directive: run a script shipped inside the template.

use std::path::PathBuf;

use tracing::{info, instrument};

use crate::application::ApplicationError;
use crate::domain::{DirectiveSpec, DomainError, Store};
use crate::error::StencilResult;

use super::{Directive, DirectiveServices};

/// Runs a script file from the template directory as a shell command in
/// the working directory. Templates use this for setup steps too involved
/// to express as individual directives.
#[derive(Debug)]
pub struct ExecuteDirective {
    script: PathBuf,
    working_dir: PathBuf,
}

impl ExecuteDirective {
    pub fn from_spec(
        spec: &DirectiveSpec,
        services: &DirectiveServices<'_>,
        _store: &Store,
    ) -> StencilResult<Box<dyn Directive>> {
        let file = spec
            .arg_str("file")
            .filter(|s| !s.is_empty())
            .ok_or(DomainError::DirectiveFieldMissing {
                field: "file",
                action: "execute",
            })?;

        let script = services.env.template_dir.join(file);
        if !services.fs.exists(&script) {
            return Err(ApplicationError::FileMissing { path: script }.into());
        }

        Ok(Box::new(Self {
            script,
            working_dir: services.env.working_dir.clone(),
        }))
    }
}

impl Directive for ExecuteDirective {
    #[instrument(skip_all, fields(script = %self.script.display()))]
    fn execute(&self, services: &DirectiveServices<'_>, _store: &mut Store) -> StencilResult<()> {
        let command = format!("sh '{}'", self.script.display());
        info!("Running template script");
        services.runner.run(&command, &self.working_dir)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
