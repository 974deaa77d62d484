//! Stencil Core - the scaffolding pipeline.
//!
//! This crate provides the domain and application layers for the Stencil
//! project scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! One scaffolding run flows through three stages, all sharing a single
//! mutable [`Store`](domain::Store):
//!
//! 1. The **prompt pipeline** resolves a template's declared prompts into
//!    store entries — skipping already-answered names, honoring `showIf`
//!    conditions, substituting defaults.
//! 2. The **directive registry** executes the template's declared actions
//!    in order: recursive copy with substitution and exclusions, gated
//!    command execution, JSON patching, executable pre-flight checks.
//! 3. The template's deferred **messages** are handed back for the caller
//!    to flush once everything completed.
//!
//! Filesystem access, placeholder substitution, terminal prompting and
//! process execution are ports ([`application::ports`]); the
//! `stencil-adapters` crate supplies the production implementations.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stencil_core::prelude::*;
//!
//! # fn demo(
//! #     fs: &dyn Filesystem,
//! #     renderer: &dyn Renderer,
//! #     prompter: &dyn Prompter,
//! #     runner: &dyn CommandRunner,
//! #     config: TemplateConfig,
//! #     env: RunEnv,
//! # ) -> StencilResult<()> {
//! let mut store = Store::new();
//! let conditions = ConditionRegistry::with_builtins();
//!
//! PromptPipeline::new(prompter, renderer, fs, &conditions)
//!     .run(&config.prompts, &mut store)?;
//!
//! let services = DirectiveServices { fs, renderer, runner, conditions: &conditions, env: &env };
//! DirectiveRegistry::with_builtins().run_all(&config.directives, &services, &mut store)?;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;

#[cfg(test)]
pub(crate) mod test_support;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        conditions::{Condition, ConditionRegistry, Relation},
        directives::{Directive, DirectiveRegistry, DirectiveServices, RunEnv},
        ports::{CommandRunner, DirEntry, Filesystem, PromptOption, Prompter, Renderer},
        services::{PromptPipeline, Scaffolder},
        ApplicationError,
    };
    pub use crate::domain::{
        ConditionSpec, DirectiveSpec, DomainError, Message, OneOrMany, PromptSpec, Store,
        TemplateConfig,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
