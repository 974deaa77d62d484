//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Conditions**: the boolean rule engine gating prompts and directives
//! - **Services**: the prompt pipeline and the file scaffolder
//! - **Directives**: the pluggable side-effecting actions and their registry
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but performs no I/O
//! of its own; everything effectful goes through a port.

pub mod conditions;
pub mod directives;
pub mod error;
pub mod ports;
pub mod services;

pub use conditions::{Condition, ConditionRegistry, Relation};
pub use directives::{Directive, DirectiveRegistry, DirectiveServices, RunEnv};
pub use error::ApplicationError;
pub use ports::{CommandRunner, Filesystem, PromptOption, Prompter, Renderer};
pub use services::{PromptPipeline, Scaffolder};
