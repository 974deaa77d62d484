//! Application services: the prompt pipeline and the file scaffolder.
//!
//! Services orchestrate ports and domain data; directives and the CLI's
//! `make` command drive them.

pub mod prompt_pipeline;
pub mod scaffolder;

pub use prompt_pipeline::PromptPipeline;
pub use scaffolder::Scaffolder;
