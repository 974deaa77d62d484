//! Prompter adapters.

pub mod scripted;
pub mod terminal;

pub use scripted::{ScriptedAnswer, ScriptedPrompter};
pub use terminal::TerminalPrompter;
