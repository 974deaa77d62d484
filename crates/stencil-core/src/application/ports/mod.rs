//! Application ports (traits) for external dependencies.
//!
//! The application needs four capabilities from the outside world:
//! filesystem access, placeholder substitution, terminal prompting, and
//! process execution. Adapters in `stencil-adapters` implement these; tests
//! substitute in-memory and scripted doubles.

use std::path::Path;

use serde_json::Value;

use crate::error::StencilResult;

/// A directory entry returned by [`Filesystem::list_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Port for filesystem operations.
///
/// Relative paths are resolved against the process working directory, as
/// condition rules expect (`composer.json` lookups and `filePresent`
/// checks).
pub trait Filesystem: Send + Sync {
    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a file's raw bytes.
    fn read(&self, path: &Path) -> StencilResult<Vec<u8>>;

    /// Read a file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> StencilResult<String>;

    /// Write raw bytes to a file, replacing any existing content.
    fn write(&self, path: &Path, content: &[u8]) -> StencilResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// List the immediate children of a directory, sorted by name.
    fn list_dir(&self, path: &Path) -> StencilResult<Vec<DirEntry>>;
}

/// Port for placeholder substitution.
///
/// Implementations replace `{{ path }}` placeholders from `data` and expose
/// the transform registry as filters (`{{ name | kebabCase }}`).
pub trait Renderer: Send + Sync {
    /// Substitute placeholders in `text` using `data`.
    fn substitute(&self, text: &str, data: &Value) -> StencilResult<String>;

    /// Substitute only when the text actually contains the placeholder
    /// marker. The pre-check keeps binary and non-templated content away
    /// from the engine.
    fn replace(&self, text: &str, data: &Value) -> StencilResult<String> {
        if text.contains("{{") {
            self.substitute(text, data)
        } else {
            Ok(text.to_string())
        }
    }
}

/// An option presented by choice-style prompts: stored key plus display
/// label, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptOption {
    pub key: String,
    pub label: String,
}

/// Port for terminal interaction.
///
/// Each method blocks until the user answers; there is no timeout or
/// cancellation beyond interrupting the process.
pub trait Prompter: Send + Sync {
    /// Free-text input with an optional pre-filled default.
    fn input(&self, message: &str, default: Option<&str>) -> StencilResult<String>;

    /// Multi-line text input.
    fn multiline(&self, message: &str) -> StencilResult<String>;

    /// Masked text input.
    fn password(&self, message: &str) -> StencilResult<String>;

    /// Yes/no confirmation.
    fn confirm(&self, message: &str) -> StencilResult<bool>;

    /// Single choice, typed as free text constrained to the option keys.
    fn choice(&self, message: &str, options: &[PromptOption]) -> StencilResult<String>;

    /// Single choice from a fixed list. Returns the chosen option key.
    fn select(&self, message: &str, options: &[PromptOption]) -> StencilResult<String>;

    /// Multiple choice from a fixed list. Returns the chosen option keys.
    fn multi_select(&self, message: &str, options: &[PromptOption]) -> StencilResult<Vec<String>>;
}

/// Port for external process execution.
pub trait CommandRunner: Send + Sync {
    /// Run a shell command from `dir`, waiting for completion. A non-zero
    /// exit status is an error naming the command.
    fn run(&self, command: &str, dir: &Path) -> StencilResult<()>;

    /// Check whether an executable is available on the system path.
    fn exists(&self, command: &str) -> bool;
}
