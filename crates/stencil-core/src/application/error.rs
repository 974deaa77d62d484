//! Application layer errors.
//!
//! These represent runtime failures during orchestration — failed commands,
//! unreadable files, broken JSON. Configuration errors are `DomainError`
//! from `crate::domain`. Both kinds are fatal: a failure aborts the
//! remaining directives with no rollback of what already executed.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that occur while executing a scaffolding run.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A copy source does not exist.
    #[error("Source path is invalid: {path}")]
    SourceMissing { path: PathBuf },

    /// A file a directive needs does not exist.
    #[error("File does not exist: {path}")]
    FileMissing { path: PathBuf },

    /// A JSON document could not be decoded.
    #[error("Unable to decode JSON: {path}: {reason}")]
    JsonParse { path: PathBuf, reason: String },

    /// A JSON document's root is not an object, so dotted-path patching
    /// cannot apply.
    #[error("JSON document is not an object: {path}")]
    NotAnObject { path: PathBuf },

    /// An external command exited non-zero.
    #[error("Command failed: {command}")]
    CommandFailed { command: String },

    /// A required executable is not on the system path.
    #[error("The {command} command is not available")]
    CommandNotAvailable { command: String },

    /// Placeholder substitution failed.
    #[error("Substitution failed: {reason}")]
    RenderFailed { reason: String },

    /// Terminal interaction failed (closed stdin, interrupted, ...).
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },
}

impl ApplicationError {
    /// User-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::SourceMissing { path } | Self::FileMissing { path } => vec![
                format!("Expected to find: {}", path.display()),
                "Check the template's 'from'/'file' paths".into(),
            ],
            Self::JsonParse { path, .. } | Self::NotAnObject { path } => vec![
                format!("The file is not valid JSON: {}", path.display()),
                "Fix the file by hand and re-run".into(),
            ],
            Self::CommandFailed { command } => vec![
                format!("External command failed: {command}"),
                "Check the command output above for details".into(),
            ],
            Self::CommandNotAvailable { command } => vec![
                format!("Install '{command}' and ensure it is on your PATH"),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Error category for display and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceMissing { .. }
            | Self::FileMissing { .. }
            | Self::CommandNotAvailable { .. } => ErrorCategory::NotFound,
            _ => ErrorCategory::Internal,
        }
    }
}

/// Application error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Internal,
}
