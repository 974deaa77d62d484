//! Domain errors: configuration and validation failures.
//!
//! Every variant names the offending field and entity so a template author
//! can find the broken spec without reading source. All of these are fatal —
//! the engine fails fast rather than producing a partial scaffold. The one
//! recoverable case (unknown prompt type) never reaches this enum; it is
//! logged and falls back to `input`.

use thiserror::Error;

/// Validation errors for prompts, conditions and directives.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ── prompt specs ───────────────────────────────────────────────────────
    #[error("Prompt name is missing for type '{kind}'")]
    PromptNameMissing { kind: String },

    #[error("Prompt message is missing for '{name}'")]
    PromptMessageMissing { name: String },

    #[error("Options missing for {kind} prompt: {name}")]
    PromptOptionsMissing { kind: String, name: String },

    #[error("Invalid options provided for {kind} prompt: {name}")]
    PromptOptionsInvalid { kind: String, name: String },

    // ── condition specs ────────────────────────────────────────────────────
    #[error("Condition type not provided")]
    ConditionTypeMissing,

    #[error("Condition type '{kind}' not found")]
    ConditionTypeUnknown { kind: String },

    #[error("Condition '{field}' is missing for type: '{kind}'")]
    ConditionFieldMissing { field: String, kind: String },

    #[error("Condition '{field}' is invalid for type: '{kind}'")]
    ConditionFieldInvalid { field: String, kind: String },

    #[error("Store did not contain: '{key}'")]
    StoreKeyMissing { key: String },

    // ── directive specs ────────────────────────────────────────────────────
    #[error("Directive action not provided")]
    DirectiveActionMissing,

    #[error("Directive action not found: {action}")]
    DirectiveActionUnknown { action: String },

    #[error("Directive '{field}' is missing for action '{action}'")]
    DirectiveFieldMissing {
        field: &'static str,
        action: &'static str,
    },

    #[error("Directive '{field}' is invalid for action '{action}': {reason}")]
    DirectiveFieldInvalid {
        field: &'static str,
        action: &'static str,
        reason: String,
    },

    // ── transforms ─────────────────────────────────────────────────────────
    #[error("Unknown transform: '{name}'")]
    UnknownTransform { name: String },
}

impl DomainError {
    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PromptNameMissing { .. } | Self::PromptMessageMissing { .. } => vec![
                "Every prompt needs a non-empty 'name' and 'message'".into(),
                "Check the 'prompts' section of the template configuration".into(),
            ],
            Self::PromptOptionsMissing { kind, .. } | Self::PromptOptionsInvalid { kind, .. } => {
                vec![format!(
                    "'{kind}' prompts need a non-empty 'options' map of key -> label"
                )]
            }
            Self::ConditionTypeUnknown { kind } => vec![
                format!("'{kind}' is not a registered condition type"),
                "Known types: compare, exists, notExists, filePresent, fileNotPresent, composerPackageInstalled".into(),
            ],
            Self::StoreKeyMissing { key } => vec![
                format!("The condition references '{key}', which no prompt or config supplied"),
                "Add a prompt for it, or seed it from the project configuration".into(),
            ],
            Self::DirectiveActionUnknown { action } => vec![
                format!("'{action}' is not a registered directive action"),
                "Known actions: copy, execute, runCommand, setJSONValue, commandExists".into(),
            ],
            Self::UnknownTransform { name } => vec![
                format!("'{name}' is not a registered transform"),
                "Known transforms: camelCase, kebabCase, snakeCase, pascalCase, dotCase, pathCase, plural, singular, titleCase, uppercase, lowercase, abbreviate, words".into(),
            ],
            _ => vec!["Check the template configuration".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConditionTypeUnknown { .. } | Self::DirectiveActionUnknown { .. } => {
                ErrorCategory::NotFound
            }
            _ => ErrorCategory::Validation,
        }
    }
}

/// Domain error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
