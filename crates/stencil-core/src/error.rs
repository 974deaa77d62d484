//! Unified error handling for Stencil Core.
//!
//! Wraps domain (configuration/validation) and application (runtime)
//! errors behind one type with category and suggestion accessors for the
//! CLI to render.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Stencil Core operations.
#[derive(Debug, Error, Clone)]
pub enum StencilError {
    /// Configuration and validation failures (broken template specs).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Runtime failures while executing a run.
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl StencilError {
    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Error category for display and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::error::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::error::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => match e.category() {
                crate::application::error::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::application::error::ErrorCategory::Internal => ErrorCategory::Internal,
            },
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type StencilResult<T> = Result<T, StencilError>;
