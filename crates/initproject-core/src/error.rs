//! Unified error handling for initproject Core.
//!
//! Every failure a refresh can hit is fatal for the invocation. The root type
//! keeps the originating kind so the CLI can pick a message and exit code.

use thiserror::Error;

use crate::application::{GenerationError, PluginLoadError, RefreshError};
use crate::domain::ConfigError;

/// Root error type for initproject Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InitError {
    /// The configuration document could not be used.
    #[error("error parsing config: {0}")]
    Config(#[from] ConfigError),

    /// The generator-type selector did not resolve to a project type.
    #[error(transparent)]
    PluginLoad(#[from] PluginLoadError),

    /// A precondition of the refresh protocol was violated.
    #[error(transparent)]
    Refresh(#[from] RefreshError),

    /// The project type failed while generating files.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl InitError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config(e) => e.suggestions(),
            Self::PluginLoad(e) => e.suggestions(),
            Self::Refresh(e) => e.suggestions(),
            Self::Generation(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::Configuration,
            Self::PluginLoad(_) => ErrorCategory::NotFound,
            Self::Refresh(e) => e.category(),
            Self::Generation(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type InitResult<T> = Result<T, InitError>;
