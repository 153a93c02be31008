//! CLI error type: user-facing message, suggestions and exit code.
//!
//! | Exit code | Meaning |
//! |-----------|---------|
//! | 0 | success |
//! | 1 | usage error or internal failure |
//! | 2 | refresh refused or generation failed |
//! | 3 | project type or template not found |
//! | 4 | configuration or settings unusable |

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use initproject_core::error::{ErrorCategory as CoreCategory, InitError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// The command line does not describe anything to do.
    #[error("{message}")]
    Usage { message: String },

    /// Core failures are reported with their own wording.
    #[error(transparent)]
    Core(#[from] InitError),

    /// Tool settings (settings file or `INITPROJECT_*` variables) are
    /// unusable.
    #[error("Settings error: {message}")]
    Settings {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn settings(err: anyhow::Error) -> Self {
        CliError::Settings {
            message: err.to_string(),
            source: err.into(),
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Usage { .. } => vec!["Use --help for usage information".into()],
            Self::Core(core) => core.suggestions(),
            Self::Settings { .. } => vec![
                "Check settings.toml in your config directory".into(),
                "Check INITPROJECT_* environment variables".into(),
            ],
            Self::IoError { .. } => vec!["Check file permissions".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Usage { .. } => ErrorCategory::Usage,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::Settings { .. } => ErrorCategory::Configuration,
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Usage | ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
        }
    }

    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = format!(
            "\n{} {}\n\n  {}\n",
            "\u{2717}".red().bold(),
            "Error:".red().bold(),
            self.to_string().red()
        );

        if verbose {
            for cause in self.causes() {
                output.push_str(&format!("\n  {} {}\n", "\u{2192}".dimmed(), cause.dimmed()));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if self.wants_verbose_hint(verbose) {
            output.push_str(&format!(
                "\n{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// [`Self::format_colored`] without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\nError: {self}\n");

        if verbose {
            for cause in self.causes() {
                out.push_str(&format!("  Caused by: {cause}\n"));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if self.wants_verbose_hint(verbose) {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    pub fn log(&self) {
        match self.category() {
            ErrorCategory::Usage => tracing::debug!("Usage error: {}", self),
            ErrorCategory::UserError => tracing::warn!("Refresh failed: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }

    fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut source = self.source();
        while let Some(err) = source {
            causes.push(err.to_string());
            source = err.source();
        }
        causes
    }

    fn wants_verbose_hint(&self, verbose: bool) -> bool {
        !verbose && !matches!(self, Self::Usage { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Nothing to do, or contradictory flags.
    Usage,
    /// The request was understood but refused.
    UserError,
    NotFound,
    Configuration,
    Internal,
}
