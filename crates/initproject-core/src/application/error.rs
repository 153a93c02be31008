//! Application layer errors.
//!
//! Refresh-protocol violations, project-type generation failures and the
//! port-level failures they wrap. Configuration problems are
//! `ConfigError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// A filesystem port operation failed.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("failed to {operation} {}: {reason}", .path.display())]
pub struct FilesystemError {
    pub path: PathBuf,
    pub operation: &'static str,
    pub reason: String,
}

/// The rendering engine rejected a template.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("failed to render template '{template}': {reason}")]
pub struct RenderError {
    pub template: String,
    pub reason: String,
}

/// The VCS collaborator could not answer a query.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("could not read repository status of {}: {reason}", .path.display())]
pub struct VcsError {
    pub path: PathBuf,
    pub reason: String,
}

/// The generator-type selector did not resolve to a usable project type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PluginLoadError {
    #[error("invalid project type {name}. use --list-types")]
    Unknown { name: String },

    #[error("project type {name} failed to load: {reason}")]
    Failed { name: String, reason: String },
}

impl PluginLoadError {
    pub fn suggestions(&self) -> Vec<String> {
        vec![
            "Run initproject --list-types to see available project types".into(),
            "Set `generator.type` in the config to one of them".into(),
        ]
    }
}

/// A precondition of the refresh protocol failed. Nothing has been generated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RefreshError {
    #[error("{} exists but is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("{} exists but is not a repository", .path.display())]
    NotARepository { path: PathBuf },

    #[error(
        "{} has a dirty working tree. Stash your changes and try again.",
        .path.display()
    )]
    DirtyWorkingTree { path: PathBuf },

    #[error("Error validating environment: {}", .messages.join("\n"))]
    Environment { messages: Vec<String> },

    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    #[error(transparent)]
    Vcs(#[from] VcsError),
}

impl RefreshError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotADirectory { path } => vec![format!(
                "Choose an --out-path that is a directory, not {}",
                path.display()
            )],
            Self::NotARepository { path } => vec![
                format!("Initialise it first: git -C {} init", path.display()),
                "Or pass an --out-path that does not exist yet".into(),
            ],
            Self::DirtyWorkingTree { path } => vec![
                format!("Commit or stash the changes in {}", path.display()),
                "A refresh only writes into a clean working tree".into(),
            ],
            Self::Environment { .. } => vec![
                "Install the missing tools and make sure they are on PATH".into(),
            ],
            Self::Filesystem(e) => vec![
                format!("Failed to access: {}", e.path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::Vcs(_) => vec!["Check that the repository is not corrupted".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotADirectory { .. }
            | Self::NotARepository { .. }
            | Self::DirtyWorkingTree { .. }
            | Self::Environment { .. } => ErrorCategory::Validation,
            Self::Filesystem(_) | Self::Vcs(_) => ErrorCategory::Internal,
        }
    }
}

/// A project type failed while generating. Output already written is kept.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Invalid license type: {license}")]
    InvalidLicense { license: String, known: Vec<String> },

    #[error("template '{name}' not found: no {name}.tmpl override and no built-in fallback")]
    TemplateNotFound { name: String },

    #[error("invalid value for '{key}': {reason}")]
    InvalidConfiguration { key: String, reason: String },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

impl GenerationError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidLicense { license, known } => vec![
                format!("'{license}' is not a known license key"),
                format!("Known keys: {}", known.join(", ")),
            ],
            Self::TemplateNotFound { name } => vec![
                format!("Provide an override file named {name}.tmpl in the template directory"),
            ],
            Self::InvalidConfiguration { key, .. } => {
                vec![format!("Fix the value of `{key}` in the config")]
            }
            Self::Render(e) => vec![format!("Check the syntax of template '{}'", e.template)],
            Self::Filesystem(e) => vec![
                format!("Failed to access: {}", e.path.display()),
                "Files written before the failure are left in place; discard them with git".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidLicense { .. } | Self::InvalidConfiguration { .. } => {
                ErrorCategory::Validation
            }
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::Render(_) => ErrorCategory::Validation,
            Self::Filesystem(_) => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_messages_are_joined() {
        let err = RefreshError::Environment {
            messages: vec![
                "premake5 was not found in PATH.".into(),
                "git was not found in PATH.".into(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Error validating environment: premake5 was not found in PATH.\ngit was not found in PATH."
        );
    }

    #[test]
    fn not_a_repository_names_the_path() {
        let err = RefreshError::NotARepository {
            path: PathBuf::from("out"),
        };
        assert_eq!(err.to_string(), "out exists but is not a repository");
    }
}
