use thiserror::Error;

use crate::domain::configuration::PROJECT_TYPE_KEYS;

/// Failures turning a configuration document into a [`Configuration`].
///
/// [`Configuration`]: crate::domain::Configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("could not read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("{detail}")]
    Parse { detail: String },

    #[error("configuration is empty")]
    Empty,

    #[error("expected a mapping at the document root, found {found}")]
    NotAMapping { found: &'static str },

    #[error("missing generator type (set `{}` or `{}`)", PROJECT_TYPE_KEYS[0], PROJECT_TYPE_KEYS[1])]
    MissingProjectType,
}

impl ConfigError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Unreadable { path, .. } => vec![
                format!("Check that {path} exists and is readable"),
                "Pass the generator config with --config <FILE>".into(),
            ],
            Self::Parse { .. } | Self::NotAMapping { .. } | Self::Empty => vec![
                "The generator config must be a YAML mapping, for example:".into(),
                "  generator:".into(),
                "    type: native".into(),
                "  name: MyProject".into(),
            ],
            Self::MissingProjectType => vec![
                "Add the project type to the config:".into(),
                "  generator:".into(),
                "    type: native".into(),
                "Run initproject --list-types to see available types".into(),
            ],
        }
    }
}
