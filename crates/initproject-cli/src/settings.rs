//! User-level settings for the tool itself.
//!
//! These never reach the generator configuration; they only steer the CLI
//! (where overrides live, whether to colour output).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site)
//! 2. `INITPROJECT_*` environment variables, `__` between nested keys
//!    (`INITPROJECT_TEMPLATES__OVERRIDE_DIR`)
//! 3. `settings.toml` in the platform config directory
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "INITPROJECT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub templates: TemplateSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory searched for `<name>.tmpl` overrides.
    pub override_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub no_color: bool,
}

impl AppSettings {
    /// Load from the default settings file (if any) and the environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Self::settings_path().as_deref())
    }

    /// Load from `file` (skipped when missing) and the environment.
    pub fn load_from(file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build().context("failed to read settings")?;
        settings
            .try_deserialize()
            .context("settings have an unexpected shape")
    }

    /// `settings.toml` under the platform config directory.
    pub fn settings_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "initproject", "initproject")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    /// Override directory when neither the flag nor the settings name one.
    pub fn override_dir_or_default(&self) -> PathBuf {
        self.templates
            .override_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
