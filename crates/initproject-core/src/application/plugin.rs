//! The project-type plugin contract.
//!
//! A project type knows how to lay out one kind of repository. The refresh
//! orchestrator only ever talks to it through [`ProjectType`]: a one-line
//! description for listings, an environment check, and the refresh itself.
//! Everything a project type needs while generating arrives explicitly in a
//! [`GenerationContext`].

use std::path::Path;

use tracing::debug;

use crate::application::{
    GenerationError,
    ports::{Filesystem, ToolLocator},
    services::TemplateResolver,
};
use crate::domain::Configuration;

/// Produces the built-in source of a fallback template.
pub type TemplateSourceFn = fn() -> &'static str;

/// A named built-in template, used when no override file exists.
#[derive(Debug, Clone, Copy)]
pub struct FallbackTemplate {
    pub name: &'static str,
    pub source: TemplateSourceFn,
}

impl FallbackTemplate {
    pub const fn new(name: &'static str, source: TemplateSourceFn) -> Self {
        Self { name, source }
    }
}

/// A pluggable generator for one kind of project.
pub trait ProjectType: Send + Sync {
    /// Selector value that picks this project type.
    fn name(&self) -> &str;

    /// One-line description. Must not depend on any configuration.
    fn describe_short(&self) -> &str;

    /// Human-readable problems with the environment; empty when usable.
    ///
    /// A missing external tool is reported here, not raised.
    fn validate_environment(&self, ctx: &GenerationContext<'_>) -> Vec<String>;

    /// Create directories and write files under `ctx.out_path()`.
    fn refresh(&self, ctx: &GenerationContext<'_>) -> Result<(), GenerationError>;

    /// Built-in templates, keyed by logical name.
    fn fallback_templates(&self) -> &[FallbackTemplate] {
        &[]
    }

    /// Source of the built-in template called `name`.
    fn fallback_template(&self, name: &str) -> Option<&'static str> {
        self.fallback_templates()
            .iter()
            .find(|template| template.name == name)
            .map(|template| (template.source)())
    }
}

/// Everything a project type may use during one refresh.
///
/// Built by `RefreshService` once the output path has passed its safety
/// check; all writes go through here so they stay under the output path.
pub struct GenerationContext<'a> {
    config: &'a Configuration,
    out_path: &'a Path,
    project_type: &'a dyn ProjectType,
    resolver: &'a TemplateResolver,
    filesystem: &'a dyn Filesystem,
    tools: &'a dyn ToolLocator,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        config: &'a Configuration,
        out_path: &'a Path,
        project_type: &'a dyn ProjectType,
        resolver: &'a TemplateResolver,
        filesystem: &'a dyn Filesystem,
        tools: &'a dyn ToolLocator,
    ) -> Self {
        Self {
            config,
            out_path,
            project_type,
            resolver,
            filesystem,
            tools,
        }
    }

    pub fn config(&self) -> &'a Configuration {
        self.config
    }

    pub fn out_path(&self) -> &'a Path {
        self.out_path
    }

    /// Resolve and render a template: override file first, then the
    /// project type's fallback.
    pub fn load_template(&self, name: &str) -> Result<String, GenerationError> {
        self.resolver.resolve(self.project_type, name, self.config)
    }

    /// Render an inline template source against the configuration.
    pub fn render_str(&self, name: &str, source: &str) -> Result<String, GenerationError> {
        self.resolver.render(name, source, self.config)
    }

    /// Create `relative` (and parents) under the output path.
    pub fn create_dir(&self, relative: impl AsRef<Path>) -> Result<(), GenerationError> {
        let path = self.out_path.join(relative);
        debug!(path = %path.display(), "creating directory");
        self.filesystem.create_dir_all(&path)?;
        Ok(())
    }

    /// Write `contents` to `relative` under the output path, replacing any
    /// existing file.
    pub fn write(&self, relative: impl AsRef<Path>, contents: &str) -> Result<(), GenerationError> {
        let path = self.out_path.join(relative);
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        debug!(path = %path.display(), bytes = contents.len(), "writing file");
        self.filesystem.write_file(&path, contents)?;
        Ok(())
    }

    /// One "`<program>` was not found in PATH." message per missing program.
    pub fn missing_programs(&self, programs: &[&str]) -> Vec<String> {
        programs
            .iter()
            .filter(|program| self.tools.find(program).is_none())
            .map(|program| format!("{program} was not found in PATH."))
            .collect()
    }
}
