//! Application layer for initproject.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (RefreshService, TemplateResolver,
//!   ProjectTypeRegistry)
//! - **Plugin contract**: the `ProjectType` trait and its `GenerationContext`
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types

pub mod error;
pub mod plugin;
pub mod ports;
pub mod services;

pub use services::{
    ProjectTypeFactory, ProjectTypeRegistry, RefreshRequest, RefreshService, TemplateResolver,
};

pub use plugin::{FallbackTemplate, GenerationContext, ProjectType, TemplateSourceFn};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateRenderer, ToolLocator, Vcs};

pub use error::{
    FilesystemError, GenerationError, PluginLoadError, RefreshError, RenderError, VcsError,
};
