//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `initproject-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::application::{FilesystemError, RenderError, VcsError};
use crate::domain::Configuration;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `initproject_adapters::filesystem::LocalFilesystem` (production)
/// - `initproject_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Writes are not transactional: a failed refresh leaves whatever was
/// already written.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories; no-op if present.
    fn create_dir_all(&self, path: &Path) -> Result<(), FilesystemError>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> Result<(), FilesystemError>;

    fn read_to_string(&self, path: &Path) -> Result<String, FilesystemError>;

    /// Copy a file byte-for-byte.
    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), FilesystemError>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// `true` if both paths name the same existing file.
    fn same_file(&self, a: &Path, b: &Path) -> bool;
}

/// Port for version control queries on the output path.
///
/// Implemented by:
/// - `initproject_adapters::vcs::GitVcs` (git2)
/// - `initproject_adapters::vcs::StaticVcs` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Vcs: Send + Sync {
    /// `true` if `path` is the root of a working tree.
    fn is_repository(&self, path: &Path) -> bool;

    /// `true` if tracked files have staged or unstaged changes.
    fn is_dirty(&self, path: &Path) -> Result<bool, VcsError>;
}

/// Port for locating external programs a project type depends on.
#[cfg_attr(test, mockall::automock)]
pub trait ToolLocator: Send + Sync {
    fn find(&self, program: &str) -> Option<PathBuf>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `initproject_adapters::renderer::TeraRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Expand `source` against `context`.
    ///
    /// `name` identifies the template in error messages only. Variables
    /// missing from `context` render as empty, and output is byte-identical
    /// for identical inputs.
    fn render(
        &self,
        name: &str,
        source: &str,
        context: &Configuration,
    ) -> Result<String, RenderError>;
}
