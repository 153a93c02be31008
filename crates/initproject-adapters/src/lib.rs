//! Infrastructure adapters for initproject.
//!
//! This crate implements the ports defined in
//! `initproject_core::application::ports` and ships the built-in project
//! types. It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod project_types;
pub mod renderer;
pub mod tools;
pub mod vcs;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use project_types::{NativeProject, builtin_registry};
pub use renderer::TeraRenderer;
pub use tools::{PathToolLocator, StaticToolLocator};
pub use vcs::{GitVcs, StaticVcs};
