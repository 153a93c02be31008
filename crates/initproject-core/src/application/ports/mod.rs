//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `initproject-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory creation and whole-file writes
//!   - `Vcs`: repository detection and dirtiness
//!   - `ToolLocator`: external program lookup
//!   - `TemplateRenderer`: template expansion

pub mod output;

pub use output::{Filesystem, TemplateRenderer, ToolLocator, Vcs};

#[cfg(test)]
pub use output::{MockFilesystem, MockTemplateRenderer, MockToolLocator, MockVcs};
