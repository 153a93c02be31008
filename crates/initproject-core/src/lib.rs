//! initproject Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the `initproject`
//! re-scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        initproject-cli (binary)         │
//! │   flags, logging, settings, exit codes  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  RefreshService, TemplateResolver,      │
//! │  ProjectTypeRegistry                    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Ports (Filesystem, Vcs, ToolLocator,  │
//! │   TemplateRenderer) + ProjectType trait │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   initproject-adapters (Infrastructure) │
//! │  LocalFilesystem, GitVcs, TeraRenderer, │
//! │  NativeProject                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use initproject_core::prelude::*;
//!
//! # fn run(registry: ProjectTypeRegistry, service: RefreshService) -> InitResult<()> {
//! let config = Configuration::from_yaml_str("generator:\n  type: native\nname: Foo\n")?;
//! let project_type = registry.load(config.project_type()?)?;
//!
//! service.refresh(RefreshRequest {
//!     config: &config,
//!     project_type: project_type.as_ref(),
//!     out_path: "./demo".as_ref(),
//!     config_source: None,
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        FallbackTemplate, GenerationContext, ProjectType, ProjectTypeRegistry, RefreshRequest,
        RefreshService, TemplateResolver,
        ports::{Filesystem, TemplateRenderer, ToolLocator, Vcs},
    };
    pub use crate::domain::{Configuration, ProjectTypeDescriptor, TargetDirectoryState};
    pub use crate::error::{InitError, InitResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the hidden file a refresh copies the unparsed configuration into.
pub const SNAPSHOT_FILE_NAME: &str = ".initproject.yml";

/// Extension of user-supplied template override files.
pub const TEMPLATE_EXTENSION: &str = "tmpl";
