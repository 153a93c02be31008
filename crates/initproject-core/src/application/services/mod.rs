//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer, the ports and the project-type
//! plugins to accomplish "refresh a project" and "list project types".

pub mod refresh_service;
pub mod registry;
pub mod template_resolver;

pub use refresh_service::{RefreshRequest, RefreshService};
pub use registry::{ProjectTypeFactory, ProjectTypeRegistry};
pub use template_resolver::TemplateResolver;
