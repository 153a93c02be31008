//! Core domain layer for initproject.
//!
//! Pure data and rules: the parsed configuration, the state of an output
//! directory, and project-type descriptors. No filesystem, VCS or process
//! access happens here; those go through the ports in `crate::application`.

pub mod configuration;
pub mod descriptor;
pub mod error;
pub mod target_state;

pub use configuration::{Configuration, PROJECT_TYPE_KEYS, is_truthy};
pub use descriptor::ProjectTypeDescriptor;
pub use error::ConfigError;
pub use target_state::TargetDirectoryState;
