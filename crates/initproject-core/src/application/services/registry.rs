//! Name-keyed registry of project types.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{
    application::{PluginLoadError, plugin::ProjectType},
    domain::ProjectTypeDescriptor,
};

/// Builds a fresh project type instance, or explains why it cannot.
pub type ProjectTypeFactory =
    Box<dyn Fn() -> Result<Box<dyn ProjectType>, String> + Send + Sync>;

/// Project types discoverable by name.
///
/// Factories run on demand: loading one project type never instantiates the
/// others, and listing skips any factory that fails.
#[derive(Default)]
pub struct ProjectTypeRegistry {
    factories: BTreeMap<String, ProjectTypeFactory>,
}

impl ProjectTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn ProjectType>, String> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(project_type = %name, "registering project type");
        self.factories.insert(name, Box::new(factory));
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn ProjectType>, String> + Send + Sync + 'static,
    {
        self.register(name, factory);
        self
    }

    /// Instantiate the project type called `name`.
    pub fn load(&self, name: &str) -> Result<Box<dyn ProjectType>, PluginLoadError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| PluginLoadError::Unknown { name: name.into() })?;

        factory().map_err(|reason| PluginLoadError::Failed {
            name: name.into(),
            reason,
        })
    }

    /// Name and short description of every project type that loads, sorted
    /// by name.
    pub fn list_available(&self) -> impl Iterator<Item = ProjectTypeDescriptor> + '_ {
        self.factories
            .iter()
            .filter_map(|(name, factory)| match factory() {
                Ok(project_type) => Some(ProjectTypeDescriptor::new(
                    name.clone(),
                    project_type.describe_short(),
                )),
                Err(reason) => {
                    warn!(project_type = %name, %reason, "skipping project type that failed to load");
                    None
                }
            })
    }

}

impl std::fmt::Debug for ProjectTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectTypeRegistry")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
