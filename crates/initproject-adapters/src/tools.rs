//! External program lookup.

use std::{collections::BTreeMap, path::PathBuf};

use initproject_core::application::ports::ToolLocator;
use tracing::debug;

/// Looks programs up on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathToolLocator;

impl PathToolLocator {
    pub fn new() -> Self {
        Self
    }
}

impl ToolLocator for PathToolLocator {
    fn find(&self, program: &str) -> Option<PathBuf> {
        let found = which::which(program).ok();
        debug!(program, found = ?found, "looked up program");
        found
    }
}

/// A fixed set of installed programs. For tests.
#[derive(Debug, Clone, Default)]
pub struct StaticToolLocator {
    programs: BTreeMap<String, PathBuf>,
}

impl StaticToolLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: &str) -> Self {
        self.programs
            .insert(program.to_string(), PathBuf::from("/usr/bin").join(program));
        self
    }
}

impl ToolLocator for StaticToolLocator {
    fn find(&self, program: &str) -> Option<PathBuf> {
        self.programs.get(program).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_none() {
        assert!(
            PathToolLocator::new()
                .find("initproject-no-such-program-4f1c")
                .is_none()
        );
    }

    #[test]
    fn static_locator_only_knows_its_programs() {
        let tools = StaticToolLocator::new().with_program("premake5");
        assert!(tools.find("premake5").is_some());
        assert!(tools.find("cmake").is_none());
    }
}
