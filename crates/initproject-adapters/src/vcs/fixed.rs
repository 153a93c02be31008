use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use initproject_core::application::{VcsError, ports::Vcs};

/// Canned repository answers, keyed by path. For tests.
#[derive(Debug, Clone, Default)]
pub struct StaticVcs {
    /// `path -> dirty`
    repositories: BTreeMap<PathBuf, bool>,
}

impl StaticVcs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clean_repo(mut self, path: impl Into<PathBuf>) -> Self {
        self.repositories.insert(path.into(), false);
        self
    }

    pub fn with_dirty_repo(mut self, path: impl Into<PathBuf>) -> Self {
        self.repositories.insert(path.into(), true);
        self
    }
}

impl Vcs for StaticVcs {
    fn is_repository(&self, path: &Path) -> bool {
        self.repositories.contains_key(path)
    }

    fn is_dirty(&self, path: &Path) -> Result<bool, VcsError> {
        self.repositories
            .get(path)
            .copied()
            .ok_or_else(|| VcsError {
                path: path.to_path_buf(),
                reason: "not a repository".into(),
            })
    }
}
