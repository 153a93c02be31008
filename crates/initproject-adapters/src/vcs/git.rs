//! git2-backed repository queries.

use std::path::Path;

use git2::{Repository, Status, StatusOptions};
use initproject_core::application::{VcsError, ports::Vcs};
use tracing::debug;

/// Answers repository questions with libgit2.
///
/// The output path must itself be the top of a working tree; parent
/// directories are not searched.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitVcs;

impl GitVcs {
    pub fn new() -> Self {
        Self
    }
}

impl Vcs for GitVcs {
    fn is_repository(&self, path: &Path) -> bool {
        match Repository::open(path) {
            Ok(repo) => !repo.is_bare(),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "not a git repository");
                false
            }
        }
    }

    fn is_dirty(&self, path: &Path) -> Result<bool, VcsError> {
        let map_err = |e: git2::Error| VcsError {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        };

        let repo = Repository::open(path).map_err(map_err)?;

        let mut options = StatusOptions::new();
        options.include_untracked(false);
        options.include_ignored(false);

        let statuses = repo.statuses(Some(&mut options)).map_err(map_err)?;
        let changed = statuses
            .iter()
            .filter(|entry| {
                let status = entry.status();
                status != Status::CURRENT && !status.contains(Status::IGNORED)
            })
            .inspect(|entry| {
                debug!(file = entry.path().unwrap_or("<non-utf8>"), status = ?entry.status(), "uncommitted change");
            })
            .count();

        Ok(changed > 0)
    }
}
