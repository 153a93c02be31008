//! Refresh Service - the main application orchestrator.
//!
//! A refresh runs in a fixed order:
//! 1. Derive the [`TargetDirectoryState`] of the output path
//! 2. Refuse dirty repositories and non-repositories before any write
//! 3. Create an absent output path
//! 4. Copy the unparsed configuration in as a snapshot
//! 5. Ask the project type to validate its environment
//! 6. Hand over to the project type's refresh
//!
//! Nothing is rolled back when step 6 fails part way; the clean-repository
//! precondition is what makes the output recoverable.

use std::{path::Path, sync::Arc};

use tracing::{debug, info, instrument};

use crate::{
    SNAPSHOT_FILE_NAME,
    application::{
        RefreshError,
        plugin::{GenerationContext, ProjectType},
        ports::{Filesystem, ToolLocator, Vcs},
        services::TemplateResolver,
    },
    domain::{Configuration, TargetDirectoryState},
    error::InitResult,
};

/// Inputs for one refresh invocation.
#[derive(Clone, Copy)]
pub struct RefreshRequest<'a> {
    pub config: &'a Configuration,
    pub project_type: &'a dyn ProjectType,
    pub out_path: &'a Path,
    /// Unparsed configuration file to snapshot into the output path.
    pub config_source: Option<&'a Path>,
}

/// Drives a project type through the refresh protocol.
pub struct RefreshService {
    filesystem: Arc<dyn Filesystem>,
    vcs: Arc<dyn Vcs>,
    tools: Arc<dyn ToolLocator>,
    resolver: TemplateResolver,
}

impl RefreshService {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        vcs: Arc<dyn Vcs>,
        tools: Arc<dyn ToolLocator>,
        resolver: TemplateResolver,
    ) -> Self {
        Self {
            filesystem,
            vcs,
            tools,
            resolver,
        }
    }

    /// Classify `path`. Never cached: the answer is re-derived on each call.
    pub fn target_state(&self, path: &Path) -> Result<TargetDirectoryState, RefreshError> {
        if !self.filesystem.exists(path) {
            return Ok(TargetDirectoryState::Absent);
        }
        if !self.filesystem.is_dir(path) {
            return Err(RefreshError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        if !self.vcs.is_repository(path) {
            return Ok(TargetDirectoryState::NotARepo);
        }

        Ok(if self.vcs.is_dirty(path)? {
            TargetDirectoryState::DirtyRepo
        } else {
            TargetDirectoryState::CleanRepo
        })
    }

    /// Run the full refresh protocol for `request`.
    #[instrument(
        skip_all,
        fields(
            project_type = %request.project_type.name(),
            out_path = %request.out_path.display()
        )
    )]
    pub fn refresh(&self, request: RefreshRequest<'_>) -> InitResult<()> {
        let RefreshRequest {
            config,
            project_type,
            out_path,
            config_source,
        } = request;

        debug!(config = ?config.as_value(), "parsed configuration");

        self.prepare_target(out_path)?;

        if let Some(source) = config_source {
            let snapshot = out_path.join(SNAPSHOT_FILE_NAME);
            if self.filesystem.same_file(source, &snapshot) {
                debug!(snapshot = %snapshot.display(), "config is the snapshot itself, not copying");
            } else {
                debug!(from = %source.display(), to = %snapshot.display(), "writing config snapshot");
                self.filesystem
                    .copy_file(source, &snapshot)
                    .map_err(RefreshError::from)?;
            }
        }

        let ctx = GenerationContext::new(
            config,
            out_path,
            project_type,
            &self.resolver,
            self.filesystem.as_ref(),
            self.tools.as_ref(),
        );

        let problems = project_type.validate_environment(&ctx);
        if !problems.is_empty() {
            return Err(RefreshError::Environment { messages: problems }.into());
        }

        info!("Generating {} project", project_type.name());
        project_type.refresh(&ctx)?;

        info!("Refresh completed successfully");
        Ok(())
    }

    /// Check the output path and create it when absent. Writes nothing
    /// unless the state permits a refresh.
    fn prepare_target(&self, out_path: &Path) -> Result<(), RefreshError> {
        let state = self.target_state(out_path)?;
        info!(state = %state, "output path checked");

        if state.permits_refresh() {
            if state == TargetDirectoryState::Absent {
                self.filesystem.create_dir_all(out_path)?;
            }
            return Ok(());
        }
        let path = out_path.to_path_buf();
        Err(match state {
            TargetDirectoryState::NotARepo => RefreshError::NotARepository { path },
            _ => RefreshError::DirtyWorkingTree { path },
        })
    }
}
