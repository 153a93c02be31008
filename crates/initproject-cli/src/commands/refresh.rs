//! `initproject --config FILE --out-path DIR`.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use initproject_adapters::{GitVcs, LocalFilesystem, PathToolLocator, TeraRenderer};
use initproject_core::{domain::ConfigError, prelude::*};
use tracing::info;

use crate::{error::CliResult, output::OutputManager};

#[derive(Debug)]
pub struct RefreshArgs {
    pub config: PathBuf,
    pub out_path: PathBuf,
    pub template_dir: PathBuf,
}

pub fn execute(
    args: &RefreshArgs,
    registry: &ProjectTypeRegistry,
    output: &OutputManager,
) -> CliResult<()> {
    let config = load_config(&args.config)?;
    let name = config.project_type().map_err(InitError::from)?;
    let project_type = registry.load(name).map_err(InitError::from)?;

    info!(
        project_type = project_type.name(),
        config = %args.config.display(),
        template_dir = %args.template_dir.display(),
        "starting refresh"
    );
    output.info(&format!(
        "Refreshing {} project in {}",
        project_type.name(),
        args.out_path.display()
    ))?;

    service(&args.template_dir).refresh(RefreshRequest {
        config: &config,
        project_type: project_type.as_ref(),
        out_path: &args.out_path,
        config_source: Some(&args.config),
    })?;

    output.success(&format!("{} is up to date", args.out_path.display()))?;
    Ok(())
}

/// Read and parse the generator configuration at `path`.
pub fn load_config(path: &Path) -> InitResult<Configuration> {
    let source = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(Configuration::from_yaml_str(&source)?)
}

fn service(template_dir: &Path) -> RefreshService {
    let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let resolver = TemplateResolver::new(
        Arc::new(TeraRenderer::new()),
        filesystem.clone(),
        template_dir,
    );
    RefreshService::new(
        filesystem,
        Arc::new(GitVcs::new()),
        Arc::new(PathToolLocator::new()),
        resolver,
    )
}
