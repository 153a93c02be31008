//! Command-line surface.
//!
//! ```text
//! initproject [-l|--list-types] [-c|--config FILE] [-o|--out-path DIR]
//!             [--template-dir DIR] [-v...|-q] [--no-color] [-V|--version]
//! ```
//!
//! Usage rules that clap cannot express with the exact wording the tool
//! reports (`--config` without `--out-path`, no action at all) are checked
//! in [`Cli::action`].

mod global;

use std::path::PathBuf;

use clap::Parser;

pub use self::global::{GlobalArgs, OutputFormat};
use crate::error::{CliError, CliResult};

#[derive(Debug, Parser)]
#[command(
    name = "initproject",
    bin_name = "initproject",
    version,
    about = "Re-scaffold a project tree from a declarative YAML configuration",
    long_about = "Reads a generator configuration, selects the project type it names and \
                  (re)generates the project skeleton into the output path.\n\n\
                  The output path must be absent or a clean git working tree.",
    after_help = "Examples:\n  initproject --list-types\n  initproject -c project.yml -o ./demo"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// List the available project types and exit.
    #[arg(short = 'l', long = "list-types")]
    pub list_types: bool,

    /// Generator configuration (YAML).
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to generate into.
    #[arg(short = 'o', long = "out-path", value_name = "DIR")]
    pub out_path: Option<PathBuf>,

    /// Directory searched for `<name>.tmpl` template overrides.
    ///
    /// Defaults to `templates.override_dir` from the settings file, then to
    /// the current directory.
    #[arg(long = "template-dir", value_name = "DIR")]
    pub template_dir: Option<PathBuf>,
}

/// What a parsed command line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    ListTypes,
    Refresh { config: PathBuf, out_path: PathBuf },
}

impl Cli {
    pub fn action(&self) -> CliResult<Action> {
        if self.list_types {
            return Ok(Action::ListTypes);
        }

        match (&self.config, &self.out_path) {
            (Some(config), Some(out_path)) => Ok(Action::Refresh {
                config: config.clone(),
                out_path: out_path.clone(),
            }),
            (Some(_), None) => Err(CliError::Usage {
                message: "--out-path not specified".into(),
            }),
            (None, _) => Err(CliError::Usage {
                message: "run initproject --help for options.".into(),
            }),
        }
    }
}
