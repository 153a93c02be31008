//! # initproject
//!
//! Re-scaffolds a project tree from a YAML generator configuration.
//!
//! ## Startup sequence
//!
//! 1. Parse arguments (clap handles `--help` / `--version`).
//! 2. Initialise the tracing subscriber.
//! 3. Load tool settings (file + env + defaults).
//! 4. Build the [`OutputManager`] and print the version header.
//! 5. List project types or run a refresh.
//! 6. Translate any [`CliError`] into a message on stderr and an exit code.

use std::{io::IsTerminal as _, process::ExitCode};

use clap::Parser;
use initproject_adapters::builtin_registry;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Action, Cli},
    commands::refresh::RefreshArgs,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
    settings::AppSettings,
};

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod settings;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too, on stdout with code 0.
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;

    let settings = match AppSettings::load() {
        Ok(settings) => settings,
        Err(e) => {
            let color = !cli.global.no_color && std::io::stderr().is_terminal();
            return handle_error(CliError::settings(e), verbose, color);
        }
    };

    let output = OutputManager::new(&cli.global, &settings);
    let color = output.supports_color() && std::io::stderr().is_terminal();

    match run(cli, &settings, &output) {
        Ok(()) => {
            info!("initproject completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, color),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, settings: &AppSettings, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("initproject {VERSION}"))?;

    let registry = builtin_registry();

    match cli.action()? {
        Action::ListTypes => commands::list_types::execute(&registry, output),
        Action::Refresh { config, out_path } => {
            let template_dir = cli
                .template_dir
                .unwrap_or_else(|| settings.override_dir_or_default());
            let args = RefreshArgs {
                config,
                out_path,
                template_dir,
            };
            commands::refresh::execute(&args, &registry, output)
        }
    }
}

/// The one place structured errors become stderr text and an exit code.
fn handle_error(err: CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();

    let msg = if color {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_version_matches_cargo() {
        assert_eq!(Cli::command().get_version(), Some(VERSION));
    }
}
