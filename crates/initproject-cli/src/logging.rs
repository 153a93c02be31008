//! Installs the process-wide tracing subscriber; the library crates only
//! emit events.
//!
//! Verbosity: default warn, `-v` info, `-vv` debug, `-vvv` and up trace,
//! `--quiet` error. A set `RUST_LOG` replaces the computed filter entirely.

use std::io::{self, IsTerminal as _};

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events are shown at the requested level.
const TARGETS: [&str; 3] = ["initproject", "initproject_core", "initproject_adapters"];

pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level_for(args))));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .without_time()
        .with_target(false)
        .with_ansi(!args.no_color && io::stderr().is_terminal())
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

fn directives(level: LevelFilter) -> String {
    let level = level.to_string().to_ascii_lowercase();
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    [LevelFilter::WARN, LevelFilter::INFO, LevelFilter::DEBUG]
        .get(usize::from(args.verbose))
        .copied()
        .unwrap_or(LevelFilter::TRACE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn verbosity_maps_to_levels() {
        let cases = [
            (0, LevelFilter::WARN),
            (1, LevelFilter::INFO),
            (2, LevelFilter::DEBUG),
            (3, LevelFilter::TRACE),
            (200, LevelFilter::TRACE),
        ];
        for (verbose, expected) in cases {
            assert_eq!(level_for(&args(verbose, false)), expected, "-v x{verbose}");
        }
    }

    #[test]
    fn quiet_wins() {
        assert_eq!(level_for(&args(2, true)), LevelFilter::ERROR);
    }

    #[test]
    fn every_crate_gets_the_level() {
        assert_eq!(
            directives(LevelFilter::DEBUG),
            "initproject=debug,initproject_core=debug,initproject_adapters=debug"
        );
    }
}
