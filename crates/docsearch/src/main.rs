//! Command-line interface for `docsearch`, the search box of a just-the-docs site.

mod cli;

use std::{io, process::ExitCode};

use tracing_subscriber::EnvFilter;

use crate::cli::{CommandContext, args::Commands, commands};

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "DOCSEARCH_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> ExitCode {
    let cli = cli::args::parse_cli();
    init_logging();

    let ctx = match &cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}

/// Installs the stderr subscriber, which also collects `log` records from the libraries.
fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
