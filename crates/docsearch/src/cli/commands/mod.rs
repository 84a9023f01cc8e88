//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod docs;
pub mod init;
pub mod search;
pub mod session;
pub mod theme;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Session(cmd) => session::run(ctx, &cmd),
        Commands::Docs(cmd) => docs::run(ctx, &cmd),
        Commands::Theme(cmd) => theme::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Check => check::run(ctx),
    }
}
