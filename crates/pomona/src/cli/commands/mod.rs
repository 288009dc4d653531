//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod init;
pub mod search;
pub mod suggest;
pub mod tags;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Tags(cmd) => tags::run(ctx, &cmd),
        Commands::Suggest(cmd) => suggest::run(ctx, &cmd),
        Commands::Check(cmd) => check::run(&cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
    }
}
