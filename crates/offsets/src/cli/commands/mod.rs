//! Command implementations and dispatch.

pub mod highlight;
pub mod init;
pub mod search;
pub mod tokens;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Highlight(cmd) => highlight::run(ctx, &cmd),
        Commands::Tokens(cmd) => tokens::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
    }
}
