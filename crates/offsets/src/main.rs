//! Command-line interface for `offsets`.
//!
//! Searches text files with match expressions and reports where each matched phrase occurs,
//! as coalesced byte ranges.

#![warn(missing_docs)]

mod cli;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{
    args::{Cli, Commands},
    commands,
    context::CommandContext,
    logging,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // `init` must work even when an existing config file is broken.
    let ctx = if matches!(cli.command, Commands::Init(_)) {
        CommandContext::load_cwd_only()
    } else {
        CommandContext::load()
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}
