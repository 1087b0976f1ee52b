//! Implementation of `offsets tokens`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};

use crate::cli::{args::TokensCommand, context::CommandContext};

/// Prints each token the configured analyzer produces for the given text.
pub fn run(ctx: &CommandContext, cmd: &TokensCommand) -> ExitCode {
    let analyzer = match ctx.analyzer() {
        Ok(analyzer) => analyzer,
        Err(code) => return code,
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Pos", "Start", "End", "Colocated", "Token"]);
    for token in analyzer.analyze(&cmd.text) {
        table.add_row(vec![
            Cell::new(token.position),
            Cell::new(token.offsets.start),
            Cell::new(token.offsets.end),
            Cell::new(if token.colocated { "yes" } else { "" }),
            Cell::new(&token.text),
        ]);
    }
    println!("{table}");
    ExitCode::SUCCESS
}
