//! Implementation of `offsets highlight`.

use std::{process::ExitCode, slice};

use offsets_core::{Value, column_arg, offset_records};

use crate::cli::{args::HighlightCommand, context::CommandContext, output::highlight_ranges};

/// Prints a column of a file with every coalesced match span highlighted.
pub fn run(ctx: &CommandContext, cmd: &HighlightCommand) -> ExitCode {
    let table = match ctx.file_table(slice::from_ref(&cmd.file)) {
        Ok(table) => table,
        Err(code) => return code,
    };

    let matches = match table.search(&cmd.query) {
        Ok(matches) => matches,
        Err(e) => {
            eprintln!("error: search failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let column = match column_arg(&[Value::Integer(cmd.column)]) {
        Ok(column) => column,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // A negative index names no column, the same as one past the last.
    let Some((column, text)) =
        column.and_then(|c| table.row(0).and_then(|row| row.get(c)).map(|text| (c, text)))
    else {
        eprintln!("error: no column {}", cmd.column);
        return ExitCode::FAILURE;
    };

    let records = match matches.first() {
        Some(row) => match offset_records(row, column) {
            Ok(records) => records,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Vec::new(),
    };

    print!("{}", highlight_ranges(text, &records));
    if !text.ends_with('\n') {
        println!();
    }
    ExitCode::SUCCESS
}
