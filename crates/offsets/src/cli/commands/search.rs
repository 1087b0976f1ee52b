//! Implementation of `offsets search`.

use std::process::ExitCode;

use offsets_config::OutputFormat;
use offsets_core::{Value, column_arg, offset_records, offsets};
use offsets_query::parse;
use offsets_table::RowMatch;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{JsonMatch, print_json},
};

/// Searches files and prints the offsets of each matching file.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    if cmd.explain {
        explain(&cmd.query);
    }

    let table = match ctx.file_table(&cmd.files) {
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

    if cmd.json || ctx.config.output.format == OutputFormat::Json {
        output_json(&matches, cmd.column)
    } else {
        output_text(&matches, cmd.column)
    }
}

/// Prints one `<path>\t<offsets>` line per match.
fn output_text(matches: &[RowMatch<'_>], column: i64) -> ExitCode {
    let args = [Value::Integer(column)];
    for row in matches {
        match offsets(row, &args) {
            Ok(text) => println!("{}\t{text}", row_path(row)),
            Err(e) => {
                eprintln!("error: {}: {e}", row_path(row));
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

/// Prints all matches as a JSON array.
fn output_json(matches: &[RowMatch<'_>], column: i64) -> ExitCode {
    let column = match column_arg(&[Value::Integer(column)]) {
        Ok(column) => column,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut out = Vec::with_capacity(matches.len());
    for row in matches {
        let records = match column.map(|c| offset_records(row, c)).transpose() {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                eprintln!("error: {}: {e}", row_path(row));
                return ExitCode::FAILURE;
            }
        };
        out.push(JsonMatch::new(row_path(row).to_string(), column, records));
    }
    print_json(&out)
}

/// Returns the file path stored in a match's first column.
fn row_path<'t>(row: &RowMatch<'t>) -> &'t str {
    row.values().first().map_or("", String::as_str)
}

/// Prints the parsed match expression and its phrases to stderr.
fn explain(query: &str) {
    match parse(query) {
        Ok(Some(expr)) => {
            eprintln!("Parsed expression:");
            for line in expr.to_string().lines() {
                eprintln!("   {line}");
            }
            eprintln!("Phrases:");
            for (id, phrase) in expr.phrases().iter().enumerate() {
                let column = phrase.column.as_deref().unwrap_or("*");
                let negated = if phrase.negated { " (negated)" } else { "" };
                eprintln!("   {id}: {column}: {}{negated}", phrase.words.join(" "));
            }
        }
        Ok(None) => eprintln!("Empty query (matches nothing)"),
        // The search reports the error with full context.
        Err(_) => {}
    }
}
