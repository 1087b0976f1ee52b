//! The `offsets(column)` entry point.
//!
//! Validates the call's arguments, resolves the column text, and runs extraction into an
//! [`OffsetWriter`]. A column the row does not have yields an empty result.

use tracing::debug;

use crate::{MatchContext, OffsetRecord, OffsetWriter, OffsetsError, RecordSink, extract};

/// Usage message for a call with the wrong number of arguments.
const WRONG_ARG_COUNT: &str = "wrong number of arguments to function offsets()";

/// An argument value passed by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// An integer.
    Integer(i64),
    /// A floating-point number.
    Real(f64),
    /// Text.
    Text(String),
}

/// Interprets the single argument of an `offsets()` call as a column index.
///
/// Returns `Ok(None)` for a negative index, which can never name a column. Text arguments are
/// accepted if they parse as an integer.
pub fn column_arg(args: &[Value]) -> Result<Option<usize>, OffsetsError> {
    let [arg] = args else {
        return Err(OffsetsError::usage(WRONG_ARG_COUNT));
    };

    let index = match arg {
        Value::Integer(i) => *i,
        Value::Text(s) => s.trim().parse::<i64>().map_err(|_| {
            OffsetsError::usage(format!("offsets(): column index must be an integer, got {s:?}"))
        })?,
        Value::Real(_) | Value::Null => {
            return Err(OffsetsError::usage(
                "offsets(): column index must be an integer",
            ));
        }
    };

    Ok(usize::try_from(index).ok())
}

/// Runs extraction for `column` into `sink`, returning the number of records written.
///
/// Returns `Ok(0)` without tokenizing if the row has no such column.
fn run<C, S>(ctx: &C, column: usize, sink: &mut S) -> Result<usize, OffsetsError>
where
    C: MatchContext + ?Sized,
    S: RecordSink + ?Sized,
{
    match ctx.column_text(column)? {
        Some(text) => extract(ctx, column, text, sink),
        None => {
            debug!(column, "column not present in row");
            Ok(0)
        }
    }
}

/// Computes the serialized offsets payload for one row.
///
/// `args` must contain exactly one value, the 0-based column index. The result holds one
/// `"<column> <start> <end>"` triple per coalesced phrase span, separated by single spaces, in
/// document order. Out-of-range columns and columns without matches produce an empty string.
pub fn offsets<C>(ctx: &C, args: &[Value]) -> Result<String, OffsetsError>
where
    C: MatchContext + ?Sized,
{
    let Some(column) = column_arg(args)? else {
        return Ok(String::new());
    };

    let mut writer = OffsetWriter::new();
    run(ctx, column, &mut writer)?;
    Ok(writer.finish())
}

/// Computes the offset records for `column` without serializing them.
pub fn offset_records<C>(ctx: &C, column: usize) -> Result<Vec<OffsetRecord>, OffsetsError>
where
    C: MatchContext + ?Sized,
{
    let mut records = Vec::new();
    run(ctx, column, &mut records)?;
    Ok(records)
}
