//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use offsets_core::OffsetRecord;
use serde::Serialize;

/// ANSI sequence that starts a highlighted span (bold, underlined).
const HIGHLIGHT_START: &str = "\x1b[1;4m";

/// ANSI sequence that resets styling.
const HIGHLIGHT_END: &str = "\x1b[0m";

/// One offset record in JSON output.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct JsonRecord {
    /// Column index.
    pub column: usize,
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
}

impl From<OffsetRecord> for JsonRecord {
    fn from(record: OffsetRecord) -> Self {
        Self {
            column: record.column,
            start: record.start,
            end: record.end,
        }
    }
}

/// One matching file in JSON output.
#[derive(Debug, Serialize)]
pub struct JsonMatch {
    /// Path of the file, as given on the command line.
    pub path: String,
    /// Column the offsets were computed for, absent if the column does not exist.
    pub column: Option<usize>,
    /// Coalesced offset records, in document order.
    pub offsets: Vec<JsonRecord>,
    /// The same records in text form.
    pub text: String,
}

impl JsonMatch {
    /// Builds a JSON match from extracted records.
    pub fn new(path: String, column: Option<usize>, records: Vec<OffsetRecord>) -> Self {
        let text = records
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            path,
            column,
            offsets: records.into_iter().map(JsonRecord::from).collect(),
            text,
        }
    }
}

/// Prints matches as a pretty JSON array.
pub fn print_json(matches: &[JsonMatch]) -> ExitCode {
    match serde_json::to_string_pretty(matches) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Wraps each record's byte range of `text` in highlight markers.
///
/// Records must be ordered and disjoint. Ranges that fall outside `text` or off a character
/// boundary are left unmarked.
pub fn highlight_ranges(text: &str, records: &[OffsetRecord]) -> String {
    let mut out = String::with_capacity(text.len() + records.len() * 12);
    let mut last = 0;
    for record in records {
        if record.start < last
            || record.end < record.start
            || !text.is_char_boundary(record.start)
            || !text.is_char_boundary(record.end)
        {
            continue;
        }
        out.push_str(&text[last..record.start]);
        out.push_str(HIGHLIGHT_START);
        out.push_str(&text[record.start..record.end]);
        out.push_str(HIGHLIGHT_END);
        last = record.end;
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_each_range() {
        let records = [OffsetRecord::new(1, 4, 9), OffsetRecord::new(1, 16, 19)];
        let out = highlight_ranges("the quick brown fox", &records);
        assert_eq!(
            out,
            "the \x1b[1;4mquick\x1b[0m brown \x1b[1;4mfox\x1b[0m"
        );
    }

    #[test]
    fn no_records_leaves_text_unchanged() {
        assert_eq!(highlight_ranges("plain", &[]), "plain");
    }

    #[test]
    fn invalid_ranges_are_skipped() {
        let records = [OffsetRecord::new(0, 1, 2), OffsetRecord::new(0, 0, 99)];
        assert_eq!(highlight_ranges("héllo", &records), "héllo");
    }

    #[test]
    fn json_match_mirrors_text_form() {
        let records = vec![OffsetRecord::new(1, 0, 3), OffsetRecord::new(1, 8, 11)];
        let json = JsonMatch::new("a.txt".to_string(), Some(1), records);
        assert_eq!(json.text, "1 0 3 1 8 11");
        assert_eq!(
            json.offsets[1],
            JsonRecord {
                column: 1,
                start: 8,
                end: 11
            }
        );

        let value = serde_json::to_value(&json).unwrap();
        assert_eq!(value["path"], "a.txt");
        assert_eq!(value["offsets"][0]["end"], 3);
    }
}
