//! Offset records and their text encoding.

use std::fmt::{self, Write};

use crate::OffsetsError;

/// Upper bound on the encoded size of one record: a separator and three `usize` values.
const MAX_RECORD_LEN: usize = 1 + 3 * 20 + 2;

/// The byte range in a column's text covered by one coalesced span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRecord {
    /// Column the span was found in.
    pub column: usize,
    /// Byte offset of the span's first token.
    pub start: usize,
    /// Byte offset just past the span's last token.
    pub end: usize,
}

impl OffsetRecord {
    /// Creates an offset record.
    pub fn new(column: usize, start: usize, end: usize) -> Self {
        Self { column, start, end }
    }
}

impl fmt::Display for OffsetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.start, self.end)
    }
}

/// Receives offset records as they are resolved.
pub trait RecordSink {
    /// Accepts one record.
    fn append(&mut self, record: OffsetRecord) -> Result<(), OffsetsError>;
}

impl RecordSink for Vec<OffsetRecord> {
    fn append(&mut self, record: OffsetRecord) -> Result<(), OffsetsError> {
        self.try_reserve(1)?;
        self.push(record);
        Ok(())
    }
}

/// Serializes records as space-separated `"<column> <start> <end>"` triples.
#[derive(Debug, Default)]
pub struct OffsetWriter {
    /// Encoded output so far.
    buf: String,
}

impl OffsetWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no records have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the encoded output.
    pub fn finish(self) -> String {
        self.buf
    }
}

impl RecordSink for OffsetWriter {
    fn append(&mut self, record: OffsetRecord) -> Result<(), OffsetsError> {
        self.buf.try_reserve(MAX_RECORD_LEN)?;
        let sep = if self.buf.is_empty() { "" } else { " " };
        write!(self.buf, "{sep}{record}")
            .map_err(|_| OffsetsError::engine("failed to format offset record"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer_finishes_empty() {
        let writer = OffsetWriter::new();
        assert!(writer.is_empty());
        assert_eq!(writer.finish(), "");
    }

    #[test]
    fn first_record_has_no_leading_space() {
        let mut writer = OffsetWriter::new();
        writer.append(OffsetRecord::new(0, 4, 9)).unwrap();
        assert_eq!(writer.finish(), "0 4 9");
    }

    #[test]
    fn records_are_space_separated() {
        let mut writer = OffsetWriter::new();
        writer.append(OffsetRecord::new(0, 74, 87)).unwrap();
        writer.append(OffsetRecord::new(0, 370, 383)).unwrap();
        assert_eq!(writer.finish(), "0 74 87 0 370 383");
    }

    #[test]
    fn large_values_fit_reservation() {
        let mut writer = OffsetWriter::new();
        writer
            .append(OffsetRecord::new(usize::MAX, usize::MAX, usize::MAX))
            .unwrap();
        let out = writer.finish();
        assert_eq!(out.split(' ').count(), 3);
        assert!(out.len() <= MAX_RECORD_LEN);
    }

    #[test]
    fn vec_sink_collects_records() {
        let mut records: Vec<OffsetRecord> = Vec::new();
        RecordSink::append(&mut records, OffsetRecord::new(1, 0, 3)).unwrap();
        assert_eq!(records, vec![OffsetRecord::new(1, 0, 3)]);
    }
}
