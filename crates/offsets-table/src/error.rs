//! Error types for the offsets-table crate.

use offsets_core::OffsetsError;
use offsets_query::QueryError;
use thiserror::Error;

/// Errors that can occur when building or searching a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// Invalid stemmer language.
    #[error("unsupported stemmer language: {0}")]
    InvalidLanguage(String),

    /// A table needs at least one column.
    #[error("table has no columns")]
    NoColumns,

    /// Two columns share a name.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A column filter names a column the table does not have.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// A row does not have one value per column.
    #[error("row has {actual} values but the table has {expected} columns")]
    RowWidth {
        /// Number of columns in the table.
        expected: usize,
        /// Number of values in the row.
        actual: usize,
    },

    /// The match expression could not be parsed.
    #[error("{0}")]
    Query(#[from] QueryError),

    /// Offset extraction failed.
    #[error(transparent)]
    Offsets(#[from] OffsetsError),
}
