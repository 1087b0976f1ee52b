//! Error types for offset extraction.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur while extracting phrase offsets.
#[derive(Debug, Error)]
pub enum OffsetsError {
    /// The function was called with the wrong number or type of arguments.
    #[error("{0}")]
    Usage(String),

    /// The search host failed to supply instances, column text, or tokens.
    #[error("search engine error: {0}")]
    Engine(String),

    /// The output buffer could not grow.
    #[error("out of memory while building offsets")]
    OutOfMemory(#[from] TryReserveError),

    /// The host supplied a column's phrase instances out of token order.
    #[error("phrase instance {index} in column {column} starts before the previous instance")]
    UnorderedInstances {
        /// Column being extracted.
        column: usize,
        /// Index of the offending instance in the row's instance list.
        index: usize,
    },
}

impl OffsetsError {
    /// Creates a `Usage` error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Creates an `Engine` error from any displayable host failure.
    pub fn engine(source: impl ToString) -> Self {
        Self::Engine(source.to_string())
    }
}
