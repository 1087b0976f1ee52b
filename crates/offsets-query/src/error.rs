//! Error types for match-expression parsing.

use std::{error, fmt};

use thiserror::Error;

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at byte {position}")]
pub struct LexError {
    /// Error message.
    pub message: String,
    /// Byte position in input where the error occurred.
    pub position: usize,
}

impl LexError {
    /// Creates a new lexer error.
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// Parse error with position information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    /// Error message.
    pub message: String,
    /// Byte position of the offending token, or `None` at end of input.
    pub position: Option<usize>,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(message: impl Into<String>, position: Option<usize>) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// A match expression could not be parsed.
///
/// Displays the query with a caret under the failing position and, for common mistakes, a
/// hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// Error message.
    pub message: String,
    /// Byte position in the query, if known.
    pub position: Option<usize>,
    /// The query that failed to parse.
    pub query: String,
}

impl QueryError {
    /// Creates a query error.
    pub fn new(message: impl Into<String>, position: Option<usize>, query: &str) -> Self {
        Self {
            message: message.into(),
            position,
            query: query.to_string(),
        }
    }

    /// Wraps a lexer error.
    pub fn from_lex(err: LexError, query: &str) -> Self {
        Self::new(err.message, Some(err.position), query)
    }

    /// Wraps a parser error.
    pub fn from_parse(err: ParseError, query: &str) -> Self {
        Self::new(err.message, err.position, query)
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        let message = self.message.as_str();
        if message.contains("unclosed quote") {
            Some("Add a closing quote (\") to complete the phrase")
        } else if message.contains("closing parenthesis") {
            Some("Add a closing parenthesis ) to match the opening one")
        } else if message.contains("OR") {
            Some("OR requires expressions on both sides, e.g., 'fox OR dog'")
        } else if message.contains("after column") {
            Some("A column filter needs a term, phrase, or group, e.g., 'body:fox'")
        } else {
            None
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "query syntax error: {}", self.message)?;
        writeln!(f, "  {}", self.query)?;
        if let Some(pos) = self.position {
            let clamped = pos.min(self.query.len());
            writeln!(f, "  {}^", " ".repeat(clamped))?;
        }
        if let Some(suggestion) = self.suggestion() {
            write!(f, "hint: {suggestion}")?;
        }
        Ok(())
    }
}

impl error::Error for QueryError {}
