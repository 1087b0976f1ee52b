//! Match expressions for the offsets reference host.
//!
//! A match expression selects rows and names the phrases whose instances are reported:
//!
//! - **Terms**: `fox` - a one-token phrase that must appear
//! - **Phrases**: `"quick brown"` - tokens that must appear consecutively
//! - **Negation**: `-lazy` - the row must NOT contain this
//! - **OR**: `fox OR dog` - alternatives
//! - **Grouping**: `(a b) OR (c d)` - precedence control
//! - **Columns**: `body:fox` - restrict an expression to one column
//!
//! # Example
//!
//! ```
//! use offsets_query::parse;
//!
//! let expr = parse("body:\"quick brown\" (fox OR dog) -lazy").unwrap().unwrap();
//! let phrases = expr.phrases();
//! assert_eq!(phrases.len(), 4);
//! assert_eq!(phrases[0].column.as_deref(), Some("body"));
//! assert!(phrases[3].negated);
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::{QueryExpr, QueryPhrase};
pub use error::{LexError, ParseError, QueryError};
pub use lexer::{Spanned, Token, tokenize};
pub use parser::parse;
