//! In-memory full-text table for offsets.
//!
//! This crate is a small search host: it stores rows of text in named columns, evaluates
//! match expressions against them, and exposes each matching row as a
//! [`offsets_core::MatchContext`]. It handles:
//! - Text analysis with configurable stemming and synonyms
//! - Phrase matching at token positions, with column filters and negation
//! - Instance ordering suitable for offset coalescing
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use offsets_config::AnalyzerSettings;
//! use offsets_core::{Value, offsets};
//! use offsets_table::{Analyzer, Table};
//!
//! let analyzer = Analyzer::new(&AnalyzerSettings::default(), &BTreeMap::new()).unwrap();
//! let mut table = Table::new(vec!["body".to_string()], analyzer).unwrap();
//! table.insert(vec!["the quick brown fox".to_string()]).unwrap();
//!
//! let matches = table.search("quick brown").unwrap();
//! assert_eq!(offsets(&matches[0], &[Value::Integer(0)]).unwrap(), "0 4 9 0 10 15");
//! ```

#![warn(missing_docs)]

mod analyzer;
mod error;
mod row;
mod table;

pub use analyzer::{AnalyzedToken, Analyzer, build_text_analyzer, parse_language};
pub use error::TableError;
pub use row::RowMatch;
pub use table::Table;
