//! The interface a full-text search host provides for one matching row.

use std::ops::{ControlFlow, Range};

use bitflags::bitflags;

use crate::OffsetsError;

/// Result returned by a per-token handler.
///
/// `ControlFlow::Break` asks the tokenizer to stop early; this is not an error.
pub type TokenResult = Result<ControlFlow<()>, OffsetsError>;

/// One occurrence of a matched query phrase in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseInstance {
    /// Index of the query phrase that matched.
    pub phrase: usize,
    /// Column the instance was found in.
    pub column: usize,
    /// Token position of the phrase's first token.
    pub start_token: usize,
}

impl PhraseInstance {
    /// Creates a phrase instance.
    pub fn new(phrase: usize, column: usize, start_token: usize) -> Self {
        Self {
            phrase,
            column,
            start_token,
        }
    }
}

bitflags! {
    /// Flags attached to a token by the tokenizer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TokenFlags: u32 {
        /// The token is a synonym or variant sharing the previous token's position.
        const COLOCATED = 0x0001;
    }
}

/// A token reported by the host tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Normalized token text.
    pub text: &'a str,
    /// Tokenizer flags.
    pub flags: TokenFlags,
    /// Byte range of the token in the source text.
    pub offsets: Range<usize>,
}

impl<'a> Token<'a> {
    /// Creates a token.
    pub fn new(text: &'a str, flags: TokenFlags, offsets: Range<usize>) -> Self {
        Self {
            text,
            flags,
            offsets,
        }
    }

    /// Returns true if this token shares its position with the preceding primary token.
    pub fn is_colocated(&self) -> bool {
        self.flags.contains(TokenFlags::COLOCATED)
    }
}

/// Access to the match data for a single query result row.
///
/// Implemented by the search host. Instances are indexed `0..instance_count()` and, within any
/// one column, must be ordered by non-decreasing start token.
pub trait MatchContext {
    /// Returns the total number of phrase instances in the row, across all columns.
    fn instance_count(&self) -> Result<usize, OffsetsError>;

    /// Returns the instance at `index`.
    fn instance(&self, index: usize) -> Result<PhraseInstance, OffsetsError>;

    /// Returns the number of tokens in query phrase `phrase`.
    fn phrase_len(&self, phrase: usize) -> usize;

    /// Returns the text of `column`, or `None` if the row has no such column.
    fn column_text(&self, column: usize) -> Result<Option<&str>, OffsetsError>;

    /// Tokenizes `text`, calling `on_token` once per token in document order.
    ///
    /// Implementations must stop and return `Ok(())` when the handler breaks, and propagate
    /// any handler error unchanged.
    fn tokenize(
        &self,
        text: &str,
        on_token: &mut dyn FnMut(Token<'_>) -> TokenResult,
    ) -> Result<(), OffsetsError>;
}
