//! Coalesced phrase offsets for full-text match results.
//!
//! Given one matching row of a full-text query, this crate reports where each matched phrase
//! occurs in a column's text as byte ranges. Phrase instances whose token ranges share a
//! token are coalesced into a single range, so a renderer can highlight them in one pass.
//!
//! The search host is abstracted behind [`MatchContext`]: it supplies the phrase instances for
//! the row, the column text, and a tokenizer. The work happens in two stages:
//!
//! 1. [`CoalescingIterator`] walks the row's instances for one column and yields merged
//!    token spans.
//! 2. [`extract`] tokenizes the column text, tracks token positions, and resolves each span
//!    to a byte range as the tokenizer passes its first and last token.
//!
//! Records are written as space-separated `"<column> <start> <end>"` triples by
//! [`OffsetWriter`], or collected as [`OffsetRecord`] values.
//!
//! # Example
//!
//! ```
//! use offsets_core::{Value, offsets};
//! # use std::ops::ControlFlow;
//! # use offsets_core::{MatchContext, OffsetsError, PhraseInstance, Token, TokenFlags};
//! # struct Row;
//! # impl MatchContext for Row {
//! #     fn instance_count(&self) -> Result<usize, OffsetsError> { Ok(1) }
//! #     fn instance(&self, _: usize) -> Result<PhraseInstance, OffsetsError> {
//! #         Ok(PhraseInstance::new(0, 0, 1))
//! #     }
//! #     fn phrase_len(&self, _: usize) -> usize { 1 }
//! #     fn column_text(&self, column: usize) -> Result<Option<&str>, OffsetsError> {
//! #         Ok((column == 0).then_some("the quick brown fox"))
//! #     }
//! #     fn tokenize(
//! #         &self,
//! #         text: &str,
//! #         on_token: &mut dyn FnMut(Token<'_>) -> Result<ControlFlow<()>, OffsetsError>,
//! #     ) -> Result<(), OffsetsError> {
//! #         let mut start = 0;
//! #         for word in text.split(' ') {
//! #             let token = Token::new(word, TokenFlags::empty(), start..start + word.len());
//! #             if on_token(token)?.is_break() {
//! #                 break;
//! #             }
//! #             start += word.len() + 1;
//! #         }
//! #         Ok(())
//! #     }
//! # }
//!
//! // `Row` is a host implementation of `MatchContext` where "quick" matched at token 1.
//! let out = offsets(&Row, &[Value::Integer(0)]).unwrap();
//! assert_eq!(out, "0 4 9");
//! ```

#![warn(missing_docs)]

mod coalesce;
mod context;
mod driver;
mod error;
mod extract;
#[cfg(test)]
mod test_support;
mod writer;

pub use coalesce::{CoalescedSpan, CoalescingIterator};
pub use context::{MatchContext, PhraseInstance, Token, TokenFlags, TokenResult};
pub use driver::{Value, column_arg, offset_records, offsets};
pub use error::OffsetsError;
pub use extract::extract;
pub use writer::{OffsetRecord, OffsetWriter, RecordSink};
