//! Test helpers shared across offsets-core unit tests.
//!
//! Kept behind `cfg(test)` to avoid leaking into the public API surface.

use std::{cell::Cell, ops::ControlFlow};

use crate::{MatchContext, OffsetsError, PhraseInstance, Token, TokenFlags, TokenResult};

/// A fixed match context backed by in-memory vectors.
///
/// Columns are tokenized on ASCII spaces. A word written as `primary|syn1|syn2` produces the
/// primary token followed by co-located synonym tokens covering the same bytes.
#[derive(Debug, Default)]
pub struct StaticContext {
    /// Phrase token lengths, indexed by phrase id.
    pub phrase_lens: Vec<usize>,
    /// Instances in host order.
    pub instances: Vec<PhraseInstance>,
    /// Column texts.
    pub columns: Vec<String>,
    /// Instance index at which `instance()` starts failing.
    pub fail_instance_at: Option<usize>,
    /// Fail tokenization after this many tokens.
    pub fail_tokenize_after: Option<usize>,
    /// Drop co-located variants instead of reporting them.
    pub strip_colocated: bool,
    /// Number of tokens delivered by the last `tokenize` call.
    pub delivered: Cell<usize>,
}

impl StaticContext {
    /// Creates a context with the given column texts.
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Registers a phrase of `len` tokens and returns its id.
    pub fn phrase(&mut self, len: usize) -> usize {
        self.phrase_lens.push(len);
        self.phrase_lens.len() - 1
    }

    /// Appends an instance of `phrase` in `column` at `start`.
    pub fn add_instance(&mut self, phrase: usize, column: usize, start: usize) -> &mut Self {
        self.instances
            .push(PhraseInstance::new(phrase, column, start));
        self
    }
}

impl MatchContext for StaticContext {
    fn instance_count(&self) -> Result<usize, OffsetsError> {
        Ok(self.instances.len())
    }

    fn instance(&self, index: usize) -> Result<PhraseInstance, OffsetsError> {
        if self.fail_instance_at.is_some_and(|at| index >= at) {
            return Err(OffsetsError::engine("instance lookup failed"));
        }
        self.instances
            .get(index)
            .copied()
            .ok_or_else(|| OffsetsError::engine(format!("no instance {index}")))
    }

    fn phrase_len(&self, phrase: usize) -> usize {
        self.phrase_lens.get(phrase).copied().unwrap_or(0)
    }

    fn column_text(&self, column: usize) -> Result<Option<&str>, OffsetsError> {
        Ok(self.columns.get(column).map(String::as_str))
    }

    fn tokenize(
        &self,
        text: &str,
        on_token: &mut dyn FnMut(Token<'_>) -> TokenResult,
    ) -> Result<(), OffsetsError> {
        self.delivered.set(0);
        let mut start = 0;
        for word in text.split(' ') {
            let end = start + word.len();
            if !word.is_empty() {
                for (i, variant) in word.split('|').enumerate() {
                    if i > 0 && self.strip_colocated {
                        break;
                    }
                    if self
                        .fail_tokenize_after
                        .is_some_and(|n| self.delivered.get() >= n)
                    {
                        return Err(OffsetsError::engine("tokenizer failed"));
                    }
                    let flags = if i == 0 {
                        TokenFlags::empty()
                    } else {
                        TokenFlags::COLOCATED
                    };
                    self.delivered.set(self.delivered.get() + 1);
                    if let ControlFlow::Break(()) = on_token(Token::new(variant, flags, start..end))? {
                        return Ok(());
                    }
                }
            }
            start = end + 1;
        }
        Ok(())
    }
}
