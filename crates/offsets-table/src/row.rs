//! A matching row, exposed to offset extraction through `MatchContext`.

use std::sync::Arc;

use offsets_core::{MatchContext, OffsetsError, PhraseInstance, Token, TokenFlags, TokenResult};

use crate::Table;

/// One row returned by [`Table::search`], with the phrase instances found in it.
#[derive(Clone)]
pub struct RowMatch<'t> {
    /// Table the row belongs to.
    table: &'t Table,
    /// Row id within the table.
    row: usize,
    /// Token count of each query phrase, by phrase id.
    phrase_lens: Arc<[usize]>,
    /// Instances of non-negated phrases, ordered by column, start token, then phrase.
    instances: Vec<PhraseInstance>,
}

impl<'t> RowMatch<'t> {
    /// Creates a match for `row`.
    pub(crate) fn new(
        table: &'t Table,
        row: usize,
        phrase_lens: Arc<[usize]>,
        instances: Vec<PhraseInstance>,
    ) -> Self {
        Self {
            table,
            row,
            phrase_lens,
            instances,
        }
    }

    /// Returns the row id.
    pub fn row_id(&self) -> usize {
        self.row
    }

    /// Returns the row's column values.
    pub fn values(&self) -> &'t [String] {
        self.table.row(self.row).unwrap_or_default()
    }

    /// Returns the phrase instances found in the row.
    pub fn instances(&self) -> &[PhraseInstance] {
        &self.instances
    }
}

impl MatchContext for RowMatch<'_> {
    fn instance_count(&self) -> Result<usize, OffsetsError> {
        Ok(self.instances.len())
    }

    fn instance(&self, index: usize) -> Result<PhraseInstance, OffsetsError> {
        self.instances.get(index).copied().ok_or_else(|| {
            OffsetsError::engine(format!(
                "instance {index} out of range ({} instances)",
                self.instances.len()
            ))
        })
    }

    fn phrase_len(&self, phrase: usize) -> usize {
        self.phrase_lens.get(phrase).copied().unwrap_or(0)
    }

    fn column_text(&self, column: usize) -> Result<Option<&str>, OffsetsError> {
        Ok(self.values().get(column).map(String::as_str))
    }

    fn tokenize(
        &self,
        text: &str,
        on_token: &mut dyn FnMut(Token<'_>) -> TokenResult,
    ) -> Result<(), OffsetsError> {
        self.table.analyzer().each_token(text, |token| {
            let flags = if token.colocated {
                TokenFlags::COLOCATED
            } else {
                TokenFlags::empty()
            };
            on_token(Token::new(&token.text, flags, token.offsets.clone()))
        })
    }
}
