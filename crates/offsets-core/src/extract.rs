//! Tokenizer-driven resolution of coalesced spans to byte offsets.

use std::ops::ControlFlow;

use tracing::debug;

use crate::{
    CoalescingIterator, MatchContext, OffsetRecord, OffsetsError, RecordSink, Token, TokenResult,
};

/// Per-call state for the tokenizer handler.
struct Extractor<'c, 's, C: MatchContext + ?Sized, S: RecordSink + ?Sized> {
    /// Coalesced spans for the column, positioned on the span being located.
    spans: CoalescingIterator<'c, C>,
    /// Destination for resolved records.
    sink: &'s mut S,
    /// Position the next primary token will take.
    position: usize,
    /// Start byte of the current span's first token.
    phrase_start: usize,
    /// Records emitted so far.
    records: usize,
}

impl<C: MatchContext + ?Sized, S: RecordSink + ?Sized> Extractor<'_, '_, C, S> {
    /// Handles one token, emitting a record when the token closes the current span.
    fn on_token(&mut self, token: &Token<'_>) -> TokenResult {
        // Co-located tokens share the previous token's position.
        if token.is_colocated() {
            return Ok(ControlFlow::Continue(()));
        }

        let position = self.position;
        self.position += 1;

        let Some(span) = self.spans.current() else {
            return Ok(ControlFlow::Break(()));
        };

        if position == span.start {
            self.phrase_start = token.offsets.start;
        }

        if position == span.end {
            self.sink.append(OffsetRecord::new(
                self.spans.column(),
                self.phrase_start,
                token.offsets.end,
            ))?;
            self.records += 1;
            if self.spans.advance()?.is_none() {
                return Ok(ControlFlow::Break(()));
            }
        }

        Ok(ControlFlow::Continue(()))
    }
}

/// Resolves every coalesced span in `column` to a byte range in `text` and appends the
/// resulting records to `sink`.
///
/// `text` must be the text the host reports for `column`. Tokenization stops as soon as the
/// last span is resolved. Spans the tokenizer never reaches produce no record. Returns the
/// number of records written.
pub fn extract<C, S>(
    ctx: &C,
    column: usize,
    text: &str,
    sink: &mut S,
) -> Result<usize, OffsetsError>
where
    C: MatchContext + ?Sized,
    S: RecordSink + ?Sized,
{
    let spans = CoalescingIterator::new(ctx, column)?;
    if spans.current().is_none() {
        debug!(column, "no phrase instances in column");
        return Ok(0);
    }

    let mut extractor = Extractor {
        spans,
        sink,
        position: 0,
        phrase_start: 0,
        records: 0,
    };
    ctx.tokenize(text, &mut |token: Token<'_>| extractor.on_token(&token))?;

    debug!(
        column,
        records = extractor.records,
        tokens = extractor.position,
        "extracted phrase offsets"
    );
    Ok(extractor.records)
}
