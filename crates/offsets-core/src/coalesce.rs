//! Iteration over coalesced phrase instances in one column.
//!
//! If the phrase instances in a column do not overlap, the iterator yields them one by one.
//! Instances that share tokens, or that start on the last token of the running span, are
//! merged and reported as a single span.

use tracing::trace;

use crate::{MatchContext, OffsetsError};

/// A merged token range covering one or more phrase instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoalescedSpan {
    /// First token of the span.
    pub start: usize,
    /// Last token of the span (inclusive).
    pub end: usize,
}

impl CoalescedSpan {
    /// Creates a span covering tokens `start..=end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span must not end before it starts");
        Self { start, end }
    }
}

/// Walks a row's phrase instances and yields coalesced spans for a single column.
///
/// The cursor runs over the full instance list; instances in other columns are skipped.
/// Each extraction owns its own iterator, so columns are processed independently.
pub struct CoalescingIterator<'a, C: MatchContext + ?Sized> {
    /// Host match data.
    ctx: &'a C,
    /// Column to report spans for.
    column: usize,
    /// Index of the next instance to examine.
    next: usize,
    /// Total number of instances in the row.
    count: usize,
    /// Start token of the most recently consumed instance in `column`.
    last_start: Option<usize>,
    /// Span the iterator is positioned on, or `None` once exhausted.
    current: Option<CoalescedSpan>,
}

impl<'a, C: MatchContext + ?Sized> CoalescingIterator<'a, C> {
    /// Creates an iterator for `column`, positioned on its first span.
    pub fn new(ctx: &'a C, column: usize) -> Result<Self, OffsetsError> {
        let count = ctx.instance_count()?;
        let mut iter = Self {
            ctx,
            column,
            next: 0,
            count,
            last_start: None,
            current: None,
        };
        iter.advance()?;
        Ok(iter)
    }

    /// Returns the column this iterator reports on.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the current span, or `None` if no spans remain.
    pub fn current(&self) -> Option<CoalescedSpan> {
        self.current
    }

    /// Moves to the next coalesced span and returns it.
    ///
    /// The first instance that does not overlap the running span is left unconsumed and opens
    /// the following span.
    pub fn advance(&mut self) -> Result<Option<CoalescedSpan>, OffsetsError> {
        let mut span: Option<CoalescedSpan> = None;

        while self.next < self.count {
            let instance = self.ctx.instance(self.next)?;
            if instance.column == self.column {
                if self
                    .last_start
                    .is_some_and(|prev| instance.start_token < prev)
                {
                    return Err(OffsetsError::UnorderedInstances {
                        column: self.column,
                        index: self.next,
                    });
                }

                // Zero-token phrases never line up with a token; skip them.
                let len = self.ctx.phrase_len(instance.phrase);
                if len > 0 {
                    let end = instance.start_token.checked_add(len - 1).ok_or_else(|| {
                        OffsetsError::engine(format!(
                            "phrase instance {} ends past the last token position",
                            self.next
                        ))
                    })?;
                    match span.as_mut() {
                        None => span = Some(CoalescedSpan::new(instance.start_token, end)),
                        Some(running) if instance.start_token <= running.end => {
                            running.end = running.end.max(end);
                        }
                        Some(_) => break,
                    }
                }
                self.last_start = Some(instance.start_token);
            }
            self.next += 1;
        }

        if let Some(span) = span {
            trace!(column = self.column, start = span.start, end = span.end, "coalesced span");
        }
        self.current = span;
        Ok(span)
    }
}
