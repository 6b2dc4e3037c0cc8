//! # Span Encoder Trait

use crate::{types::TokenType, vocab::RankTable};

/// Byte-pair merging of a single chunk.
///
/// Implementations own reusable scratch memory, hence `&mut self`;
/// the output depends only on the table and the span.
pub trait SpanEncoder<T: TokenType>: Send {
    /// Merge `span` from single bytes and append the resulting tokens.
    ///
    /// Repeatedly merges the adjacent pair whose concatenation has the lowest
    /// rank (leftmost on ties) until no adjacent pair is an entry.
    ///
    /// ## Arguments
    /// * `table` - the rank table.
    /// * `span` - the chunk bytes.
    /// * `tokens` - the target token buffer to append to.
    fn encode_append_compound_span(
        &mut self,
        table: &RankTable<T>,
        span: &[u8],
        tokens: &mut Vec<T>,
    );

    /// Encode a chunk, emitting a whole-chunk entry directly.
    ///
    /// ## Arguments
    /// * `table` - the rank table.
    /// * `span` - the chunk bytes.
    /// * `tokens` - the target token buffer to append to.
    fn encode_append_span(
        &mut self,
        table: &RankTable<T>,
        span: &[u8],
        tokens: &mut Vec<T>,
    ) {
        match table.lookup(span) {
            Some(token) => tokens.push(token),
            None => self.encode_append_compound_span(table, span, tokens),
        }
    }
}
