//! # Merge-scan [`SpanEncoder`]
//!
//! Rescans every adjacent pair after each merge; O(n^2) per chunk.

use crate::{encoders::span_encoders::SpanEncoder, types::TokenType, vocab::RankTable};

/// The reference [`SpanEncoder`].
///
/// Keeps `(start, token)` parts; each pass merges the leftmost pair with the
/// lowest rank.
#[derive(Debug, Clone)]
pub struct MergeScanSpanEncoder<T: TokenType> {
    parts: Vec<(usize, T)>,
}

impl<T: TokenType> Default for MergeScanSpanEncoder<T> {
    fn default() -> Self {
        Self { parts: Vec::new() }
    }
}

impl<T: TokenType> MergeScanSpanEncoder<T> {
    fn pair_rank(
        &self,
        table: &RankTable<T>,
        span: &[u8],
        i: usize,
    ) -> Option<T> {
        let start = self.parts[i].0;
        let end = match self.parts.get(i + 2) {
            Some(&(end, _)) => end,
            None => span.len(),
        };
        table.lookup(&span[start..end])
    }
}

impl<T: TokenType> SpanEncoder<T> for MergeScanSpanEncoder<T> {
    fn encode_append_compound_span(
        &mut self,
        table: &RankTable<T>,
        span: &[u8],
        tokens: &mut Vec<T>,
    ) {
        self.parts.clear();
        self.parts
            .extend(span.iter().enumerate().map(|(i, &b)| (i, table.byte_token(b))));

        loop {
            let mut best: Option<(T, usize)> = None;
            for i in 0..self.parts.len().saturating_sub(1) {
                if let Some(rank) = self.pair_rank(table, span, i)
                    && best.is_none_or(|(r, _)| rank < r)
                {
                    best = Some((rank, i));
                }
            }

            match best {
                Some((rank, i)) => {
                    self.parts[i].1 = rank;
                    self.parts.remove(i + 1);
                }
                None => break,
            }
        }

        tokens.extend(self.parts.iter().map(|&(_, token)| token));
    }
}
