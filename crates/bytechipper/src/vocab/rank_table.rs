//! # Rank Table
//!
//! The byte-sequence → rank mapping that drives byte-pair merging.
//! A sequence's rank is also its token id.

use crate::{
    errors::{BCError, BCResult},
    support::strings::describe_bytes,
    types::{BCHashMap, TokenType},
};

/// Map of byte sequences to tokens.
pub type SpanTokenMap<T> = BCHashMap<Vec<u8>, T>;

/// A validated, immutable rank table.
///
/// Guarantees:
/// * every single byte `0..=255` has a rank;
/// * ranks are unique;
/// * every entry longer than one byte splits into two shorter entries.
#[derive(Debug, Clone, PartialEq)]
pub struct RankTable<T: TokenType> {
    span_map: SpanTokenMap<T>,
    byte_tokens: [T; 256],
    max_token: T,
}

impl<T: TokenType> TryFrom<SpanTokenMap<T>> for RankTable<T> {
    type Error = BCError;

    fn try_from(span_map: SpanTokenMap<T>) -> BCResult<Self> {
        Self::try_from_span_map(span_map)
    }
}

impl<T: TokenType> RankTable<T> {
    /// Validate and wrap a span map.
    ///
    /// ## Arguments
    /// * `span_map` - the `{ bytes -> rank }` entries.
    ///
    /// ## Returns
    /// A `Result<RankTable<T>>`; any violated guarantee is a `BrokenRankTable` error.
    /// Checks run in a fixed order over rank-sorted entries, so the reported
    /// violation is deterministic.
    pub fn try_from_span_map(span_map: SpanTokenMap<T>) -> BCResult<Self> {
        let mut byte_tokens = [T::zero(); 256];
        for (b, slot) in byte_tokens.iter_mut().enumerate() {
            let byte = [b as u8];
            *slot = span_map.get(byte.as_slice()).copied().ok_or_else(|| {
                BCError::BrokenRankTable(format!("missing single byte {b:#04x}"))
            })?;
        }

        let mut entries: Vec<(&Vec<u8>, T)> = span_map.iter().map(|(k, &v)| (k, v)).collect();
        entries.sort_by(|a, b| (a.1, a.0).cmp(&(b.1, b.0)));

        for pair in entries.windows(2) {
            if pair[0].1 == pair[1].1 {
                return Err(BCError::BrokenRankTable(format!(
                    "rank {} is shared by {} and {}",
                    pair[0].1,
                    describe_bytes(pair[0].0),
                    describe_bytes(pair[1].0),
                )));
            }
        }

        for &(span, rank) in &entries {
            if span.len() > 1
                && !(1..span.len()).any(|i| {
                    span_map.contains_key(&span[..i]) && span_map.contains_key(&span[i..])
                })
            {
                return Err(BCError::BrokenRankTable(format!(
                    "entry {} (rank {rank}) is not the merge of two entries",
                    describe_bytes(span),
                )));
            }
        }

        let max_token = entries.last().map(|e| e.1).unwrap_or_default();

        Ok(Self {
            span_map,
            byte_tokens,
            max_token,
        })
    }

    /// The underlying span map.
    pub fn span_map(&self) -> &SpanTokenMap<T> {
        &self.span_map
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.span_map.len()
    }

    /// Always `false`; a valid table holds at least the 256 bytes.
    pub fn is_empty(&self) -> bool {
        self.span_map.is_empty()
    }

    /// The largest rank.
    pub fn max_token(&self) -> T {
        self.max_token
    }

    /// The rank of a single byte.
    pub fn byte_token(
        &self,
        byte: u8,
    ) -> T {
        self.byte_tokens[byte as usize]
    }

    /// The rank of `span`, if it is an entry.
    pub fn lookup(
        &self,
        span: &[u8],
    ) -> Option<T> {
        self.span_map.get(span).copied()
    }

    /// Iterate over `(bytes, rank)` entries, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], T)> {
        self.span_map.iter().map(|(k, &v)| (k.as_slice(), v))
    }
}
