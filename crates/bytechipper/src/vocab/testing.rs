//! # Rank Table Test Utilities

use crate::{
    types::TokenType,
    vocab::{RankTable, SpanTokenMap},
};

/// Build a small prefix-closed span map.
///
/// Bytes `0..=255` get ranks equal to their value; then every prefix of
/// each word (length >= 2), in word order, gets the next free rank.
///
/// ## Arguments
/// * `words` - the words whose prefixes become merged entries.
pub fn build_test_span_map<T: TokenType>(words: &[&str]) -> SpanTokenMap<T> {
    let mut span_map: SpanTokenMap<T> = (0..=255u8)
        .map(|b| (vec![b], T::from_u8(b).unwrap()))
        .collect();

    let mut next = 256usize;
    for word in words {
        let bytes = word.as_bytes();
        for end in 2..=bytes.len() {
            if !span_map.contains_key(&bytes[..end]) {
                span_map.insert(bytes[..end].to_vec(), T::from_usize(next).unwrap());
                next += 1;
            }
        }
    }
    span_map
}

/// Build a small valid [`RankTable`]; see [`build_test_span_map`].
pub fn build_test_rank_table<T: TokenType>(words: &[&str]) -> RankTable<T> {
    RankTable::try_from_span_map(build_test_span_map(words)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_test_rank_table() {
        let table: RankTable<u32> = build_test_rank_table(&["hello", "help"]);
        assert_eq!(table.lookup(b"he"), Some(256));
        assert_eq!(table.lookup(b"hello"), Some(259));
        assert_eq!(table.lookup(b"help"), Some(260));
        assert_eq!(table.max_token(), 260);
    }
}
