//! # Dictionary ``{ T -> Vec<u8> }`` Token Decoder

use crate::{
    decoders::TokenDecoder,
    errors::{BCError, BCResult},
    types::{BCHashMap, TokenType},
    vocab::{RankTable, SpecialVocab},
};

/// Token to byte sequence map.
pub type TokenToBytesMap<T> = BCHashMap<T, Vec<u8>>;

/// A hash-map backed [`TokenDecoder<T>`].
///
/// Covers both rank-table entries and special tokens; ids may be sparse.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryDecoder<T: TokenType> {
    token_to_bytes: TokenToBytesMap<T>,
}

impl<T: TokenType> DictionaryDecoder<T> {
    /// Build the inverse table of a rank table and its specials.
    ///
    /// ## Arguments
    /// * `table` - the rank table.
    /// * `specials` - the special tokens.
    ///
    /// ## Returns
    /// A `Result<DictionaryDecoder<T>>`; `VocabConflict` if any id is
    /// mapped twice.
    pub fn try_from_parts(
        table: &RankTable<T>,
        specials: &SpecialVocab<T>,
    ) -> BCResult<Self> {
        let entries = table.iter().chain(
            specials
                .entries()
                .iter()
                .map(|(word, token)| (word.as_bytes(), *token)),
        );

        let mut token_to_bytes: TokenToBytesMap<T> = Default::default();
        token_to_bytes.reserve(table.len() + specials.len());
        for (bytes, token) in entries {
            if token_to_bytes.insert(token, bytes.to_vec()).is_some() {
                return Err(BCError::VocabConflict(format!(
                    "token id {token} is mapped more than once"
                )));
            }
        }

        Ok(Self { token_to_bytes })
    }

    /// Number of mapped ids.
    pub fn len(&self) -> usize {
        self.token_to_bytes.len()
    }

    /// Are no ids mapped?
    pub fn is_empty(&self) -> bool {
        self.token_to_bytes.is_empty()
    }

    /// The bytes of a single token.
    pub fn token_bytes(
        &self,
        token: T,
    ) -> Option<&[u8]> {
        self.token_to_bytes.get(&token).map(Vec::as_slice)
    }
}

impl<T: TokenType> TokenDecoder<T> for DictionaryDecoder<T> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tokens, buf)))]
    fn try_decode_append_bytes(
        &self,
        tokens: &[T],
        buf: &mut Vec<u8>,
    ) -> BCResult<()> {
        for &token in tokens {
            let bytes = self.token_bytes(token).ok_or_else(|| BCError::UnknownTokenId {
                token: token.to_u64().unwrap_or(u64::MAX),
            })?;
            buf.extend_from_slice(bytes);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::testing::build_test_rank_table;

    fn decoder() -> DictionaryDecoder<u32> {
        let table = build_test_rank_table::<u32>(&["hi"]);
        let specials: SpecialVocab<u32> = [("<|end|>", 300u32)].into_iter().collect();
        DictionaryDecoder::try_from_parts(&table, &specials).unwrap()
    }

    #[test]
    fn test_decode() {
        let decoder = decoder();
        assert_eq!(decoder.token_bytes(256), Some(b"hi".as_slice()));
        assert_eq!(decoder.token_bytes(257), None);
        assert_eq!(
            decoder.try_decode_to_string(&[256, b'!' as u32, 300]).unwrap(),
            "hi!<|end|>"
        );
        assert_eq!(
            decoder.try_decode_batch_to_strings(&[vec![256], vec![]]).unwrap(),
            vec!["hi".to_string(), String::new()]
        );
    }

    #[test]
    fn test_decode_errors() {
        let decoder = decoder();
        assert!(matches!(
            decoder.try_decode_to_bytes(&[256, 999_999_999]),
            Err(BCError::UnknownTokenId { token: 999_999_999 })
        ));
        assert!(matches!(
            decoder.try_decode_to_string(&[0xff]),
            Err(BCError::Decode(_))
        ));
        assert_eq!(
            decoder.try_decode_to_string_lossy(&[b'a' as u32, 0xff]).unwrap(),
            "a\u{fffd}"
        );
    }

    #[test]
    fn test_sparse_special_ids() {
        let table = build_test_rank_table::<u32>(&["hi"]);
        let specials: SpecialVocab<u32> = [("<|far|>", 4_000_000_000u32)].into_iter().collect();
        let decoder = DictionaryDecoder::try_from_parts(&table, &specials).unwrap();
        assert_eq!(decoder.len(), 258);
        assert!(!decoder.is_empty());
        assert_eq!(
            decoder.try_decode_to_string(&[256, 4_000_000_000]).unwrap(),
            "hi<|far|>"
        );
        assert_eq!(decoder.token_bytes(3_999_999_999), None);
    }

    #[test]
    fn test_conflicting_ids() {
        let table = build_test_rank_table::<u32>(&[]);
        let specials: SpecialVocab<u32> = [("<|x|>", 65u32)].into_iter().collect();
        assert!(matches!(
            DictionaryDecoder::try_from_parts(&table, &specials),
            Err(BCError::VocabConflict(_))
        ));
    }
}
