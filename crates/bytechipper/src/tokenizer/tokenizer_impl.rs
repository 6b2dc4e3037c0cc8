//! # Tokenizer

use std::sync::Arc;

use crate::{
    decoders::{DictionaryDecoder, TokenDecoder},
    encoders::{TokenEncoder, TokenSpanEncoder},
    errors::{BCError, BCResult},
    segmentation::SpecialPolicy,
    support::strings::describe_bytes,
    types::TokenType,
    vocab::{RankTable, SpecialVocab},
};

/// The end-of-text special token literal.
pub const ENDOFTEXT: &str = "<|endoftext|>";

/// A complete encoder/decoder for one scheme.
///
/// Immutable after construction and `Send + Sync`; share it via `Arc`.
#[derive(Debug)]
pub struct Tokenizer<T: TokenType> {
    name: String,
    encoder: TokenSpanEncoder<T>,
    decoder: DictionaryDecoder<T>,
}

impl<T: TokenType> Tokenizer<T> {
    /// Assemble a tokenizer.
    ///
    /// Most callers want [`crate::TokenizerOptions::build`].
    pub fn new(
        name: String,
        encoder: TokenSpanEncoder<T>,
        decoder: DictionaryDecoder<T>,
    ) -> Self {
        Self {
            name,
            encoder,
            decoder,
        }
    }

    /// The scheme name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The split pattern source.
    pub fn pattern_str(&self) -> &str {
        self.encoder.segmentor().segmenter().pattern().as_str()
    }

    /// The encoder.
    pub fn encoder(&self) -> &TokenSpanEncoder<T> {
        &self.encoder
    }

    /// The decoder.
    pub fn decoder(&self) -> &DictionaryDecoder<T> {
        &self.decoder
    }

    /// The rank table.
    pub fn rank_table(&self) -> &Arc<RankTable<T>> {
        self.encoder.table()
    }

    /// The special tokens.
    pub fn special_vocab(&self) -> &SpecialVocab<T> {
        self.encoder.special_vocab()
    }

    /// `(literal, id)` special tokens, in declaration order.
    pub fn special_tokens(&self) -> &[(String, T)] {
        self.special_vocab().entries()
    }

    /// The largest token id, rank or special.
    pub fn max_token_value(&self) -> T {
        let max_rank = self.rank_table().max_token();
        self.special_vocab()
            .max_token()
            .map_or(max_rank, |m| m.max(max_rank))
    }

    /// One past [`Self::max_token_value`].
    pub fn n_vocab(&self) -> usize {
        self.max_token_value().to_usize().map_or(usize::MAX, |m| m + 1)
    }

    /// The id of `<|endoftext|>`, if the scheme has it.
    pub fn eot_token(&self) -> Option<T> {
        self.special_vocab().lookup_token(ENDOFTEXT.as_bytes())
    }

    /// Every rank-table byte sequence, sorted.
    pub fn token_byte_values(&self) -> Vec<Vec<u8>> {
        let mut values: Vec<Vec<u8>> = self
            .rank_table()
            .iter()
            .map(|(bytes, _)| bytes.to_vec())
            .collect();
        values.sort();
        values
    }

    /// Encode text under a special-token policy.
    ///
    /// ## Arguments
    /// * `text` - the text to encode.
    /// * `policy` - which special literals become special ids.
    ///
    /// ## Returns
    /// `DisallowedSpecialToken` if a disallowed literal occurs in `text`;
    /// `MatchTimeout` on pathological input.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text, policy)))]
    pub fn encode(
        &self,
        text: &str,
        policy: &SpecialPolicy,
    ) -> BCResult<Vec<T>> {
        self.encoder.try_encode(text, policy)
    }

    /// Encode text, treating special literals as ordinary text.
    pub fn encode_ordinary(
        &self,
        text: &str,
    ) -> BCResult<Vec<T>> {
        self.encode(text, &SpecialPolicy::ordinary())
    }

    /// Encode text, mapping every special literal to its id.
    pub fn encode_with_special_tokens(
        &self,
        text: &str,
    ) -> BCResult<Vec<T>> {
        self.encode(text, &SpecialPolicy::allow_all())
    }

    /// Encode a batch of texts; parallel with the "rayon" feature.
    pub fn encode_batch<S>(
        &self,
        batch: &[S],
        policy: &SpecialPolicy,
    ) -> BCResult<Vec<Vec<T>>>
    where
        S: AsRef<str> + Sync,
    {
        self.encoder.try_encode_batch(batch, policy)
    }

    /// Number of tokens `text` encodes to under the default policy.
    pub fn token_count(
        &self,
        text: &str,
    ) -> BCResult<usize> {
        Ok(self.encode(text, &SpecialPolicy::default())?.len())
    }

    /// The id of a byte sequence that is exactly one token.
    ///
    /// ## Returns
    /// `UnknownToken` if `bytes` is neither a rank entry nor a special literal.
    pub fn encode_single_token(
        &self,
        bytes: &[u8],
    ) -> BCResult<T> {
        self.rank_table()
            .lookup(bytes)
            .or_else(|| self.special_vocab().lookup_token(bytes))
            .ok_or_else(|| BCError::UnknownToken(describe_bytes(bytes)))
    }

    /// Encode one chunk's bytes, bypassing segmentation.
    pub fn encode_single_piece(
        &self,
        bytes: &[u8],
    ) -> Vec<T> {
        let mut tokens = Vec::new();
        self.encoder.encode_append_piece(bytes, &mut tokens);
        tokens
    }

    /// The byte pieces [`Self::encode_single_piece`] produces.
    pub fn byte_pair_split(
        &self,
        bytes: &[u8],
    ) -> Vec<Vec<u8>> {
        self.encode_single_piece(bytes)
            .into_iter()
            .filter_map(|token| self.decoder.token_bytes(token).map(<[u8]>::to_vec))
            .collect()
    }

    /// Decode tokens to a string.
    ///
    /// ## Returns
    /// `UnknownTokenId` for unmapped ids; `Decode` if the bytes are not UTF-8.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tokens)))]
    pub fn decode(
        &self,
        tokens: &[T],
    ) -> BCResult<String> {
        self.decoder.try_decode_to_string(tokens)
    }

    /// Decode tokens to raw bytes.
    pub fn decode_bytes(
        &self,
        tokens: &[T],
    ) -> BCResult<Vec<u8>> {
        self.decoder.try_decode_to_bytes(tokens)
    }

    /// Decode tokens, replacing invalid UTF-8 with U+FFFD.
    pub fn decode_lossy(
        &self,
        tokens: &[T],
    ) -> BCResult<String> {
        self.decoder.try_decode_to_string_lossy(tokens)
    }

    /// The bytes of a single token.
    pub fn decode_single_token_bytes(
        &self,
        token: T,
    ) -> BCResult<Vec<u8>> {
        self.decoder
            .token_bytes(token)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| BCError::UnknownTokenId {
                token: token.to_u64().unwrap_or(u64::MAX),
            })
    }

    /// Decode a batch of token sequences; parallel with the "rayon" feature.
    pub fn decode_batch<B>(
        &self,
        batch: &[B],
    ) -> BCResult<Vec<String>>
    where
        B: AsRef<[T]> + Sync,
    {
        self.decoder.try_decode_batch_to_strings(batch)
    }
}
