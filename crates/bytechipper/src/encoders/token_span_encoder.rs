//! # Token Span Encoder

use std::{num::NonZeroUsize, sync::Arc};

use crate::{
    encoders::{
        TokenEncoder,
        span_encoders::{SpanEncoder, SpanEncoderBuilder, SpanEncoderSelector},
    },
    errors::{BCError, BCResult},
    segmentation::{SpanRef, SpecialPolicy, TextSegmentor},
    support::{concurrency::ScratchPool, strings::describe_bytes},
    types::TokenType,
    vocab::{RankTable, SpecialVocab},
};

/// A [`TokenEncoder`] that composes a [`TextSegmentor`] with a [`SpanEncoder`].
pub struct TokenSpanEncoder<T>
where
    T: TokenType,
{
    segmentor: Arc<TextSegmentor>,
    table: Arc<RankTable<T>>,
    specials: Arc<SpecialVocab<T>>,
    se_pool: ScratchPool<Box<dyn SpanEncoder<T>>>,
}

impl<T: TokenType> core::fmt::Debug for TokenSpanEncoder<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("TokenSpanEncoder")
            .field("segmentor", &self.segmentor)
            .field("table_len", &self.table.len())
            .field("specials", &self.specials.len())
            .field("se_pool", &self.se_pool)
            .finish()
    }
}

impl<T: TokenType> TokenSpanEncoder<T> {
    /// Create a new encoder using the selected [`SpanEncoder`].
    ///
    /// ## Arguments
    /// * `segmentor` - the text segmentor.
    /// * `table` - the rank table.
    /// * `specials` - the special-token vocab.
    /// * `selector` - which merge algorithm to use.
    /// * `max_pool` - override the scratch pool size.
    pub fn new_with_selector(
        segmentor: Arc<TextSegmentor>,
        table: Arc<RankTable<T>>,
        specials: Arc<SpecialVocab<T>>,
        selector: SpanEncoderSelector,
        max_pool: Option<NonZeroUsize>,
    ) -> Self {
        Self::new_with_builder(
            segmentor,
            table,
            specials,
            selector.span_encoder_builder(),
            max_pool,
        )
    }

    /// Create a new encoder from a [`SpanEncoder`] factory.
    pub fn new_with_builder(
        segmentor: Arc<TextSegmentor>,
        table: Arc<RankTable<T>>,
        specials: Arc<SpecialVocab<T>>,
        se_builder: SpanEncoderBuilder<T>,
        max_pool: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            segmentor,
            table,
            specials,
            se_pool: ScratchPool::from_builder(|| se_builder(), max_pool),
        }
    }

    /// The rank table.
    pub fn table(&self) -> &Arc<RankTable<T>> {
        &self.table
    }
}

impl<T: TokenType> TokenEncoder<T> for TokenSpanEncoder<T> {
    fn segmentor(&self) -> &TextSegmentor {
        &self.segmentor
    }

    fn special_vocab(&self) -> &SpecialVocab<T> {
        &self.specials
    }

    fn encode_append_piece(
        &self,
        piece: &[u8],
        tokens: &mut Vec<T>,
    ) {
        self.se_pool
            .with(|se| se.encode_append_span(&self.table, piece, tokens));
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip(self, text, policy, tokens))
    )]
    fn try_encode_append(
        &self,
        text: &str,
        policy: &SpecialPolicy,
        tokens: &mut Vec<T>,
    ) -> BCResult<()> {
        self.se_pool.with(|se| {
            self.segmentor.for_each_span(text, policy, &mut |span_ref| {
                match span_ref {
                    SpanRef::Word(range) | SpanRef::Gap(range) => {
                        se.encode_append_span(&self.table, text[range].as_bytes(), tokens);
                    }
                    SpanRef::Special(range) => {
                        let literal = text[range].as_bytes();
                        let token = self.specials.lookup_token(literal).ok_or_else(|| {
                            BCError::UnknownToken(describe_bytes(literal))
                        })?;
                        tokens.push(token);
                    }
                }
                Ok(())
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        segmentation::{Segmenter, SpecialSplitter},
        vocab::testing::build_test_rank_table,
    };

    fn encoder(selector: SpanEncoderSelector) -> TokenSpanEncoder<u32> {
        let table = build_test_rank_table::<u32>(&["hello", " world", " wor"]);
        let specials: SpecialVocab<u32> = [("<|end|>", 1000u32)].into_iter().collect();
        let segmentor = TextSegmentor::new(
            Segmenter::from_pattern(r" ?\p{L}+| ?\p{N}+|\s+").unwrap(),
            SpecialSplitter::new(&specials.literals().collect::<Vec<_>>()).unwrap(),
        );
        TokenSpanEncoder::new_with_selector(
            Arc::new(segmentor),
            Arc::new(table),
            Arc::new(specials),
            selector,
            NonZeroUsize::new(2),
        )
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<E: Send + Sync>(_: &E) {}
        assert_send_sync(&encoder(SpanEncoderSelector::Default));
    }

    #[test]
    fn test_encode() {
        let encoder = encoder(SpanEncoderSelector::Default);
        let hello = encoder.table().lookup(b"hello").unwrap();
        let world = encoder.table().lookup(b" world").unwrap();

        assert_eq!(
            encoder
                .try_encode("hello world<|end|>!", &SpecialPolicy::allow_all())
                .unwrap(),
            vec![hello, world, 1000, b'!' as u32]
        );
        assert!(matches!(
            encoder.try_encode("<|end|>", &SpecialPolicy::default()),
            Err(BCError::DisallowedSpecialToken { .. })
        ));

        let mut tokens = Vec::new();
        encoder.encode_append_piece(b" worx", &mut tokens);
        assert_eq!(tokens, vec![encoder.table().lookup(b" wor").unwrap(), b'x' as u32]);
    }

    #[test]
    fn test_batch() {
        let encoder = encoder(SpanEncoderSelector::Reference);
        let batch = ["hello", "", "hello world"];
        let tokens = encoder
            .try_encode_batch(&batch, &SpecialPolicy::default())
            .unwrap();
        assert_eq!(tokens.len(), 3);
        for (text, toks) in batch.iter().zip(&tokens) {
            assert_eq!(
                toks,
                &encoder.try_encode(text, &SpecialPolicy::default()).unwrap()
            );
        }
        assert!(tokens[1].is_empty());
    }
}
