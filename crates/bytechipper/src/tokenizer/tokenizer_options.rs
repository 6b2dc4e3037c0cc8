//! # Tokenizer Options

use std::{num::NonZeroUsize, sync::Arc};

use crate::{
    decoders::DictionaryDecoder,
    encoders::{TokenSpanEncoder, span_encoders::SpanEncoderSelector},
    errors::{BCError, BCResult},
    pattern::{CompiledPattern, MatchLimits},
    registry::SchemeDescriptor,
    segmentation::{Segmenter, SpecialSplitter, TextSegmentor},
    tokenizer::Tokenizer,
    types::{BCHashSet, TokenType},
    vocab::{RankTable, SpecialVocab},
};

/// Options for configuring a [`Tokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenizerOptions {
    /// The BPE merge algorithm.
    pub span_encoder: SpanEncoderSelector,

    /// Split-pattern search limits.
    pub limits: MatchLimits,

    /// Override the per-tokenizer scratch pool size.
    pub max_pool: Option<NonZeroUsize>,
}

impl TokenizerOptions {
    /// Gets the configured span encoder.
    pub fn span_encoder(&self) -> SpanEncoderSelector {
        self.span_encoder
    }

    /// Sets the configured span encoder.
    pub fn set_span_encoder(
        &mut self,
        span_encoder: SpanEncoderSelector,
    ) {
        self.span_encoder = span_encoder;
    }

    /// Sets the configured span encoder.
    pub fn with_span_encoder(
        mut self,
        span_encoder: SpanEncoderSelector,
    ) -> Self {
        self.set_span_encoder(span_encoder);
        self
    }

    /// Gets the configured match limits.
    pub fn limits(&self) -> MatchLimits {
        self.limits
    }

    /// Sets the configured match limits.
    pub fn set_limits(
        &mut self,
        limits: MatchLimits,
    ) {
        self.limits = limits;
    }

    /// Sets the configured match limits.
    pub fn with_limits(
        mut self,
        limits: MatchLimits,
    ) -> Self {
        self.set_limits(limits);
        self
    }

    /// Gets the configured max pool size.
    pub fn max_pool(&self) -> Option<NonZeroUsize> {
        self.max_pool
    }

    /// Sets the configured max pool size.
    ///
    /// `None` uses the available parallelism.
    pub fn set_max_pool(
        &mut self,
        max_pool: Option<NonZeroUsize>,
    ) {
        self.max_pool = max_pool;
    }

    /// Sets the configured max pool size.
    pub fn with_max_pool(
        mut self,
        max_pool: Option<NonZeroUsize>,
    ) -> Self {
        self.set_max_pool(max_pool);
        self
    }

    /// Build a [`Tokenizer`] for a scheme.
    ///
    /// ## Arguments
    /// * `descriptor` - the scheme's name, pattern, ranks and specials.
    ///
    /// ## Returns
    /// A `Result<Tokenizer<T>>`:
    /// * `BrokenRankTable` if the ranks are malformed;
    /// * `VocabConflict` if special ids collide with ranks or each other,
    ///   or the vocabulary size disagrees with `explicit_n_vocab`;
    /// * `PatternSyntax` if the split pattern does not compile.
    pub fn build<T: TokenType>(
        &self,
        descriptor: SchemeDescriptor<T>,
    ) -> BCResult<Tokenizer<T>> {
        let SchemeDescriptor {
            name,
            pattern,
            ranks,
            specials,
            explicit_n_vocab,
        } = descriptor;

        let table = RankTable::try_from_span_map(ranks)?;
        let specials: SpecialVocab<T> = specials.into_iter().collect();
        specials.validate()?;

        let rank_ids: BCHashSet<T> = table.iter().map(|(_, token)| token).collect();
        if let Some((word, token)) = specials
            .entries()
            .iter()
            .find(|(_, token)| rank_ids.contains(token))
        {
            return Err(BCError::VocabConflict(format!(
                "special token {word:?} reuses rank id {token}"
            )));
        }

        if let Some(n_vocab) = explicit_n_vocab {
            check_n_vocab(&table, &specials, n_vocab)?;
        }

        let pattern = CompiledPattern::compile(&pattern)?.with_limits(self.limits);
        let splitter = SpecialSplitter::new(&specials.literals().collect::<Vec<_>>())?;
        let segmentor = TextSegmentor::new(Segmenter::new(Arc::new(pattern)), splitter);

        let table = Arc::new(table);
        let specials = Arc::new(specials);
        let decoder = DictionaryDecoder::try_from_parts(&table, &specials)?;
        let encoder = TokenSpanEncoder::new_with_selector(
            Arc::new(segmentor),
            table,
            specials,
            self.span_encoder,
            self.max_pool,
        );

        Ok(Tokenizer::new(name, encoder, decoder))
    }
}

fn check_n_vocab<T: TokenType>(
    table: &RankTable<T>,
    specials: &SpecialVocab<T>,
    n_vocab: usize,
) -> BCResult<()> {
    let total = table.len() + specials.len();
    if total != n_vocab {
        return Err(BCError::VocabConflict(format!(
            "expected {n_vocab} tokens, found {} ranks + {} specials",
            table.len(),
            specials.len()
        )));
    }

    let max_token = specials
        .max_token()
        .map_or(table.max_token(), |m| m.max(table.max_token()));
    if max_token.to_usize() != Some(n_vocab - 1) {
        return Err(BCError::VocabConflict(format!(
            "expected max token {}, found {max_token}",
            n_vocab - 1
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::testing::build_test_span_map;

    fn descriptor() -> SchemeDescriptor<u32> {
        SchemeDescriptor::new("test", r" ?\p{L}+|\s+", build_test_span_map(&["ab"]))
    }

    #[test]
    fn test_accessors() {
        let mut options = TokenizerOptions::default();
        assert_eq!(options.span_encoder(), SpanEncoderSelector::Default);
        assert_eq!(options.limits(), MatchLimits::default());
        assert_eq!(options.max_pool(), None);

        options.set_max_pool(NonZeroUsize::new(2));
        let options = options
            .with_span_encoder(SpanEncoderSelector::MergeScan)
            .with_limits(MatchLimits { max_steps: 100 });
        assert_eq!(options.span_encoder(), SpanEncoderSelector::MergeScan);
        assert_eq!(options.limits().max_steps, 100);
        assert_eq!(options.max_pool(), NonZeroUsize::new(2));
    }

    #[test]
    fn test_build() {
        let tokenizer = TokenizerOptions::default()
            .build(descriptor().with_specials([("<|x|>", 257u32)]).with_explicit_n_vocab(258))
            .unwrap();
        assert_eq!(tokenizer.name(), "test");
        assert_eq!(tokenizer.n_vocab(), 258);
    }

    #[test]
    fn test_build_large_special_id() {
        let tokenizer = TokenizerOptions::default()
            .build(descriptor().with_specials([("<|special|>", 4_000_000_000u32)]))
            .unwrap();
        assert_eq!(tokenizer.max_token_value(), 4_000_000_000);

        let tokens = tokenizer.encode_with_special_tokens("ab<|special|>").unwrap();
        assert_eq!(tokens, vec![256, 4_000_000_000]);
        assert_eq!(tokenizer.decode(&tokens).unwrap(), "ab<|special|>");
        assert_eq!(
            tokenizer.decode_single_token_bytes(4_000_000_000).unwrap(),
            b"<|special|>"
        );
    }

    #[test]
    fn test_build_conflicts() {
        let options = TokenizerOptions::default();

        let err = options
            .build(descriptor().with_specials([("<|x|>", 256u32)]))
            .unwrap_err();
        assert!(matches!(err, BCError::VocabConflict(msg) if msg.contains("reuses rank id 256")));

        let err = options
            .build(descriptor().with_specials([("<|x|>", 300u32), ("<|y|>", 300)]))
            .unwrap_err();
        assert!(matches!(err, BCError::VocabConflict(_)));

        let err = options
            .build(descriptor().with_explicit_n_vocab(300))
            .unwrap_err();
        assert!(matches!(err, BCError::VocabConflict(_)));

        let err = options
            .build(descriptor().with_specials([("<|x|>", 300u32)]).with_explicit_n_vocab(258))
            .unwrap_err();
        assert!(matches!(err, BCError::VocabConflict(msg) if msg.contains("max token")));

        let mut broken = descriptor();
        broken.pattern = "(".to_string();
        assert!(matches!(
            options.build(broken),
            Err(BCError::PatternSyntax { .. })
        ));
    }
}
