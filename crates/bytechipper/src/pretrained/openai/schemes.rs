//! # `OpenAI` Schemes

use std::io::BufRead;

use crate::{
    errors::BCResult,
    pretrained::openai::{
        OA_CL100K_BASE_PATTERN,
        OA_O200K_BASE_PATTERN,
        OA_P50K_BASE_PATTERN,
        OA_R50K_BASE_PATTERN,
        OpenaiVocabConfig,
        specials::{
            OA_CL100K_BASE_SPECIALS,
            OA_O200K_BASE_SPECIALS,
            OA_P50K_BASE_SPECIALS,
            OA_P50K_EDIT_SPECIALS,
            OA_R50K_BASE_SPECIALS,
        },
    },
    registry::SchemeDescriptor,
    types::Rank,
    vocab::{
        SpanTokenMap,
        io::{load_datagym_rank_map_paths, load_tiktoken_rank_map_path, read_tiktoken_rank_map},
    },
};

/// The GPT-2 `DataGym` merge list file name.
pub const GPT2_VOCAB_BPE_FILE: &str = "gpt2_vocab.bpe";

/// The GPT-2 `DataGym` encoder map file name.
pub const GPT2_ENCODER_JSON_FILE: &str = "gpt2_encoder.json";

/// `OpenAI` pretrained schemes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::EnumIter,
    strum::Display
)]
#[non_exhaustive]
pub enum OpenaiScheme {
    /// GPT-2 "`gpt2`"; the "`r50k_base`" ranks under the original name.
    #[strum(serialize = "gpt2")]
    Gpt2,

    /// GPT-3 "`r50k_base`".
    #[strum(serialize = "r50k_base")]
    R50kBase,

    /// Codex "`p50k_base`".
    #[strum(serialize = "p50k_base")]
    P50kBase,

    /// "`p50k_edit`"; "`p50k_base`" ranks plus fill-in-the-middle specials.
    #[strum(serialize = "p50k_edit")]
    P50kEdit,

    /// GPT-3.5 / GPT-4 "`cl100k_base`".
    #[strum(serialize = "cl100k_base")]
    Cl100kBase,

    /// GPT-4o "`o200k_base`".
    #[strum(serialize = "o200k_base")]
    O200kBase,
}

impl OpenaiScheme {
    /// The split pattern.
    pub fn pattern(&self) -> &'static str {
        use OpenaiScheme::*;
        match self {
            Gpt2 | R50kBase => OA_R50K_BASE_PATTERN,
            P50kBase | P50kEdit => OA_P50K_BASE_PATTERN,
            Cl100kBase => OA_CL100K_BASE_PATTERN,
            O200kBase => OA_O200K_BASE_PATTERN,
        }
    }

    /// The `(literal, id)` special tokens.
    pub fn specials(&self) -> &'static [(&'static str, Rank)] {
        use OpenaiScheme::*;
        match self {
            Gpt2 | R50kBase => OA_R50K_BASE_SPECIALS,
            P50kBase => OA_P50K_BASE_SPECIALS,
            P50kEdit => OA_P50K_EDIT_SPECIALS,
            Cl100kBase => OA_CL100K_BASE_SPECIALS,
            O200kBase => OA_O200K_BASE_SPECIALS,
        }
    }

    /// The checked vocabulary size, where the scheme declares one.
    pub fn explicit_n_vocab(&self) -> Option<usize> {
        use OpenaiScheme::*;
        match self {
            Gpt2 | R50kBase => Some(50257),
            P50kBase => Some(50281),
            _ => None,
        }
    }

    /// The tiktoken rank file name.
    pub fn rank_file_name(&self) -> &'static str {
        use OpenaiScheme::*;
        match self {
            Gpt2 | R50kBase => "r50k_base.tiktoken",
            P50kBase | P50kEdit => "p50k_base.tiktoken",
            Cl100kBase => "cl100k_base.tiktoken",
            O200kBase => "o200k_base.tiktoken",
        }
    }

    /// Build a descriptor around already-loaded ranks.
    pub fn descriptor_from_ranks(
        &self,
        ranks: SpanTokenMap<Rank>,
    ) -> SchemeDescriptor<Rank> {
        let descriptor = SchemeDescriptor::new(self.to_string(), self.pattern(), ranks)
            .with_specials(self.specials().iter().copied());
        match self.explicit_n_vocab() {
            Some(n_vocab) => descriptor.with_explicit_n_vocab(n_vocab),
            None => descriptor,
        }
    }

    /// Build a descriptor from a tiktoken rank reader.
    pub fn read_descriptor<R: BufRead>(
        &self,
        reader: R,
    ) -> BCResult<SchemeDescriptor<Rank>> {
        Ok(self.descriptor_from_ranks(read_tiktoken_rank_map(reader)?))
    }

    /// Load the ranks from the configured vocabulary directory.
    ///
    /// "`gpt2`" prefers the `DataGym` pair ([`GPT2_VOCAB_BPE_FILE`],
    /// [`GPT2_ENCODER_JSON_FILE`]) when both are present, and otherwise reads
    /// the "`r50k_base`" rank file, which holds the same ranks.
    pub fn load_ranks(
        &self,
        config: &OpenaiVocabConfig,
    ) -> BCResult<SpanTokenMap<Rank>> {
        if *self == OpenaiScheme::Gpt2 {
            let vocab_bpe = config.file_path(GPT2_VOCAB_BPE_FILE)?;
            let encoder_json = config.file_path(GPT2_ENCODER_JSON_FILE)?;
            if vocab_bpe.is_file() && encoder_json.is_file() {
                log::debug!("loading gpt2 ranks from {vocab_bpe:?}");
                return load_datagym_rank_map_paths(vocab_bpe, encoder_json);
            }
        }

        let path = config.file_path(self.rank_file_name())?;
        log::debug!("loading {self} ranks from {path:?}");
        load_tiktoken_rank_map_path(path)
    }

    /// Load the scheme's descriptor from the configured vocabulary directory.
    pub fn load_descriptor(
        &self,
        config: &OpenaiVocabConfig,
    ) -> BCResult<SchemeDescriptor<Rank>> {
        Ok(self.descriptor_from_ranks(self.load_ranks(config)?))
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use strum::IntoEnumIterator;
    use tempdir::TempDir;

    use super::*;
    use crate::{
        errors::BCError,
        tokenizer::TokenizerOptions,
        vocab::{io::save_tiktoken_rank_map_path, testing::build_test_span_map},
    };

    #[test]
    fn test_names() {
        for scheme in OpenaiScheme::iter() {
            assert_eq!(OpenaiScheme::from_str(&scheme.to_string()).unwrap(), scheme);
        }
        assert_eq!(OpenaiScheme::P50kEdit.to_string(), "p50k_edit");
        assert_eq!(
            OpenaiScheme::Gpt2.rank_file_name(),
            OpenaiScheme::R50kBase.rank_file_name()
        );
    }

    #[test]
    fn test_descriptor_from_ranks() {
        let descriptor = OpenaiScheme::P50kEdit.descriptor_from_ranks(build_test_span_map(&["ab"]));
        assert_eq!(descriptor.name, "p50k_edit");
        assert_eq!(descriptor.pattern, OA_P50K_BASE_PATTERN);
        assert_eq!(descriptor.specials.len(), 4);
        assert_eq!(descriptor.explicit_n_vocab, None);

        let descriptor = OpenaiScheme::R50kBase.descriptor_from_ranks(build_test_span_map(&["ab"]));
        assert_eq!(descriptor.explicit_n_vocab, Some(50257));
    }

    #[test]
    fn test_load_descriptor() {
        let dir = TempDir::new("bytechipper_schemes").unwrap();
        let config = OpenaiVocabConfig::default().with_vocab_dir(dir.path());

        assert!(matches!(
            OpenaiScheme::Cl100kBase.load_descriptor(&config),
            Err(BCError::Io(_))
        ));

        let ranks = build_test_span_map::<Rank>(&["hello", " world"]);
        save_tiktoken_rank_map_path(&ranks, dir.path().join("cl100k_base.tiktoken")).unwrap();

        let descriptor = OpenaiScheme::Cl100kBase.load_descriptor(&config).unwrap();
        assert_eq!(descriptor.ranks, ranks);

        let tokenizer = TokenizerOptions::default().build(descriptor).unwrap();
        assert_eq!(tokenizer.eot_token(), Some(100257));
        let tokens = tokenizer.encode_ordinary("hello world").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokenizer.decode(&tokens).unwrap(), "hello world");
    }
}
