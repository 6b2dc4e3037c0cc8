//! # Special Token Vocabulary

use crate::{
    errors::{BCError, BCResult},
    types::{BCHashMap, TokenType},
};

/// Special-token literals and their reserved ids.
///
/// Declaration order is preserved; a repeated literal keeps its first id.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialVocab<T: TokenType> {
    entries: Vec<(String, T)>,
    index: BCHashMap<String, T>,
}

impl<T: TokenType> Default for SpecialVocab<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: Default::default(),
        }
    }
}

impl<T: TokenType, S: AsRef<str>> FromIterator<(S, T)> for SpecialVocab<T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Self::default().with_special_words(iter)
    }
}

impl<T: TokenType> SpecialVocab<T> {
    /// Add a literal; ignored if the literal is already present.
    ///
    /// ## Returns
    /// `true` if the literal was added.
    pub fn add_str_word(
        &mut self,
        word: &str,
        token: T,
    ) -> bool {
        if self.index.contains_key(word) {
            return false;
        }
        self.index.insert(word.to_string(), token);
        self.entries.push((word.to_string(), token));
        true
    }

    /// Extend the vocabulary.
    ///
    /// ## Arguments
    /// * `special_words` - `(literal, id)` pairs, in declaration order.
    pub fn with_special_words<W, S>(
        self,
        special_words: W,
    ) -> Self
    where
        W: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        let mut vocab = self;
        for (word, token) in special_words {
            vocab.add_str_word(word.as_ref(), token);
        }
        vocab
    }

    /// Number of literals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Are there no literals?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(literal, id)` entries in declaration order.
    pub fn entries(&self) -> &[(String, T)] {
        &self.entries
    }

    /// The literals in declaration order.
    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(word, _)| word.as_str())
    }

    /// The id of a literal.
    pub fn lookup_token(
        &self,
        word: &[u8],
    ) -> Option<T> {
        let word = core::str::from_utf8(word).ok()?;
        self.index.get(word).copied()
    }

    /// The literal of an id.
    pub fn lookup_word(
        &self,
        token: T,
    ) -> Option<&str> {
        self.entries
            .iter()
            .find_map(|(word, t)| (*t == token).then_some(word.as_str()))
    }

    /// The largest special id.
    pub fn max_token(&self) -> Option<T> {
        self.entries.iter().map(|&(_, t)| t).max()
    }

    /// Reject duplicate ids.
    pub fn validate(&self) -> BCResult<()> {
        let mut seen: BCHashMap<T, &str> = Default::default();
        for (word, token) in &self.entries {
            if let Some(prev) = seen.insert(*token, word) {
                return Err(BCError::VocabConflict(format!(
                    "special tokens {prev:?} and {word:?} share id {token}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_vocab() {
        let mut vocab: SpecialVocab<u32> = SpecialVocab::default();
        assert!(vocab.is_empty());

        assert!(vocab.add_str_word("<|b|>", 11));
        assert!(vocab.add_str_word("<|a|>", 10));
        assert!(!vocab.add_str_word("<|b|>", 12));
        assert_eq!(vocab.len(), 2);

        assert_eq!(vocab.literals().collect::<Vec<_>>(), vec!["<|b|>", "<|a|>"]);
        assert_eq!(vocab.lookup_token(b"<|b|>"), Some(11));
        assert_eq!(vocab.lookup_token(&[0xff]), None);
        assert_eq!(vocab.lookup_word(10), Some("<|a|>"));
        assert_eq!(vocab.max_token(), Some(11));
        vocab.validate().unwrap();
    }

    #[test]
    fn test_duplicate_ids() {
        let vocab: SpecialVocab<u32> = [("<|a|>", 1), ("<|b|>", 1)].into_iter().collect();
        assert!(matches!(vocab.validate(), Err(BCError::VocabConflict(_))));
    }
}
