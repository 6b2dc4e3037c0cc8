//! # Scheme Descriptors

use crate::{types::TokenType, vocab::SpanTokenMap};

/// Everything needed to build a [`crate::Tokenizer`] for one scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeDescriptor<T: TokenType> {
    /// The scheme name, e.g. `"cl100k_base"`.
    pub name: String,

    /// The split pattern.
    pub pattern: String,

    /// The unvalidated rank entries.
    pub ranks: SpanTokenMap<T>,

    /// `(literal, id)` special tokens, in declaration order.
    pub specials: Vec<(String, T)>,

    /// If set, the exact vocabulary size (ranks + specials).
    pub explicit_n_vocab: Option<usize>,
}

impl<T: TokenType> SchemeDescriptor<T> {
    /// Create a descriptor with no special tokens.
    ///
    /// ## Arguments
    /// * `name` - the scheme name.
    /// * `pattern` - the split pattern.
    /// * `ranks` - the `{ bytes -> rank }` entries.
    pub fn new<N, P>(
        name: N,
        pattern: P,
        ranks: SpanTokenMap<T>,
    ) -> Self
    where
        N: Into<String>,
        P: Into<String>,
    {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            ranks,
            specials: Vec::new(),
            explicit_n_vocab: None,
        }
    }

    /// Append special tokens.
    pub fn with_specials<W, S>(
        mut self,
        specials: W,
    ) -> Self
    where
        W: IntoIterator<Item = (S, T)>,
        S: Into<String>,
    {
        self.specials
            .extend(specials.into_iter().map(|(word, token)| (word.into(), token)));
        self
    }

    /// Require an exact vocabulary size.
    pub fn with_explicit_n_vocab(
        self,
        explicit_n_vocab: usize,
    ) -> Self {
        Self {
            explicit_n_vocab: Some(explicit_n_vocab),
            ..self
        }
    }
}
