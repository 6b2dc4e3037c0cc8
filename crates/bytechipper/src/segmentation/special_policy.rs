//! # Special Token Policy

use crate::types::BCHashSet;

/// A set of special-token literals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SpecialSet {
    /// No literals.
    #[default]
    None,

    /// Every literal of the scheme.
    All,

    /// Exactly these literals.
    Only(BCHashSet<String>),
}

impl SpecialSet {
    /// Build an [`SpecialSet::Only`] set.
    pub fn only<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(literals.into_iter().map(Into::into).collect())
    }

    /// Does the set hold `literal`?
    pub fn contains(
        &self,
        literal: &str,
    ) -> bool {
        match self {
            SpecialSet::None => false,
            SpecialSet::All => true,
            SpecialSet::Only(set) => set.contains(literal),
        }
    }

    /// Is the set empty, regardless of the scheme?
    pub fn is_none(&self) -> bool {
        match self {
            SpecialSet::None => true,
            SpecialSet::All => false,
            SpecialSet::Only(set) => set.is_empty(),
        }
    }
}

/// How special-token literals found in text are treated.
///
/// * allowed literals encode to their reserved ids;
/// * disallowed literals are an error;
/// * all others are encoded as ordinary text.
///
/// [`SpecialSet::All`] as the disallowed set means "every literal not
/// allowed". The default policy allows nothing and disallows everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialPolicy {
    /// Literals that encode to their special ids.
    pub allowed: SpecialSet,

    /// Literals that fail the encode.
    pub disallowed: SpecialSet,
}

impl Default for SpecialPolicy {
    fn default() -> Self {
        Self {
            allowed: SpecialSet::None,
            disallowed: SpecialSet::All,
        }
    }
}

impl SpecialPolicy {
    /// Treat every literal as ordinary text.
    pub fn ordinary() -> Self {
        Self {
            allowed: SpecialSet::None,
            disallowed: SpecialSet::None,
        }
    }

    /// Encode every literal to its special id.
    pub fn allow_all() -> Self {
        Self {
            allowed: SpecialSet::All,
            disallowed: SpecialSet::None,
        }
    }

    /// Replace the allowed set.
    pub fn with_allowed(
        self,
        allowed: SpecialSet,
    ) -> Self {
        Self { allowed, ..self }
    }

    /// Replace the disallowed set.
    pub fn with_disallowed(
        self,
        disallowed: SpecialSet,
    ) -> Self {
        Self { disallowed, ..self }
    }

    /// Is `literal` encoded as a special token?
    pub fn is_allowed(
        &self,
        literal: &str,
    ) -> bool {
        self.allowed.contains(literal)
    }

    /// Is `literal` an error?
    pub fn is_disallowed(
        &self,
        literal: &str,
    ) -> bool {
        match &self.disallowed {
            SpecialSet::All => !self.allowed.contains(literal),
            other => other.contains(literal),
        }
    }
}
