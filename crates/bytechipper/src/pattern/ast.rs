//! # Pattern Syntax Tree

use crate::pattern::class::CharClass;

/// Repetition behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    /// Prefer more iterations; backtrack into fewer.
    Greedy,

    /// Prefer fewer iterations; backtrack into more.
    Lazy,

    /// Take as many iterations as possible and never give any back.
    Possessive,
}

/// Zero-width lookaround flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookKind {
    /// `(?=...)`
    Ahead,

    /// `(?!...)`
    NegativeAhead,

    /// `(?<=...)`
    Behind,

    /// `(?<!...)`
    NegativeBehind,
}

impl LookKind {
    /// Does the sub-pattern have to end at the current position?
    pub fn is_behind(self) -> bool {
        matches!(self, LookKind::Behind | LookKind::NegativeBehind)
    }

    /// Does the assertion succeed when the sub-pattern fails?
    pub fn is_negated(self) -> bool {
        matches!(self, LookKind::NegativeAhead | LookKind::NegativeBehind)
    }
}

/// Zero-width position assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertKind {
    /// `\A`, or `^` outside multi-line mode.
    TextStart,

    /// `\z`, `\Z`, or `$` outside multi-line mode.
    TextEnd,

    /// `^` in multi-line mode.
    LineStart,

    /// `$` in multi-line mode.
    LineEnd,

    /// `\b`
    WordBoundary,

    /// `\B`
    NotWordBoundary,
}

/// A parsed pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Matches the empty string.
    Empty,

    /// A single code point.
    Literal {
        /// The code point.
        c: char,

        /// Compare under simple case folding.
        fold: bool,
    },

    /// `.`
    Any {
        /// Also match `\n`.
        dot_all: bool,
    },

    /// A character class.
    Class {
        /// The class.
        class: CharClass,

        /// Match case-insensitively.
        fold: bool,
    },

    /// A zero-width assertion.
    Assert(AssertKind),

    /// A sequence.
    Concat(Vec<Node>),

    /// Ordered alternatives; the first that leads to an overall match wins.
    Alternate(Vec<Node>),

    /// Counted repetition; `max: None` is unbounded.
    Repeat {
        /// The repeated node.
        node: Box<Node>,

        /// Minimum iterations.
        min: u32,

        /// Maximum iterations.
        max: Option<u32>,

        /// Greedy, lazy, or possessive.
        mode: RepeatMode,
    },

    /// A lookaround assertion.
    Look {
        /// The asserted sub-pattern.
        node: Box<Node>,

        /// Direction and polarity.
        kind: LookKind,
    },

    /// `(?>...)`: commits to the first way the group matches.
    Atomic(Box<Node>),
}

impl Node {
    /// Upper bound on the number of code points this node can consume.
    ///
    /// `None` when unbounded.
    pub fn max_width(&self) -> Option<usize> {
        match self {
            Node::Empty | Node::Assert(_) | Node::Look { .. } => Some(0),
            Node::Literal { .. } | Node::Any { .. } | Node::Class { .. } => Some(1),
            Node::Concat(nodes) => nodes
                .iter()
                .try_fold(0usize, |acc, n| acc.checked_add(n.max_width()?)),
            Node::Alternate(nodes) => nodes
                .iter()
                .try_fold(0usize, |acc, n| Some(acc.max(n.max_width()?))),
            Node::Repeat { node, max, .. } => match (node.max_width()?, max) {
                (0, _) => Some(0),
                (_, None) => None,
                (w, Some(m)) => w.checked_mul(*m as usize),
            },
            Node::Atomic(node) => node.max_width(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(c: char) -> Node {
        Node::Literal { c, fold: false }
    }

    #[test]
    fn test_max_width() {
        assert_eq!(lit('a').max_width(), Some(1));
        assert_eq!(Node::Concat(vec![lit('a'), lit('b')]).max_width(), Some(2));
        assert_eq!(
            Node::Alternate(vec![lit('a'), Node::Concat(vec![lit('b'), lit('c')])]).max_width(),
            Some(2)
        );

        let bounded = Node::Repeat {
            node: Box::new(lit('a')),
            min: 1,
            max: Some(3),
            mode: RepeatMode::Greedy,
        };
        assert_eq!(bounded.max_width(), Some(3));

        let unbounded = Node::Repeat {
            node: Box::new(lit('a')),
            min: 0,
            max: None,
            mode: RepeatMode::Lazy,
        };
        assert_eq!(unbounded.max_width(), None);
        assert_eq!(Node::Atomic(Box::new(unbounded)).max_width(), None);
    }

    #[test]
    fn test_look_kind() {
        assert!(LookKind::Behind.is_behind());
        assert!(!LookKind::NegativeAhead.is_behind());
        assert!(LookKind::NegativeBehind.is_negated());
        assert!(!LookKind::Ahead.is_negated());
    }
}
