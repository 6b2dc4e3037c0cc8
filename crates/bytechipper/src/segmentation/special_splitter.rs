//! # Special Token Splitter

use core::{cmp::Reverse, ops::Range};

use aho_corasick::{AhoCorasick, MatchKind};

use crate::{
    errors::{BCError, BCResult},
    segmentation::SpecialPolicy,
    types::BCHashSet,
};

/// A span of text produced by [`SpecialSplitter::split`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SplitSpan {
    /// Ordinary text, segmented by the split pattern.
    Plain(Range<usize>),

    /// An allowed special-token literal.
    Special(Range<usize>),
}

impl SplitSpan {
    /// The byte range.
    pub fn range(&self) -> &Range<usize> {
        match self {
            SplitSpan::Plain(range) | SplitSpan::Special(range) => range,
        }
    }
}

#[derive(Debug, Clone)]
struct Automata {
    /// All (overlapping) occurrences.
    standard: AhoCorasick,

    /// Non-overlapping, leftmost-longest occurrences.
    longest: AhoCorasick,
}

/// Separates text into plain and special spans.
///
/// At each position the longest allowed literal wins.
#[derive(Debug, Clone)]
pub struct SpecialSplitter {
    literals: Vec<String>,
    automata: Option<Automata>,
}

impl SpecialSplitter {
    /// Build a splitter over the given literals.
    ///
    /// Duplicate literals keep their first occurrence.
    ///
    /// ## Arguments
    /// * `literals` - the special-token literals, in declaration order.
    ///
    /// ## Returns
    /// A `Result<SpecialSplitter>`; empty literals are rejected.
    pub fn new<S: AsRef<str>>(literals: &[S]) -> BCResult<Self> {
        let mut seen: BCHashSet<&str> = Default::default();
        let mut unique = Vec::with_capacity(literals.len());
        for literal in literals {
            let literal = literal.as_ref();
            if literal.is_empty() {
                return Err(BCError::VocabConflict(
                    "special token literals must not be empty".to_string(),
                ));
            }
            if seen.insert(literal) {
                unique.push(literal.to_string());
            }
        }

        let automata = if unique.is_empty() {
            None
        } else {
            let build = |kind: MatchKind| {
                AhoCorasick::builder()
                    .match_kind(kind)
                    .build(&unique)
                    .map_err(|err| BCError::VocabConflict(err.to_string()))
            };
            Some(Automata {
                standard: build(MatchKind::Standard)?,
                longest: build(MatchKind::LeftmostLongest)?,
            })
        };

        Ok(Self {
            literals: unique,
            automata,
        })
    }

    /// The literals, in declaration order.
    pub fn literals(&self) -> &[String] {
        &self.literals
    }

    /// Split `text` under `policy`.
    ///
    /// ## Returns
    /// Ordered spans covering `text` exactly; `DisallowedSpecialToken` if a
    /// disallowed literal occurs anywhere in `text`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn split(
        &self,
        text: &str,
        policy: &SpecialPolicy,
    ) -> BCResult<Vec<SplitSpan>> {
        let specials = match &self.automata {
            None => Vec::new(),
            Some(automata) => {
                self.check_disallowed(automata, text, policy)?;
                self.find_allowed(automata, text, policy)
            }
        };

        let mut spans = Vec::with_capacity(2 * specials.len() + 1);
        let mut pos = 0;
        for range in specials {
            if pos < range.start {
                spans.push(SplitSpan::Plain(pos..range.start));
            }
            pos = range.end;
            spans.push(SplitSpan::Special(range));
        }
        if pos < text.len() {
            spans.push(SplitSpan::Plain(pos..text.len()));
        }
        Ok(spans)
    }

    fn check_disallowed(
        &self,
        automata: &Automata,
        text: &str,
        policy: &SpecialPolicy,
    ) -> BCResult<()> {
        if policy.disallowed.is_none() {
            return Ok(());
        }
        let first = automata
            .standard
            .find_overlapping_iter(text)
            .filter(|m| policy.is_disallowed(&self.literals[m.pattern().as_usize()]))
            .min_by_key(|m| (m.start(), m.pattern().as_usize()));

        match first {
            Some(m) => Err(BCError::DisallowedSpecialToken {
                token: self.literals[m.pattern().as_usize()].clone(),
            }),
            None => Ok(()),
        }
    }

    fn find_allowed(
        &self,
        automata: &Automata,
        text: &str,
        policy: &SpecialPolicy,
    ) -> Vec<Range<usize>> {
        if policy.allowed.is_none() {
            return Vec::new();
        }
        if self.literals.iter().all(|lit| policy.is_allowed(lit)) {
            return automata
                .longest
                .find_iter(text)
                .map(|m| m.range())
                .collect();
        }

        let mut found: Vec<_> = automata
            .standard
            .find_overlapping_iter(text)
            .filter(|m| policy.is_allowed(&self.literals[m.pattern().as_usize()]))
            .collect();
        found.sort_by_key(|m| (m.start(), Reverse(m.len()), m.pattern().as_usize()));

        let mut pos = 0;
        let mut ranges = Vec::new();
        for m in found {
            if m.start() >= pos {
                pos = m.end();
                ranges.push(m.range());
            }
        }
        ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::SpecialSet;

    const EOT: &str = "<|endoftext|>";
    const FIM: &str = "<|fim_prefix|>";

    #[test]
    fn test_no_specials() {
        let splitter = SpecialSplitter::new::<&str>(&[]).unwrap();
        assert_eq!(
            splitter.split("abc", &SpecialPolicy::default()).unwrap(),
            vec![SplitSpan::Plain(0..3)]
        );
        assert!(splitter.split("", &SpecialPolicy::default()).unwrap().is_empty());
    }

    #[test]
    fn test_allowed_split() {
        let splitter = SpecialSplitter::new(&[EOT, FIM]).unwrap();
        let text = format!("a{EOT}{FIM}b");
        assert_eq!(
            splitter.split(&text, &SpecialPolicy::allow_all()).unwrap(),
            vec![
                SplitSpan::Plain(0..1),
                SplitSpan::Special(1..14),
                SplitSpan::Special(14..28),
                SplitSpan::Plain(28..29),
            ]
        );

        // Only EOT allowed; FIM stays in the text.
        let policy = SpecialPolicy::ordinary().with_allowed(SpecialSet::only([EOT]));
        assert_eq!(
            splitter.split(&text, &policy).unwrap(),
            vec![
                SplitSpan::Plain(0..1),
                SplitSpan::Special(1..14),
                SplitSpan::Plain(14..29),
            ]
        );
    }

    #[test]
    fn test_longest_literal_wins() {
        let splitter = SpecialSplitter::new(&["<|a", "<|a|>", "b"]).unwrap();
        let text = "x<|a|>y";
        assert_eq!(
            splitter.split(text, &SpecialPolicy::allow_all()).unwrap(),
            vec![
                SplitSpan::Plain(0..1),
                SplitSpan::Special(1..6),
                SplitSpan::Plain(6..7),
            ]
        );

        let policy = SpecialPolicy::ordinary().with_allowed(SpecialSet::only(["<|a", "<|a|>"]));
        assert_eq!(
            splitter.split(text, &policy).unwrap(),
            vec![
                SplitSpan::Plain(0..1),
                SplitSpan::Special(1..6),
                SplitSpan::Plain(6..7),
            ]
        );
    }

    #[test]
    fn test_disallowed() {
        let splitter = SpecialSplitter::new(&[EOT, FIM]).unwrap();
        let text = format!("hi {FIM} {EOT}");

        let err = splitter.split(&text, &SpecialPolicy::default()).unwrap_err();
        assert!(matches!(
            err,
            BCError::DisallowedSpecialToken { token } if token == FIM
        ));

        let policy = SpecialPolicy::default().with_allowed(SpecialSet::only([FIM]));
        let err = splitter.split(&text, &policy).unwrap_err();
        assert!(matches!(
            err,
            BCError::DisallowedSpecialToken { token } if token == EOT
        ));

        assert_eq!(
            splitter.split(&text, &SpecialPolicy::ordinary()).unwrap(),
            vec![SplitSpan::Plain(0..text.len())]
        );
    }

    #[test]
    fn test_literals() {
        let splitter = SpecialSplitter::new(&[EOT, FIM, EOT]).unwrap();
        assert_eq!(splitter.literals(), &[EOT.to_string(), FIM.to_string()]);
        assert!(SpecialSplitter::new(&[""]).is_err());
    }
}
