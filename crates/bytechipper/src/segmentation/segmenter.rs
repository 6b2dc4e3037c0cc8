//! # Segmenter

use std::sync::Arc;

use crate::{
    errors::{BCError, BCResult},
    pattern::CompiledPattern,
    segmentation::SpanRef,
};

/// Splits text into chunks with a single split pattern.
#[derive(Debug, Clone)]
pub struct Segmenter {
    pattern: Arc<CompiledPattern>,
}

impl Segmenter {
    /// Create a segmenter over a compiled pattern.
    pub fn new(pattern: Arc<CompiledPattern>) -> Self {
        Self { pattern }
    }

    /// Compile `pattern` and wrap it.
    pub fn from_pattern(pattern: &str) -> BCResult<Self> {
        Ok(Self::new(Arc::new(CompiledPattern::compile(pattern)?)))
    }

    /// The split pattern.
    pub fn pattern(&self) -> &Arc<CompiledPattern> {
        &self.pattern
    }

    /// Lazily segment `text`.
    ///
    /// The yielded ranges are ordered, contiguous, and cover `text` exactly.
    /// Every call starts a fresh iteration.
    pub fn segments<'s, 't>(
        &'s self,
        text: &'t str,
    ) -> Segments<'s, 't> {
        Segments {
            pattern: &self.pattern,
            text,
            cursor: 0,
            gap_start: 0,
            pending: None,
            done: false,
        }
    }

    /// Collect all chunks of `text`.
    pub fn split(
        &self,
        text: &str,
    ) -> BCResult<Vec<SpanRef>> {
        self.segments(text).collect()
    }
}

/// Iterator over the [`SpanRef::Word`] and [`SpanRef::Gap`] chunks of a text.
///
/// After yielding an error the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Segments<'s, 't> {
    pattern: &'s CompiledPattern,
    text: &'t str,
    cursor: usize,
    gap_start: usize,
    pending: Option<SpanRef>,
    done: bool,
}

impl Segments<'_, '_> {
    fn fail(
        &mut self,
        err: BCError,
    ) -> Option<BCResult<SpanRef>> {
        self.done = true;
        Some(Err(err))
    }

    fn finish(&mut self) -> Option<BCResult<SpanRef>> {
        self.done = true;
        let end = self.text.len();
        if self.gap_start < end {
            let gap = SpanRef::Gap(self.gap_start..end);
            self.gap_start = end;
            Some(Ok(gap))
        } else {
            None
        }
    }
}

impl Iterator for Segments<'_, '_> {
    type Item = BCResult<SpanRef>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(span) = self.pending.take() {
            return Some(Ok(span));
        }
        if self.done {
            return None;
        }

        loop {
            let m = match self.pattern.find(self.text, self.cursor) {
                Ok(Some(m)) => m,
                Ok(None) => return self.finish(),
                Err(err) => return self.fail(err),
            };

            let (start, end) = (m.start(), m.end());
            if start < self.cursor
                || end < start
                || !self.text.is_char_boundary(start)
                || !self.text.is_char_boundary(end)
            {
                return self.fail(BCError::Segmentation(format!(
                    "match {start}..{end} is not a valid range after offset {}",
                    self.cursor
                )));
            }

            if m.is_empty() {
                // The code point at an empty match joins the pending gap.
                match self.text[start..].chars().next() {
                    Some(c) => {
                        self.cursor = start + c.len_utf8();
                        continue;
                    }
                    None => return self.finish(),
                }
            }

            self.cursor = end;
            let word = SpanRef::Word(start..end);
            if self.gap_start < start {
                let gap = SpanRef::Gap(self.gap_start..start);
                self.gap_start = end;
                self.pending = Some(word);
                return Some(Ok(gap));
            }
            self.gap_start = end;
            return Some(Ok(word));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::MatchLimits;

    fn pieces<'t>(
        segmenter: &Segmenter,
        text: &'t str,
    ) -> Vec<&'t str> {
        segmenter
            .split(text)
            .unwrap()
            .iter()
            .map(|span| span.slice(text))
            .collect()
    }

    #[test]
    fn test_words_and_gaps() {
        let segmenter = Segmenter::from_pattern(r"\p{L}+").unwrap();
        let text = "ab, cd!";
        assert_eq!(
            segmenter.split(text).unwrap(),
            vec![
                SpanRef::Word(0..2),
                SpanRef::Gap(2..4),
                SpanRef::Word(4..6),
                SpanRef::Gap(6..7),
            ]
        );
        assert_eq!(pieces(&segmenter, "12"), vec!["12"]);
        assert!(segmenter.split("").unwrap().is_empty());
    }

    #[test]
    fn test_empty_matches_advance() {
        let segmenter = Segmenter::from_pattern(r"a*").unwrap();
        assert_eq!(
            segmenter.split("baac").unwrap(),
            vec![
                SpanRef::Gap(0..1),
                SpanRef::Word(1..3),
                SpanRef::Gap(3..4),
            ]
        );
        assert_eq!(pieces(&segmenter, "\u{4f60}\u{597d}"), vec!["\u{4f60}\u{597d}"]);
    }

    #[test]
    fn test_restartable() {
        let segmenter = Segmenter::from_pattern(r" ?\p{L}+|\s+").unwrap();
        let text = "hello big  world";
        let iter = segmenter.segments(text);
        let first: Vec<_> = iter.clone().collect::<BCResult<_>>().unwrap();
        let second: Vec<_> = iter.collect::<BCResult<_>>().unwrap();
        assert_eq!(first, second);
        assert_eq!(
            pieces(&segmenter, text),
            vec!["hello", " big", "  ", "world"]
        );
    }

    #[test]
    fn test_errors_stop_iteration() {
        let pattern = CompiledPattern::compile(r"(a|aa)+b")
            .unwrap()
            .with_limits(MatchLimits { max_steps: 5 });
        let segmenter = Segmenter::new(Arc::new(pattern));
        let mut iter = segmenter.segments("aaaaaaaaaaaa");
        assert!(matches!(
            iter.next(),
            Some(Err(BCError::MatchTimeout { .. }))
        ));
        assert!(iter.next().is_none());
    }
}
