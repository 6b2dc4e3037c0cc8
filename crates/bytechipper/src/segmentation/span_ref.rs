//! # Span References

use core::ops::Range;

/// A byte range of a segmented text, tagged by how it was produced.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpanRef {
    /// A split-pattern match.
    Word(Range<usize>),

    /// Text not covered by any split-pattern match.
    Gap(Range<usize>),

    /// A special-token literal.
    Special(Range<usize>),
}

impl SpanRef {
    /// The byte range.
    pub fn range(&self) -> &Range<usize> {
        match self {
            SpanRef::Word(range) | SpanRef::Gap(range) | SpanRef::Special(range) => range,
        }
    }

    /// Shift the range by `offset` bytes.
    pub fn offset(
        self,
        offset: usize,
    ) -> Self {
        let shift = |r: Range<usize>| (r.start + offset)..(r.end + offset);
        match self {
            SpanRef::Word(r) => SpanRef::Word(shift(r)),
            SpanRef::Gap(r) => SpanRef::Gap(shift(r)),
            SpanRef::Special(r) => SpanRef::Special(shift(r)),
        }
    }

    /// The referenced slice of `text`.
    pub fn slice<'a>(
        &self,
        text: &'a str,
    ) -> &'a str {
        &text[self.range().clone()]
    }
}

impl From<SpanRef> for Range<usize> {
    fn from(span: SpanRef) -> Self {
        match span {
            SpanRef::Word(range) | SpanRef::Gap(range) | SpanRef::Special(range) => range,
        }
    }
}
