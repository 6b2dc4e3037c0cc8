//! # Text Segmentor

use crate::{
    errors::BCResult,
    segmentation::{Segmenter, SpanRef, SpecialPolicy, SpecialSplitter, SplitSpan},
};

/// Split pattern + special literals.
///
/// Text is first split on allowed special literals; each plain span is then
/// segmented on its own, so no chunk crosses a special token.
#[derive(Debug, Clone)]
pub struct TextSegmentor {
    segmenter: Segmenter,
    specials: SpecialSplitter,
}

impl TextSegmentor {
    /// Combine a segmenter and a special splitter.
    pub fn new(
        segmenter: Segmenter,
        specials: SpecialSplitter,
    ) -> Self {
        Self {
            segmenter,
            specials,
        }
    }

    /// The split-pattern segmenter.
    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// The special-token splitter.
    pub fn specials(&self) -> &SpecialSplitter {
        &self.specials
    }

    /// Visit every span of `text`, in order.
    ///
    /// ## Arguments
    /// * `text` - the text to segment.
    /// * `policy` - special-token handling.
    /// * `f` - called for each span; an error halts the walk.
    pub fn for_each_span<F>(
        &self,
        text: &str,
        policy: &SpecialPolicy,
        f: &mut F,
    ) -> BCResult<()>
    where
        F: FnMut(SpanRef) -> BCResult<()>,
    {
        for span in self.specials.split(text, policy)? {
            match span {
                SplitSpan::Special(range) => f(SpanRef::Special(range))?,
                SplitSpan::Plain(range) => {
                    let offset = range.start;
                    for chunk in self.segmenter.segments(&text[range]) {
                        f(chunk?.offset(offset))?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Collect every span of `text`.
    pub fn split_spans(
        &self,
        text: &str,
        policy: &SpecialPolicy,
    ) -> BCResult<Vec<SpanRef>> {
        let mut spans = Vec::new();
        self.for_each_span(text, policy, &mut |span| {
            spans.push(span);
            Ok(())
        })?;
        Ok(spans)
    }
}
