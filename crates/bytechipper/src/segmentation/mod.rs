//! # Text Segmentation
//!
//! Encoding splits text in two stages:
//! * [`SpecialSplitter`] separates allowed special-token literals from plain text,
//!   under a [`SpecialPolicy`];
//! * [`Segmenter`] cuts each plain span into chunks with the scheme's split pattern.
//!
//! [`TextSegmentor`] composes both into a single stream of [`SpanRef`]s.

mod segmenter;
mod span_ref;
mod special_policy;
mod special_splitter;
mod text_segmentor;

#[doc(inline)]
pub use segmenter::*;
#[doc(inline)]
pub use span_ref::*;
#[doc(inline)]
pub use special_policy::*;
#[doc(inline)]
pub use special_splitter::*;
#[doc(inline)]
pub use text_segmentor::*;
