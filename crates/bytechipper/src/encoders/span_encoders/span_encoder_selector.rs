//! # Span Encoder Selector

use std::sync::Arc;

use crate::{
    encoders::span_encoders::{MergeScanSpanEncoder, PriorityMergeSpanEncoder, SpanEncoder},
    types::TokenType,
};

/// Factory for boxed [`SpanEncoder`]s.
pub type SpanEncoderBuilder<T> = Arc<dyn Fn() -> Box<dyn SpanEncoder<T>> + Send + Sync>;

/// Policy enum for selecting a [`SpanEncoder`] for
/// [`TokenSpanEncoder`](`crate::encoders::TokenSpanEncoder`).
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::EnumIter,
    strum::Display
)]
#[non_exhaustive]
pub enum SpanEncoderSelector {
    /// The canonical best Default encoder.
    ///
    /// This stays the label for "the good one" as encoders improve, so
    /// configs that store it keep meaning "use the default".
    ///
    /// This is currently an alias for: [`PriorityMerge`](`Self::PriorityMerge`)
    #[default]
    Default,

    /// The canonical reference encoder.
    ///
    /// As simple as possible; meant for testing and comparison.
    ///
    /// This is currently an alias for: [`MergeScan`](`Self::MergeScan`)
    Reference,

    /// Use the [`MergeScanSpanEncoder`] encoder.
    MergeScan,

    /// Use the [`PriorityMergeSpanEncoder`] encoder.
    PriorityMerge,
}

impl SpanEncoderSelector {
    /// Get a builder for the configured [`SpanEncoder`].
    pub fn span_encoder_builder<T: TokenType>(&self) -> SpanEncoderBuilder<T> {
        use SpanEncoderSelector::*;
        match self {
            Reference | MergeScan => Arc::new(|| -> Box<dyn SpanEncoder<T>> {
                Box::new(MergeScanSpanEncoder::<T>::default())
            }),
            Default | PriorityMerge => Arc::new(|| -> Box<dyn SpanEncoder<T>> {
                Box::new(PriorityMergeSpanEncoder::<T>::default())
            }),
        }
    }
}
