//! # Token Encoders
//!
//! [`TokenSpanEncoder`] walks the spans a [`crate::segmentation::TextSegmentor`]
//! produces and hands each chunk to a pooled [`span_encoders::SpanEncoder`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use bytechipper::{
//!     Rank,
//!     encoders::{TokenEncoder, TokenSpanEncoder},
//!     segmentation::SpecialPolicy,
//! };
//!
//! fn example(
//!     encoder: &TokenSpanEncoder<Rank>,
//!     batch: &[&str],
//! ) -> Vec<Vec<Rank>> {
//!     encoder
//!         .try_encode_batch(batch, &SpecialPolicy::default())
//!         .unwrap()
//! }
//! ```

pub mod span_encoders;

mod token_encoder;
mod token_span_encoder;

#[doc(inline)]
pub use token_encoder::*;
#[doc(inline)]
pub use token_span_encoder::*;
