//! # Combined Tokenizer
//!
//! [`TokenizerOptions::build`] turns a [`crate::registry::SchemeDescriptor`]
//! into a validated [`Tokenizer`].

mod tokenizer_impl;
mod tokenizer_options;

#[doc(inline)]
pub use tokenizer_impl::*;
#[doc(inline)]
pub use tokenizer_options::*;
