//! # Token Decoders
//!
//! Decoding concatenates each token's bytes; [`TokenDecoder`] layers UTF-8
//! and batch handling on top of the per-decoder byte lookup.

mod dictionary_decoder;
mod token_decoder;

#[doc(inline)]
pub use dictionary_decoder::*;
#[doc(inline)]
pub use token_decoder::*;
