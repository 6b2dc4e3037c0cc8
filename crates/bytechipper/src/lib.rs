//! # `bytechipper` Byte-Level BPE Tokenizer
//!
//! `bytechipper` encodes text into `tiktoken`-compatible token ids and back,
//! using its own backtracking split-pattern engine.
//!
//! See:
//! * [`pattern`] for the split-pattern matcher.
//! * [`segmentation`] to split text into chunks and special tokens.
//! * [`encoders`] to merge chunks into tokens.
//! * [`decoders`] to turn tokens back into bytes and text.
//! * [`vocab`] for rank tables, special tokens, and rank-file io.
//! * [`registry`] and [`pretrained`] for named schemes.
//!
//! ## Loading Pretrained Tokenizers
//!
//! ```rust,no_run
//! use bytechipper::{BCResult, SpecialPolicy, encoding_for_model};
//!
//! fn example() -> BCResult<()> {
//!     let tokenizer = encoding_for_model("gpt-4")?;
//!
//!     let text = "hello world<|endoftext|>";
//!     let tokens = tokenizer.encode(text, &SpecialPolicy::allow_all())?;
//!     assert_eq!(tokenizer.decode(&tokens)?, text);
//!     assert_eq!(tokenizer.token_count("hello world")?, 2);
//!     Ok(())
//! }
//! ```
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
#![warn(missing_docs, unused)]

pub mod decoders;
pub mod encoders;
pub mod errors;
pub mod pattern;
pub mod pretrained;
pub mod registry;
pub mod segmentation;
pub mod support;
pub mod tokenizer;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use errors::{BCError, BCResult, BytechipperError};
#[doc(inline)]
pub use registry::{
    encoding_for_model,
    encoding_name_for_model,
    get_encoding,
    list_encoding_names,
    list_model_names,
    register_model_alias,
    register_scheme,
};
#[doc(inline)]
pub use segmentation::{SpecialPolicy, SpecialSet};
#[doc(inline)]
pub use tokenizer::{Tokenizer, TokenizerOptions};
#[doc(inline)]
pub use types::{Rank, TokenType};
