//! # Pretrained Schemes
//!
//! Split patterns, special tokens, and model names for public schemes.
//! The schemes register themselves with the global registry; their rank
//! files are read from the directory [`openai::OpenaiVocabConfig`] resolves.
//!
//! ```rust,no_run
//! use bytechipper::{BCResult, get_encoding, pretrained::openai::OpenaiScheme};
//!
//! fn example() -> BCResult<()> {
//!     let tokenizer = get_encoding(&OpenaiScheme::Cl100kBase.to_string())?;
//!     let tokens = tokenizer.encode_ordinary("hello world")?;
//!     assert_eq!(tokenizer.decode(&tokens)?, "hello world");
//!     Ok(())
//! }
//! ```

pub mod openai;
