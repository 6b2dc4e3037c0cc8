//! # Vocabulary IO

mod datagym_io;
mod tiktoken_io;

#[doc(inline)]
pub use datagym_io::*;
#[doc(inline)]
pub use tiktoken_io::*;
