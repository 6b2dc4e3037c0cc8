//! # Vocabulary
//!
//! * [`RankTable`] - the validated ``{ Vec<u8> -> T }`` merge-rank table;
//! * [`SpecialVocab`] - ordered special-token literals and their ids;
//! * [`io`] - `tiktoken` base64 rank files and GPT-2 `DataGym` vocabularies.

pub mod io;

mod rank_table;
mod special_vocab;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[doc(inline)]
pub use rank_table::*;
#[doc(inline)]
pub use special_vocab::*;
