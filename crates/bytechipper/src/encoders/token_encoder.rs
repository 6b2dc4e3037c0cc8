//! # Token Encoder Trait

use crate::{
    errors::BCResult,
    segmentation::{SpecialPolicy, TextSegmentor},
    types::TokenType,
    vocab::SpecialVocab,
};

/// Rough bytes-per-token ratio used to pre-size output buffers.
pub const EXPECTED_BYTES_PER_TOKEN: usize = 4;

/// A trait for token encoders.
pub trait TokenEncoder<T: TokenType>: Send + Sync {
    /// Return the attached text segmentor.
    fn segmentor(&self) -> &TextSegmentor;

    /// Return the attached special vocab.
    fn special_vocab(&self) -> &SpecialVocab<T>;

    /// Encode a single chunk's bytes, appending to a target buffer.
    ///
    /// Whole-chunk entries are emitted directly; anything else is merged.
    ///
    /// ## Arguments
    /// * `piece` - the chunk bytes.
    /// * `tokens` - the target token buffer to append to.
    fn encode_append_piece(
        &self,
        piece: &[u8],
        tokens: &mut Vec<T>,
    );

    /// Encode text, appending to a target buffer.
    ///
    /// ## Arguments
    /// * `text` - the text to encode.
    /// * `policy` - special-token handling.
    /// * `tokens` - the target token buffer to append to.
    ///
    /// ## Returns
    /// On error, `tokens` may hold a partial encoding.
    fn try_encode_append(
        &self,
        text: &str,
        policy: &SpecialPolicy,
        tokens: &mut Vec<T>,
    ) -> BCResult<()>;

    /// Encode text into tokens.
    ///
    /// ## Arguments
    /// * `text` - the text to encode.
    /// * `policy` - special-token handling.
    ///
    /// ## Returns
    /// A `Result` containing the vector of tokens or an error.
    fn try_encode(
        &self,
        text: &str,
        policy: &SpecialPolicy,
    ) -> BCResult<Vec<T>> {
        let mut tokens = Vec::with_capacity(text.len() / EXPECTED_BYTES_PER_TOKEN + 1);
        self.try_encode_append(text, policy, &mut tokens)?;
        Ok(tokens)
    }

    /// Encode a batch of text into tokens.
    ///
    /// Runs in parallel when the "rayon" feature is enabled.
    ///
    /// ## Arguments
    /// * `batch` - the texts to encode.
    /// * `policy` - special-token handling.
    ///
    /// ## Returns
    /// A `Result` with one token vector per text; the first error wins.
    fn try_encode_batch<S>(
        &self,
        batch: &[S],
        policy: &SpecialPolicy,
    ) -> BCResult<Vec<Vec<T>>>
    where
        S: AsRef<str> + Sync,
        Self: Sized,
    {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                use rayon::prelude::*;
                batch
                    .par_iter()
                    .map(|text| self.try_encode(text.as_ref(), policy))
                    .collect()
            } else {
                batch
                    .iter()
                    .map(|text| self.try_encode(text.as_ref(), policy))
                    .collect()
            }
        }
    }
}
