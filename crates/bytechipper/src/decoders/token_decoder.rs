//! # Token Decoder Trait

use crate::{errors::BCResult, support::strings::string_from_utf8_lossy, types::TokenType};

/// Trait for token decoders.
pub trait TokenDecoder<T: TokenType>: Send + Sync {
    /// Decodes tokens, appending their bytes to a buffer.
    ///
    /// ## Arguments
    /// * `tokens` - a slice of tokens to decode.
    /// * `buf` - the target byte buffer.
    ///
    /// ## Returns
    /// `UnknownTokenId` for the first unmapped token; `buf` then holds the
    /// bytes of the tokens before it.
    fn try_decode_append_bytes(
        &self,
        tokens: &[T],
        buf: &mut Vec<u8>,
    ) -> BCResult<()>;

    /// Decodes tokens into bytes.
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> BCResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(tokens.len() * 4);
        self.try_decode_append_bytes(tokens, &mut buf)?;
        Ok(buf)
    }

    /// Decodes tokens into a string.
    ///
    /// ## Returns
    /// A `Decode` error when the bytes are not valid UTF-8.
    fn try_decode_to_string(
        &self,
        tokens: &[T],
    ) -> BCResult<String> {
        Ok(String::from_utf8(self.try_decode_to_bytes(tokens)?)?)
    }

    /// Decodes tokens into a string, replacing invalid UTF-8 with U+FFFD.
    fn try_decode_to_string_lossy(
        &self,
        tokens: &[T],
    ) -> BCResult<String> {
        Ok(string_from_utf8_lossy(self.try_decode_to_bytes(tokens)?))
    }

    /// Decodes a batch of token sequences into strings.
    ///
    /// Runs in parallel when the "rayon" feature is enabled.
    fn try_decode_batch_to_strings<B>(
        &self,
        batch: &[B],
    ) -> BCResult<Vec<String>>
    where
        B: AsRef<[T]> + Sync,
        Self: Sized,
    {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                use rayon::prelude::*;
                batch
                    .par_iter()
                    .map(|tokens| self.try_decode_to_string(tokens.as_ref()))
                    .collect()
            } else {
                batch
                    .iter()
                    .map(|tokens| self.try_decode_to_string(tokens.as_ref()))
                    .collect()
            }
        }
    }
}
