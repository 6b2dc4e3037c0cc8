//! # Error Types

use std::string::FromUtf8Error;

/// Errors from bytechipper operations.
#[derive(Debug, thiserror::Error)]
pub enum BytechipperError {
    /// A split pattern could not be parsed or compiled.
    #[error("pattern syntax error at offset {offset} in {pattern:?}: {message}")]
    PatternSyntax {
        /// The offending pattern.
        pattern: String,

        /// Byte offset into the pattern where the problem was found.
        offset: usize,

        /// What went wrong.
        message: String,
    },

    /// The matcher exhausted its step budget.
    #[error("pattern match exceeded the step budget ({steps} steps)")]
    MatchTimeout {
        /// The budget that was exceeded.
        steps: usize,
    },

    /// The segmenter observed a match that breaks chunk coverage.
    #[error("segmentation error: {0}")]
    Segmentation(String),

    /// A special token literal appeared in text without being allowed.
    #[error("encountered text corresponding to disallowed special token {token:?}")]
    DisallowedSpecialToken {
        /// The special token literal.
        token: String,
    },

    /// A token id has no byte mapping.
    #[error("unknown token id: {token}")]
    UnknownTokenId {
        /// The unmapped token id.
        token: u64,
    },

    /// A byte sequence is neither a rank-table entry nor a special token.
    #[error("unable to encode the piece as a single token: {0:?}")]
    UnknownToken(String),

    /// Decoded bytes were not valid UTF-8.
    #[error("decode error: {0}")]
    Decode(#[from] FromUtf8Error),

    /// No scheme is registered under the name.
    #[error("unknown encoding {name:?}; available encodings: {available:?}")]
    UnknownEncoding {
        /// The requested name.
        name: String,

        /// The registered scheme names.
        available: Vec<String>,
    },

    /// No scheme could be resolved for the model name.
    #[error("could not automatically map {0:?} to a tokeniser")]
    UnknownModel(String),

    /// A rank table is not well-formed.
    #[error("broken rank table: {0}")]
    BrokenRankTable(String),

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// Token value out of range for the target type.
    #[error("token out of range")]
    TokenOutOfRange,

    /// Parse error (base64, integer, etc.)
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Short alias for [`BytechipperError`].
pub type BCError = BytechipperError;

/// Result type for bytechipper operations.
pub type BCResult<T> = core::result::Result<T, BytechipperError>;
