//! # Pattern Matching
//!
//! A self-contained backtracking matcher for the pre-tokenization patterns
//! used by byte-pair tokenizers.
//!
//! Supported syntax:
//! * literals, escapes (`\n`, `\x{..}`, `\u{..}`), `.`;
//! * classes `[...]`, `[^...]`, ranges, `\s \S \d \D \w \W`;
//! * Unicode categories `\p{L}`, `\p{Lu}`, `\P{N}`, `\pL`;
//! * groups `(...)`, `(?:...)`, `(?i:...)`, inline flags `(?i)`, `(?s)`, `(?m)`;
//! * alternation, `* + ? {n} {n,} {n,m}`, with lazy `?` and possessive `+` forms;
//! * atomic groups `(?>...)`;
//! * lookahead `(?=...)`, `(?!...)` and bounded lookbehind `(?<=...)`, `(?<!...)`;
//! * anchors `^ $ \A \z \b \B`.
//!
//! Alternation is leftmost-first: the earliest alternative that leads to an
//! overall match wins, not the longest.
//!
//! ## Example
//!
//! ```rust
//! use bytechipper::pattern::CompiledPattern;
//!
//! let pattern = CompiledPattern::compile(r"\s+(?!\S)|\s+").unwrap();
//! let m = pattern.find("a   b", 1).unwrap().unwrap();
//! assert_eq!(m.range(), 1..3);
//! ```

pub mod ast;
pub mod class;
pub mod parser;
pub mod program;

mod compiled_pattern;
mod executor;

#[doc(inline)]
pub use compiled_pattern::*;

use crate::errors::BCResult;

/// Compile a pattern with default limits.
///
/// See [`CompiledPattern::compile`].
pub fn compile(pattern: &str) -> BCResult<CompiledPattern> {
    CompiledPattern::compile(pattern)
}

/// Find the leftmost match of `pattern` in `text` at or after `start`.
///
/// See [`CompiledPattern::find`].
pub fn find<'t>(
    pattern: &CompiledPattern,
    text: &'t str,
    start: usize,
) -> BCResult<Option<Match<'t>>> {
    pattern.find(text, start)
}
