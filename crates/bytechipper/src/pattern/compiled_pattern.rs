//! # Compiled Patterns

use core::ops::Range;

use crate::{
    errors::BCResult,
    pattern::{executor::Executor, parser::parse, program::Program},
};

/// Default per-search step budget.
pub const DEFAULT_MAX_STEPS: usize = 10_000_000;

/// Resource limits for a single search.
///
/// The step budget also caps chunk length: a single match needs at least
/// one step per code point, so one unbroken run of letters or digits longer
/// than a few million code points fails with `MatchTimeout`. Raise
/// `max_steps` for such inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchLimits {
    /// Maximum executed instructions per [`CompiledPattern::find`] call.
    pub max_steps: usize,
}

impl Default for MatchLimits {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// A successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'t> {
    text: &'t str,
    start: usize,
    end: usize,
}

impl<'t> Match<'t> {
    /// Start byte offset.
    pub fn start(&self) -> usize {
        self.start
    }

    /// End byte offset (exclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    /// The byte range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Is this a zero-length match?
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The matched text.
    pub fn as_str(&self) -> &'t str {
        &self.text[self.start..self.end]
    }
}

/// An immutable compiled pattern.
///
/// Compiled patterns are `Send + Sync`; all search state lives on the stack
/// of each [`CompiledPattern::find`] call.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: String,
    program: Program,
    limits: MatchLimits,
}

impl CompiledPattern {
    /// Parse and compile a pattern with default limits.
    ///
    /// ## Arguments
    /// * `pattern` - the pattern source.
    ///
    /// ## Returns
    /// A `Result<CompiledPattern>`; syntax errors carry the failing offset.
    pub fn compile(pattern: &str) -> BCResult<Self> {
        let node = parse(pattern)?;
        let program = Program::compile(pattern, &node)?;

        log::debug!(
            "compiled pattern ({} programs, {} instructions): {pattern:?}",
            program.progs.len(),
            program.size()
        );

        Ok(Self {
            pattern: pattern.to_string(),
            program,
            limits: MatchLimits::default(),
        })
    }

    /// Replace the search limits.
    pub fn with_limits(
        self,
        limits: MatchLimits,
    ) -> Self {
        Self { limits, ..self }
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The search limits.
    pub fn limits(&self) -> MatchLimits {
        self.limits
    }

    /// The compiled program.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Find the leftmost match at or after `start`.
    ///
    /// A `start` inside a code point is rounded up to the next boundary;
    /// a `start` past the end of `text` finds nothing.
    ///
    /// ## Arguments
    /// * `text` - the haystack.
    /// * `start` - the byte offset to search from.
    ///
    /// ## Returns
    /// `Ok(None)` when nothing matches; `MatchTimeout` when the step budget
    /// is exhausted.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    pub fn find<'t>(
        &self,
        text: &'t str,
        start: usize,
    ) -> BCResult<Option<Match<'t>>> {
        if start > text.len() {
            return Ok(None);
        }
        let mut start = start;
        while !text.is_char_boundary(start) {
            start += 1;
        }

        let found = Executor::new(&self.program, text, self.limits).find_at(start)?;
        Ok(found.map(|(start, end)| Match { text, start, end }))
    }

    /// Does the pattern match anywhere in `text`?
    pub fn is_match(
        &self,
        text: &str,
    ) -> BCResult<bool> {
        Ok(self.find(text, 0)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BCError;

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompiledPattern>();
    }

    #[test]
    fn test_find() {
        let pattern = CompiledPattern::compile(r" ?\p{L}+").unwrap();
        assert_eq!(pattern.as_str(), r" ?\p{L}+");
        assert_eq!(pattern.limits(), MatchLimits::default());

        let text = "12 héllo world";
        let m = pattern.find(text, 0).unwrap().unwrap();
        assert_eq!(m.range(), 2..9);
        assert_eq!(m.as_str(), " héllo");
        assert!(!m.is_empty());

        let m = pattern.find(text, m.end()).unwrap().unwrap();
        assert_eq!(m.as_str(), " world");
        assert_eq!(pattern.find(text, m.end()).unwrap(), None);
        assert_eq!(pattern.find(text, 100).unwrap(), None);

        // Offset 5 splits 'é'; the search resumes at 6.
        let m = pattern.find(text, 5).unwrap().unwrap();
        assert_eq!((m.start(), m.end()), (6, 9));

        assert!(pattern.is_match("x").unwrap());
        assert!(!pattern.is_match("12").unwrap());
    }

    #[test]
    fn test_limits() {
        let pattern = CompiledPattern::compile(r"(a|aa)+b")
            .unwrap()
            .with_limits(MatchLimits { max_steps: 10 });
        assert!(matches!(
            pattern.find(&"a".repeat(32), 0),
            Err(BCError::MatchTimeout { steps: 10 })
        ));
    }

    #[test]
    fn test_budget_caps_chunk_length() {
        let text = "a".repeat(1000);
        let pattern = CompiledPattern::compile(r"\p{L}+").unwrap();

        let tight = pattern.clone().with_limits(MatchLimits { max_steps: 500 });
        assert!(matches!(
            tight.find(&text, 0),
            Err(BCError::MatchTimeout { steps: 500 })
        ));

        let roomy = pattern.with_limits(MatchLimits { max_steps: 100_000 });
        assert_eq!(roomy.find(&text, 0).unwrap().unwrap().range(), 0..1000);
    }

    #[test]
    fn test_compile_error() {
        assert!(matches!(
            CompiledPattern::compile("a(b"),
            Err(BCError::PatternSyntax { .. })
        ));
    }
}
