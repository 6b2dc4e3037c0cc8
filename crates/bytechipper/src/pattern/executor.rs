//! # Backtracking Executor
//!
//! Depth-first execution of a [`Program`] with an explicit backtrack stack.
//!
//! Termination is guaranteed two ways:
//! * every `(program, pc, pos)` state runs at most once per search, since a
//!   state's outcome depends only on the state itself;
//! * a step budget caps the total instruction count per search.
//!
//! Lookaround and atomic sub-programs are memoized per start position.

use crate::{
    errors::{BCError, BCResult},
    pattern::{
        ast::{AssertKind, LookKind},
        class::{is_word_char, simple_fold},
        compiled_pattern::MatchLimits,
        program::{Inst, Program},
    },
    types::{BCHashMap, BCHashSet},
};

/// Reusable search state over one haystack.
#[derive(Debug, Clone)]
pub(crate) struct Executor<'p, 't> {
    program: &'p Program,
    text: &'t str,
    max_steps: usize,
    steps: usize,

    /// Per-program states known not to lead to a match.
    visited: Vec<BCHashSet<(usize, usize)>>,

    /// `(sub, pos) -> did the body match`.
    look_memo: BCHashMap<(usize, usize), bool>,

    /// `(sub, pos) -> committed end`.
    atomic_memo: BCHashMap<(usize, usize), Option<usize>>,
}

impl<'p, 't> Executor<'p, 't> {
    pub(crate) fn new(
        program: &'p Program,
        text: &'t str,
        limits: MatchLimits,
    ) -> Self {
        Self {
            program,
            text,
            max_steps: limits.max_steps,
            steps: 0,
            visited: vec![BCHashSet::default(); program.progs.len()],
            look_memo: Default::default(),
            atomic_memo: Default::default(),
        }
    }

    /// Find the leftmost match starting at or after `start`.
    ///
    /// ## Returns
    /// The `(start, end)` byte range of the match, if any.
    pub(crate) fn find_at(
        &mut self,
        start: usize,
    ) -> BCResult<Option<(usize, usize)>> {
        self.reset();

        let mut pos = start;
        loop {
            if let Some(end) = self.run(self.program.main, pos, None)? {
                return Ok(Some((pos, end)));
            }
            match self.char_at(pos) {
                Some(c) => pos += c.len_utf8(),
                None => return Ok(None),
            }
        }
    }

    fn reset(&mut self) {
        self.steps = 0;
        for set in &mut self.visited {
            set.clear();
        }
        self.look_memo.clear();
        self.atomic_memo.clear();
    }

    fn char_at(
        &self,
        pos: usize,
    ) -> Option<char> {
        self.text.get(pos..)?.chars().next()
    }

    fn char_before(
        &self,
        pos: usize,
    ) -> Option<char> {
        self.text.get(..pos)?.chars().next_back()
    }

    /// Run `progs[prog]` from `start`.
    ///
    /// With `required_end`, only a match ending exactly there counts;
    /// such runs keep their own visited set since the outcome of a state
    /// then also depends on the required end.
    fn run(
        &mut self,
        prog: usize,
        start: usize,
        required_end: Option<usize>,
    ) -> BCResult<Option<usize>> {
        let program = self.program;
        let insts = &program.progs[prog];

        let mut local_visited: BCHashSet<(usize, usize)> = Default::default();
        let mut stack: Vec<(usize, usize)> = vec![(0, start)];

        while let Some((mut pc, mut pos)) = stack.pop() {
            loop {
                let fresh = match required_end {
                    None => self.visited[prog].insert((pc, pos)),
                    Some(_) => local_visited.insert((pc, pos)),
                };
                if !fresh {
                    break;
                }

                self.steps += 1;
                if self.steps > self.max_steps {
                    return Err(BCError::MatchTimeout {
                        steps: self.max_steps,
                    });
                }

                match insts[pc] {
                    Inst::Char(expected) => match self.char_at(pos) {
                        Some(c) if c == expected => {
                            pos += c.len_utf8();
                            pc += 1;
                        }
                        _ => break,
                    },
                    Inst::CharFold(expected) => match self.char_at(pos) {
                        Some(c) if simple_fold(c) == expected => {
                            pos += c.len_utf8();
                            pc += 1;
                        }
                        _ => break,
                    },
                    Inst::Class { class, fold } => match self.char_at(pos) {
                        Some(c) if program.classes[class].matches(c, fold) => {
                            pos += c.len_utf8();
                            pc += 1;
                        }
                        _ => break,
                    },
                    Inst::Any { dot_all } => match self.char_at(pos) {
                        Some(c) if dot_all || c != '\n' => {
                            pos += c.len_utf8();
                            pc += 1;
                        }
                        _ => break,
                    },
                    Inst::Assert(kind) => {
                        if !self.check_assert(kind, pos) {
                            break;
                        }
                        pc += 1;
                    }
                    Inst::Split { primary, secondary } => {
                        stack.push((secondary, pos));
                        pc = primary;
                    }
                    Inst::Jump(target) => pc = target,
                    Inst::Look { sub, kind } => {
                        if !self.look(sub, kind, pos)? {
                            break;
                        }
                        pc += 1;
                    }
                    Inst::Atomic { sub } => match self.atomic(sub, pos)? {
                        Some(end) => {
                            pos = end;
                            pc += 1;
                        }
                        None => break,
                    },
                    Inst::Match => {
                        if required_end.is_none_or(|end| end == pos) {
                            if required_end.is_none() && prog != program.main {
                                // States explored on the way to a success are not
                                // failures; the memo tables carry the result.
                                self.visited[prog].clear();
                            }
                            return Ok(Some(pos));
                        }
                        break;
                    }
                }
            }
        }

        Ok(None)
    }

    fn look(
        &mut self,
        sub: usize,
        kind: LookKind,
        pos: usize,
    ) -> BCResult<bool> {
        let matched = match self.look_memo.get(&(sub, pos)) {
            Some(&matched) => matched,
            None => {
                let matched = if kind.is_behind() {
                    self.look_behind(sub, pos)?
                } else {
                    self.run(sub, pos, None)?.is_some()
                };
                self.look_memo.insert((sub, pos), matched);
                matched
            }
        };
        Ok(matched != kind.is_negated())
    }

    /// Try every start `q <= pos`, nearest first, for a body match ending at `pos`.
    fn look_behind(
        &mut self,
        sub: usize,
        pos: usize,
    ) -> BCResult<bool> {
        let max_back = self.program.widths[sub];
        let mut start = pos;
        let mut back = 0;
        loop {
            if self.run(sub, start, Some(pos))?.is_some() {
                return Ok(true);
            }
            if max_back.is_some_and(|max| back >= max) {
                return Ok(false);
            }
            match self.char_before(start) {
                Some(c) => {
                    start -= c.len_utf8();
                    back += 1;
                }
                None => return Ok(false),
            }
        }
    }

    fn atomic(
        &mut self,
        sub: usize,
        pos: usize,
    ) -> BCResult<Option<usize>> {
        if let Some(&end) = self.atomic_memo.get(&(sub, pos)) {
            return Ok(end);
        }
        let end = self.run(sub, pos, None)?;
        self.atomic_memo.insert((sub, pos), end);
        Ok(end)
    }

    fn check_assert(
        &self,
        kind: AssertKind,
        pos: usize,
    ) -> bool {
        match kind {
            AssertKind::TextStart => pos == 0,
            AssertKind::TextEnd => pos == self.text.len(),
            AssertKind::LineStart => pos == 0 || self.char_before(pos) == Some('\n'),
            AssertKind::LineEnd => pos == self.text.len() || self.char_at(pos) == Some('\n'),
            AssertKind::WordBoundary => self.at_word_boundary(pos),
            AssertKind::NotWordBoundary => !self.at_word_boundary(pos),
        }
    }

    fn at_word_boundary(
        &self,
        pos: usize,
    ) -> bool {
        let before = self.char_before(pos).is_some_and(is_word_char);
        let after = self.char_at(pos).is_some_and(is_word_char);
        before != after
    }
}
