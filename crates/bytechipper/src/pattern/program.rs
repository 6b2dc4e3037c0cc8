//! # Instruction Programs
//!
//! A pattern compiles to a set of flat instruction programs: one main
//! program plus one sub-program per lookaround body, atomic group, and
//! possessive repetition. Counted repetition is unrolled.

use crate::{
    errors::{BCError, BCResult},
    pattern::{
        ast::{AssertKind, LookKind, Node, RepeatMode},
        class::{CharClass, simple_fold},
    },
};

/// Upper bound on the total instruction count of a compiled pattern.
pub const MAX_PROGRAM_SIZE: usize = 1 << 20;

/// A single VM instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Inst {
    /// Consume exactly this code point.
    Char(char),

    /// Consume a code point whose simple fold equals this (already folded) one.
    CharFold(char),

    /// Consume a code point in `classes[class]`.
    Class {
        /// Index into [`Program::classes`].
        class: usize,

        /// Match case-insensitively.
        fold: bool,
    },

    /// Consume any code point; `\n` only with `dot_all`.
    Any {
        /// Also match `\n`.
        dot_all: bool,
    },

    /// Check a zero-width assertion.
    Assert(AssertKind),

    /// Continue at `primary`; on failure, resume at `secondary`.
    Split {
        /// Preferred branch.
        primary: usize,

        /// Fallback branch.
        secondary: usize,
    },

    /// Continue at the target.
    Jump(usize),

    /// Run `progs[sub]` as a zero-width lookaround.
    Look {
        /// Index into [`Program::progs`].
        sub: usize,

        /// Direction and polarity.
        kind: LookKind,
    },

    /// Run `progs[sub]` once and commit to its first match.
    Atomic {
        /// Index into [`Program::progs`].
        sub: usize,
    },

    /// Report a match ending at the current position.
    Match,
}

/// A compiled pattern's instruction programs.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// All programs; `progs[main]` is the entry point.
    pub progs: Vec<Vec<Inst>>,

    /// Per-program bound on consumed code points (used to limit lookbehind scans).
    pub widths: Vec<Option<usize>>,

    /// Character classes referenced by [`Inst::Class`].
    pub classes: Vec<CharClass>,

    /// Index of the entry program.
    pub main: usize,
}

impl Program {
    /// Compile a syntax tree.
    ///
    /// ## Arguments
    /// * `pattern` - the source text, for error reporting.
    /// * `node` - the parsed pattern.
    pub fn compile(
        pattern: &str,
        node: &Node,
    ) -> BCResult<Self> {
        let mut compiler = Compiler {
            pattern,
            progs: Vec::new(),
            widths: Vec::new(),
            classes: Vec::new(),
            size: 0,
        };
        let main = compiler.compile_sub(node)?;

        Ok(Self {
            progs: compiler.progs,
            widths: compiler.widths,
            classes: compiler.classes,
            main,
        })
    }

    /// Total instruction count over all programs.
    pub fn size(&self) -> usize {
        self.progs.iter().map(Vec::len).sum()
    }
}

struct Compiler<'a> {
    pattern: &'a str,
    progs: Vec<Vec<Inst>>,
    widths: Vec<Option<usize>>,
    classes: Vec<CharClass>,
    size: usize,
}

impl Compiler<'_> {
    fn push(
        &mut self,
        out: &mut Vec<Inst>,
        inst: Inst,
    ) -> BCResult<usize> {
        self.size += 1;
        if self.size > MAX_PROGRAM_SIZE {
            return Err(BCError::PatternSyntax {
                pattern: self.pattern.to_string(),
                offset: 0,
                message: format!("compiled pattern exceeds {MAX_PROGRAM_SIZE} instructions"),
            });
        }
        out.push(inst);
        Ok(out.len() - 1)
    }

    fn add_program(
        &mut self,
        mut insts: Vec<Inst>,
        width: Option<usize>,
    ) -> BCResult<usize> {
        self.push(&mut insts, Inst::Match)?;
        self.progs.push(insts);
        self.widths.push(width);
        Ok(self.progs.len() - 1)
    }

    fn compile_sub(
        &mut self,
        node: &Node,
    ) -> BCResult<usize> {
        let mut insts = Vec::new();
        self.emit(node, &mut insts)?;
        self.add_program(insts, node.max_width())
    }

    fn emit(
        &mut self,
        node: &Node,
        out: &mut Vec<Inst>,
    ) -> BCResult<()> {
        match node {
            Node::Empty => {}
            &Node::Literal { c, fold } => {
                let inst = if fold {
                    Inst::CharFold(simple_fold(c))
                } else {
                    Inst::Char(c)
                };
                self.push(out, inst)?;
            }
            &Node::Any { dot_all } => {
                self.push(out, Inst::Any { dot_all })?;
            }
            Node::Class { class, fold } => {
                self.classes.push(class.clone());
                let class = self.classes.len() - 1;
                self.push(out, Inst::Class { class, fold: *fold })?;
            }
            &Node::Assert(kind) => {
                self.push(out, Inst::Assert(kind))?;
            }
            Node::Concat(nodes) => {
                for n in nodes {
                    self.emit(n, out)?;
                }
            }
            Node::Alternate(branches) => {
                let mut exits = Vec::with_capacity(branches.len());
                let (last, init) = match branches.split_last() {
                    Some(split) => split,
                    None => return Ok(()),
                };
                for branch in init {
                    let split = self.push(out, Inst::Jump(0))?;
                    self.emit(branch, out)?;
                    exits.push(self.push(out, Inst::Jump(0))?);
                    let next = out.len();
                    out[split] = Inst::Split {
                        primary: split + 1,
                        secondary: next,
                    };
                }
                self.emit(last, out)?;

                let end = out.len();
                for exit in exits {
                    out[exit] = Inst::Jump(end);
                }
            }
            Node::Repeat {
                node,
                min,
                max,
                mode,
            } => match mode {
                RepeatMode::Greedy => self.emit_repeat(node, *min, *max, true, out)?,
                RepeatMode::Lazy => self.emit_repeat(node, *min, *max, false, out)?,
                RepeatMode::Possessive => {
                    let mut insts = Vec::new();
                    self.emit_repeat(node, *min, *max, true, &mut insts)?;
                    let sub = self.add_program(insts, None)?;
                    self.push(out, Inst::Atomic { sub })?;
                }
            },
            Node::Look { node, kind } => {
                let sub = self.compile_sub(node)?;
                self.push(out, Inst::Look { sub, kind: *kind })?;
            }
            Node::Atomic(node) => {
                let sub = self.compile_sub(node)?;
                self.push(out, Inst::Atomic { sub })?;
            }
        }
        Ok(())
    }

    fn emit_repeat(
        &mut self,
        node: &Node,
        min: u32,
        max: Option<u32>,
        greedy: bool,
        out: &mut Vec<Inst>,
    ) -> BCResult<()> {
        let split = |body: usize, exit: usize| {
            if greedy {
                Inst::Split {
                    primary: body,
                    secondary: exit,
                }
            } else {
                Inst::Split {
                    primary: exit,
                    secondary: body,
                }
            }
        };

        for _ in 0..min {
            self.emit(node, out)?;
        }

        match max {
            None => {
                let head = self.push(out, Inst::Jump(0))?;
                self.emit(node, out)?;
                self.push(out, Inst::Jump(head))?;
                let end = out.len();
                out[head] = split(head + 1, end);
            }
            Some(max) => {
                let mut heads = Vec::new();
                for _ in min..max {
                    heads.push(self.push(out, Inst::Jump(0))?);
                    self.emit(node, out)?;
                }
                let end = out.len();
                for head in heads {
                    out[head] = split(head + 1, end);
                }
            }
        }
        Ok(())
    }
}
