//! # Pattern Parser
//!
//! Recursive descent over the pattern text, producing a [`Node`] tree.
//! Errors carry the byte offset where parsing stopped.

use crate::{
    errors::{BCError, BCResult},
    pattern::{
        ast::{AssertKind, LookKind, Node, RepeatMode},
        class::{CategorySet, CharClass, ClassItem},
    },
};

/// Largest accepted `{n,m}` bound.
pub const MAX_REPEAT: u32 = 1000;

/// Inline flags; scoped to the enclosing group.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Flags {
    case_insensitive: bool,
    dot_all: bool,
    multi_line: bool,
}

/// Parse `pattern` into a syntax tree.
pub fn parse(pattern: &str) -> BCResult<Node> {
    let mut parser = Parser {
        pattern,
        pos: 0,
        flags: Flags::default(),
    };

    let node = parser.parse_alternation()?;
    if parser.peek().is_some() {
        // The only way out of `parse_alternation` with input left is a ')'.
        return Err(parser.error_at(parser.pos, "unbalanced parenthesis"));
    }
    Ok(node)
}

struct Parser<'p> {
    pattern: &'p str,
    pos: usize,
    flags: Flags,
}

enum ClassAtom {
    Char(char),
    Item(ClassItem),
}

enum GroupKind {
    Plain,
    Look(LookKind),
    Atomic,
}

impl<'p> Parser<'p> {
    fn error_at(
        &self,
        offset: usize,
        message: &str,
    ) -> BCError {
        BCError::PatternSyntax {
            pattern: self.pattern.to_string(),
            offset,
            message: message.to_string(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.pattern[self.pos..].chars().next()
    }

    fn peek_nth(
        &self,
        n: usize,
    ) -> Option<char> {
        self.pattern[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(
        &mut self,
        c: char,
    ) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn parse_alternation(&mut self) -> BCResult<Node> {
        let mut branches = vec![self.parse_concat()?];
        while self.eat('|') {
            branches.push(self.parse_concat()?);
        }

        Ok(if branches.len() == 1 {
            branches.swap_remove(0)
        } else {
            Node::Alternate(branches)
        })
    }

    fn parse_concat(&mut self) -> BCResult<Node> {
        let mut nodes = Vec::new();
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            let start = self.pos;
            if let Some(atom) = self.parse_atom()? {
                nodes.push(self.parse_quantifier(atom, start)?);
            }
        }

        Ok(match nodes.len() {
            0 => Node::Empty,
            1 => nodes.swap_remove(0),
            _ => Node::Concat(nodes),
        })
    }

    fn parse_quantifier(
        &mut self,
        atom: Node,
        atom_start: usize,
    ) -> BCResult<Node> {
        let (min, max) = match self.peek() {
            Some('*') => {
                self.bump();
                (0, None)
            }
            Some('+') => {
                self.bump();
                (1, None)
            }
            Some('?') => {
                self.bump();
                (0, Some(1))
            }
            Some('{') => match self.parse_counted()? {
                Some(bounds) => bounds,
                None => return Ok(atom),
            },
            _ => return Ok(atom),
        };

        if let Node::Assert(_) = atom {
            return Err(self.error_at(atom_start, "nothing to repeat"));
        }

        let mode = if self.eat('?') {
            RepeatMode::Lazy
        } else if self.eat('+') {
            RepeatMode::Possessive
        } else {
            RepeatMode::Greedy
        };

        if matches!(self.peek(), Some('*' | '+' | '?'))
            || (self.peek() == Some('{') && self.peek_counted())
        {
            return Err(self.error_at(self.pos, "multiple repeat"));
        }

        Ok(Node::Repeat {
            node: Box::new(atom),
            min,
            max,
            mode,
        })
    }

    /// Does the input at `{` form a counted repetition?
    fn peek_counted(&self) -> bool {
        let rest = &self.pattern[self.pos..];
        let Some(close) = rest.find('}') else {
            return false;
        };
        let body = &rest[1..close];
        let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        match body.split_once(',') {
            None => !body.is_empty() && digits(body),
            Some((lo, hi)) => digits(lo) && digits(hi),
        }
    }

    /// Parse `{n}`, `{n,}`, `{,m}`, or `{n,m}` at `{`.
    ///
    /// Returns `None`, consuming nothing, when the braces are a literal.
    fn parse_counted(&mut self) -> BCResult<Option<(u32, Option<u32>)>> {
        if !self.peek_counted() {
            return Ok(None);
        }
        let start = self.pos;
        let rest = &self.pattern[self.pos..];
        let close = rest.find('}').unwrap_or(rest.len());
        let body = &rest[1..close];
        self.pos += close + 1;

        let number = |s: &str| -> BCResult<u32> {
            match s.parse::<u32>() {
                Ok(n) if n <= MAX_REPEAT => Ok(n),
                _ => Err(self.error_at(start, "repetition count too large")),
            }
        };

        let (min, max) = match body.split_once(',') {
            None => {
                let n = number(body)?;
                (n, Some(n))
            }
            Some((lo, hi)) => {
                let min = if lo.is_empty() { 0 } else { number(lo)? };
                let max = if hi.is_empty() { None } else { Some(number(hi)?) };
                (min, max)
            }
        };

        if let Some(max) = max
            && max < min
        {
            return Err(self.error_at(start, "min repeat greater than max repeat"));
        }
        Ok(Some((min, max)))
    }

    /// Parse one atom; `None` for a bare flag group such as `(?i)`.
    fn parse_atom(&mut self) -> BCResult<Option<Node>> {
        let start = self.pos;
        let Some(c) = self.bump() else {
            return Ok(Some(Node::Empty));
        };

        let node = match c {
            '(' => return self.parse_group(start),
            '[' => Node::Class {
                class: self.parse_class(start)?,
                fold: self.flags.case_insensitive,
            },
            '.' => Node::Any {
                dot_all: self.flags.dot_all,
            },
            '^' => Node::Assert(if self.flags.multi_line {
                AssertKind::LineStart
            } else {
                AssertKind::TextStart
            }),
            '$' => Node::Assert(if self.flags.multi_line {
                AssertKind::LineEnd
            } else {
                AssertKind::TextEnd
            }),
            '\\' => self.parse_escape(start)?,
            '*' | '+' | '?' => return Err(self.error_at(start, "nothing to repeat")),
            c => Node::Literal {
                c,
                fold: self.flags.case_insensitive,
            },
        };
        Ok(Some(node))
    }

    fn parse_group(
        &mut self,
        start: usize,
    ) -> BCResult<Option<Node>> {
        let saved = self.flags;

        let kind = if self.eat('?') {
            let ext = self.pos;
            match self.bump() {
                Some(':') => GroupKind::Plain,
                Some('=') => GroupKind::Look(LookKind::Ahead),
                Some('!') => GroupKind::Look(LookKind::NegativeAhead),
                Some('>') => GroupKind::Atomic,
                Some('<') => match self.bump() {
                    Some('=') => GroupKind::Look(LookKind::Behind),
                    Some('!') => GroupKind::Look(LookKind::NegativeBehind),
                    _ => return Err(self.error_at(ext, "named groups are not supported")),
                },
                Some('P') => return Err(self.error_at(ext, "named groups are not supported")),
                Some(c) if c == '-' || c.is_ascii_alphabetic() => {
                    self.pos = ext;
                    return self.parse_flag_group(start, saved);
                }
                _ => return Err(self.error_at(ext, "unknown extension")),
            }
        } else {
            GroupKind::Plain
        };

        let inner = self.parse_alternation()?;
        self.flags = saved;
        if !self.eat(')') {
            return Err(self.error_at(start, "missing ), unterminated subpattern"));
        }

        Ok(Some(match kind {
            GroupKind::Plain => inner,
            GroupKind::Atomic => Node::Atomic(Box::new(inner)),
            GroupKind::Look(kind) => {
                if kind.is_behind() && inner.max_width().is_none() {
                    return Err(self.error_at(start, "look-behind requires bounded width"));
                }
                Node::Look {
                    node: Box::new(inner),
                    kind,
                }
            }
        }))
    }

    /// Parse `(?flags)` or `(?flags:...)`; the cursor sits on the first flag.
    fn parse_flag_group(
        &mut self,
        start: usize,
        saved: Flags,
    ) -> BCResult<Option<Node>> {
        let mut flags = self.flags;
        let mut enable = true;
        loop {
            let at = self.pos;
            match self.bump() {
                Some('i') => flags.case_insensitive = enable,
                Some('s') => flags.dot_all = enable,
                Some('m') => flags.multi_line = enable,
                Some('-') if enable => enable = false,
                Some('x') => return Err(self.error_at(at, "verbose mode is not supported")),
                Some(')') => {
                    // Applies to the rest of the enclosing group.
                    self.flags = flags;
                    return Ok(None);
                }
                Some(':') => {
                    self.flags = flags;
                    let inner = self.parse_alternation()?;
                    self.flags = saved;
                    if !self.eat(')') {
                        return Err(self.error_at(start, "missing ), unterminated subpattern"));
                    }
                    return Ok(Some(inner));
                }
                Some(_) => return Err(self.error_at(at, "unknown flag")),
                None => return Err(self.error_at(start, "missing ), unterminated subpattern")),
            }
        }
    }

    fn parse_escape(
        &mut self,
        start: usize,
    ) -> BCResult<Node> {
        let Some(c) = self.bump() else {
            return Err(self.error_at(start, "bad escape (end of pattern)"));
        };

        let fold = self.flags.case_insensitive;
        Ok(match c {
            'd' | 'D' | 's' | 'S' | 'w' | 'W' => Node::Class {
                class: CharClass::single(perl_item(c)),
                fold,
            },
            'p' | 'P' => Node::Class {
                class: CharClass::single(self.parse_category(start, c == 'P')?),
                fold,
            },
            'b' => Node::Assert(AssertKind::WordBoundary),
            'B' => Node::Assert(AssertKind::NotWordBoundary),
            'A' => Node::Assert(AssertKind::TextStart),
            'z' | 'Z' => Node::Assert(AssertKind::TextEnd),
            '1'..='9' => return Err(self.error_at(start, "backreferences are not supported")),
            c => Node::Literal {
                c: self.escaped_char(c, start)?,
                fold,
            },
        })
    }

    /// Resolve a literal escape; the cursor sits after `c`.
    fn escaped_char(
        &mut self,
        c: char,
        start: usize,
    ) -> BCResult<char> {
        Ok(match c {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'f' => '\x0c',
            'v' => '\x0b',
            'a' => '\x07',
            'e' => '\x1b',
            '0' => '\0',
            'x' => self.parse_hex(start, 2)?,
            'u' => self.parse_hex(start, 4)?,
            'U' => self.parse_hex(start, 8)?,
            c if !c.is_alphanumeric() => c,
            _ => return Err(self.error_at(start, "bad escape")),
        })
    }

    /// Parse `{H..}` or exactly `digits` hex digits.
    fn parse_hex(
        &mut self,
        start: usize,
        digits: usize,
    ) -> BCResult<char> {
        let rest = &self.pattern[self.pos..];
        let hex = if let Some(body) = rest.strip_prefix('{') {
            let close = body
                .find('}')
                .ok_or_else(|| self.error_at(start, "unterminated hex escape"))?;
            self.pos += close + 2;
            &body[..close]
        } else {
            let end = rest
                .char_indices()
                .nth(digits)
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            self.pos += end;
            &rest[..end]
        };

        if hex.is_empty() || hex.len() > 8 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(self.error_at(start, "incomplete hex escape"));
        }
        u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error_at(start, "invalid code point"))
    }

    /// Parse the name after `\p` / `\P`.
    fn parse_category(
        &mut self,
        start: usize,
        negated: bool,
    ) -> BCResult<ClassItem> {
        let name = if self.eat('{') {
            let rest = &self.pattern[self.pos..];
            let close = rest
                .find('}')
                .ok_or_else(|| self.error_at(start, "unterminated category escape"))?;
            self.pos += close + 1;
            &rest[..close]
        } else {
            let at = self.pos;
            match self.bump() {
                Some(c) if c.is_ascii_alphabetic() => &self.pattern[at..self.pos],
                _ => return Err(self.error_at(start, "bad category escape")),
            }
        };

        let (caret, name) = match name.strip_prefix('^') {
            Some(name) => (true, name),
            None => (false, name),
        };

        match CategorySet::from_name(name) {
            Some(set) => Ok(ClassItem::Categories {
                set,
                negated: negated != caret,
            }),
            None => Err(self.error_at(start, "unknown Unicode category")),
        }
    }

    /// Parse a bracket class; the cursor sits after `[`.
    fn parse_class(
        &mut self,
        start: usize,
    ) -> BCResult<CharClass> {
        let negated = self.eat('^');
        let mut items = Vec::new();
        let mut first = true;

        loop {
            match self.peek() {
                None => return Err(self.error_at(start, "unterminated character set")),
                Some(']') if !first => {
                    self.bump();
                    break;
                }
                _ => {}
            }
            first = false;

            let lo = match self.parse_class_atom(start)? {
                ClassAtom::Item(item) => {
                    items.push(item);
                    continue;
                }
                ClassAtom::Char(c) => c,
            };

            let is_range = self.peek() == Some('-') && !matches!(self.peek_nth(1), None | Some(']'));
            if !is_range {
                items.push(ClassItem::Range(lo, lo));
                continue;
            }

            let dash = self.pos;
            self.bump();
            match self.parse_class_atom(start)? {
                ClassAtom::Char(hi) if lo <= hi => items.push(ClassItem::Range(lo, hi)),
                _ => return Err(self.error_at(dash, "bad character range")),
            }
        }

        Ok(CharClass::new(items, negated))
    }

    fn parse_class_atom(
        &mut self,
        start: usize,
    ) -> BCResult<ClassAtom> {
        let at = self.pos;
        let Some(c) = self.bump() else {
            return Err(self.error_at(start, "unterminated character set"));
        };
        if c != '\\' {
            return Ok(ClassAtom::Char(c));
        }

        let Some(e) = self.bump() else {
            return Err(self.error_at(at, "bad escape (end of pattern)"));
        };
        Ok(match e {
            'd' | 'D' | 's' | 'S' | 'w' | 'W' => ClassAtom::Item(perl_item(e)),
            'p' | 'P' => ClassAtom::Item(self.parse_category(at, e == 'P')?),
            'b' => ClassAtom::Char('\x08'),
            e => ClassAtom::Char(self.escaped_char(e, at)?),
        })
    }
}

fn perl_item(c: char) -> ClassItem {
    match c {
        'd' => ClassItem::Categories {
            set: CategorySet::ND,
            negated: false,
        },
        'D' => ClassItem::Categories {
            set: CategorySet::ND,
            negated: true,
        },
        's' => ClassItem::Space { negated: false },
        'S' => ClassItem::Space { negated: true },
        'w' => ClassItem::Word { negated: false },
        _ => ClassItem::Word { negated: true },
    }
}
