//! Reference resolution.
//!
//! Resolving a name looks up its declaration, tokenizes the raw value and
//! concatenates the pieces: literals as-is, references by resolving the
//! referenced name against the same [`Store`].  Nothing is cached; a name
//! referenced twice is expanded twice.

use std::collections::HashSet;

use log::debug;

use crate::error::ResolveError;
use crate::lexer::{Lexer, Token};
use crate::store::Store;

/// How undeclared names and malformed tokens are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Undeclared names expand to `""`; malformed items are copied through
    /// unchanged.
    #[default]
    Lenient,
    /// Both are errors.
    Strict,
}

/// Resolves names against a borrowed, read-only [`Store`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'s> {
    store: &'s Store,
    mode: Mode,
}

/// One declaration being expanded: where it sits in the table, its name and
/// the tokens still to be read from its value.
#[derive(Debug)]
struct Frame<'s> {
    idx: usize,
    name: &'s str,
    lexer: Lexer<'s>,
}

/// Declarations currently being expanded, outermost first, plus the same
/// indices as a set for the cycle check.
#[derive(Debug, Default)]
struct Stack<'s> {
    frames: Vec<Frame<'s>>,
    active: HashSet<usize>,
}

impl<'s> Resolver<'s> {
    pub fn new(store: &'s Store) -> Self {
        Self { store, mode: Mode::default() }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Fully expand the value declared for `name`.
    ///
    /// Nesting is tracked on the heap, so the depth of a reference chain is
    /// bounded by memory rather than by the thread's stack.
    pub fn resolve(&self, name: &str) -> Result<String, ResolveError> {
        let mut out = String::new();
        let mut stack = Stack::default();
        self.enter(name, &mut stack)?;

        while let Some(frame) = stack.frames.last_mut() {
            let Some(token) = frame.lexer.next() else {
                stack.active.remove(&frame.idx);
                stack.frames.pop();
                continue;
            };
            match token {
                Token::Literal(text) => out.push_str(&text),
                Token::Reference(r) => self.enter(&r, &mut stack)?,
                Token::Malformed(text) => match self.mode {
                    Mode::Lenient => {
                        debug!("'{}': keeping malformed item {text:?} as-is", frame.name);
                        out.push_str(&text);
                    }
                    Mode::Strict => {
                        let name = frame.name.to_owned();
                        return Err(ResolveError::Malformed { name, text });
                    }
                },
            }
        }
        Ok(out)
    }

    /// Push a frame for `name`, or do nothing if it is undeclared and the
    /// mode allows that.
    fn enter(&self, name: &str, stack: &mut Stack<'s>) -> Result<(), ResolveError> {
        let Some((idx, decl)) = self.store.find(name) else {
            return match self.mode {
                Mode::Lenient => {
                    debug!("'{name}' is not declared");
                    Ok(())
                }
                Mode::Strict => Err(ResolveError::Undefined { name: name.to_owned() }),
            };
        };

        // Identity is the matched declaration, so `A` and `a` are the same
        // frame.
        if !stack.active.insert(idx) {
            let pos = stack.frames.iter().position(|f| f.idx == idx).unwrap_or_default();
            let chain = stack.frames[pos..]
                .iter()
                .map(|f| f.name.to_owned())
                .chain(std::iter::once(decl.name.clone()))
                .collect();
            return Err(ResolveError::CyclicReference { chain });
        }

        stack.frames.push(Frame { idx, name: &decl.name, lexer: Lexer::new(&decl.raw_value) });
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
