//! Jelly file loader.
//!
//! Each line is `name = value`, split on the first `=`:
//!
//! ```text
//! greeting = "Hello, "
//! name     = "World"
//! full     = @greeting@name
//! ```
//!
//! Lines without an `=` are skipped.  There is no comment syntax; a line
//! such as `# note = "x"` declares the name `# note`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::LoadError;
use crate::store::{Declaration, Store};

const EQUALS: char = '=';

/// Split one line into a declaration, or `None` if it has no `=`.
pub fn split_declaration(line: &str) -> Option<Declaration> {
    let (name, value) = line.split_once(EQUALS)?;
    Some(Declaration::new(name, value))
}

impl Store {
    /// Build a table from the lines of `s`.
    pub fn load_str(s: &str) -> Self {
        let mut store = Store::new();
        for (i, line) in s.lines().enumerate() {
            store.load_line(i + 1, line);
        }
        store
    }

    /// Build a table from a line-oriented reader.
    pub fn load_reader(reader: impl BufRead) -> Result<Self, LoadError> {
        let mut store = Store::new();
        for (i, line) in reader.lines().enumerate() {
            store.load_line(i + 1, &line?);
        }
        Ok(store)
    }

    /// Read and parse a Jelly file from disk.
    pub fn load_file(path: &Path) -> Result<Self, LoadError> {
        let io_err = |source| LoadError::Io { path: path.to_owned(), source };
        let file = File::open(path).map_err(io_err)?;
        let store = match Self::load_reader(BufReader::new(file)) {
            Err(LoadError::Read(source)) => return Err(io_err(source)),
            other => other?,
        };
        debug!("loaded {} declarations from {}", store.len(), path.display());
        Ok(store)
    }

    fn load_line(&mut self, lineno: usize, line: &str) {
        match split_declaration(line) {
            Some(decl) => self.push(decl),
            None => debug!("line {lineno}: no '{EQUALS}', skipped"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
