//! The declaration table.
//!
//! An append-only, ordered list of `name = value` declarations.  Lookups are
//! case-insensitive and return the *first* declaration with a matching name;
//! later duplicates are kept but never reached.

use std::collections::HashMap;

use crate::error::ResolveError;
use crate::resolve::{Mode, Resolver};

/// One `name = value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    /// Unparsed right-hand side, whitespace-trimmed.
    pub raw_value: String,
}

impl Declaration {
    pub fn new(name: impl Into<String>, raw_value: impl Into<String>) -> Self {
        let (name, raw_value): (String, String) = (name.into(), raw_value.into());
        Self { name: name.trim().to_owned(), raw_value: raw_value.trim().to_owned() }
    }

    /// Returns `true` if this declaration answers to `name`.
    pub fn is_named(&self, name: &str) -> bool {
        names_equal(&self.name, name)
    }
}

/// Unicode-aware case-insensitive comparison.
fn names_equal(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Lookup key: the name lowercased char by char, consistent with
/// [`names_equal`].
fn fold_case(name: &str) -> String {
    name.chars().flat_map(char::to_lowercase).collect()
}

/// Ordered table of declarations.
#[derive(Debug, Default, Clone)]
pub struct Store {
    items: Vec<Declaration>,
    /// Case-folded name → position of its first declaration.
    first: HashMap<String, usize>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, raw_value)` pairs in order.
    pub fn from_pairs<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Append a declaration.  Duplicates are kept.
    pub fn insert(&mut self, name: impl Into<String>, raw_value: impl Into<String>) {
        self.push(Declaration::new(name, raw_value));
    }

    pub fn push(&mut self, decl: Declaration) {
        self.first.entry(fold_case(&decl.name)).or_insert(self.items.len());
        self.items.push(decl);
    }

    /// Raw value of the first declaration named `name`.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.find(name).map(|(_, d)| d.raw_value.as_str())
    }

    /// Position and declaration of the first match for `name`.  The query
    /// is not trimmed; names were trimmed when inserted.
    pub(crate) fn find(&self, name: &str) -> Option<(usize, &Declaration)> {
        let idx = *self.first.get(&fold_case(name))?;
        Some((idx, &self.items[idx]))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Iterate over all declarations in source order, duplicates included.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.items.iter()
    }

    /// Each distinct name once, spelled as first declared, in source order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .enumerate()
            .filter(move |(i, d)| self.first.get(&fold_case(&d.name)) == Some(i))
            .map(|(_, d)| d.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve `name` in lenient mode.
    pub fn resolve(&self, name: &str) -> Result<String, ResolveError> {
        Resolver::new(self).resolve(name)
    }

    /// Resolve `name`, collapsing every failure to an empty string.
    ///
    /// Undeclared names give `""` without comment; a cyclic reference is
    /// logged at `warn` before being swallowed.
    pub fn get(&self, name: &str) -> String {
        match self.resolve(name) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("resolving '{name}': {e}");
                String::new()
            }
        }
    }

    /// Resolve every distinct name, in source order.
    pub fn resolve_all(&self, mode: Mode) -> Result<Vec<(String, String)>, ResolveError> {
        let resolver = Resolver::new(self).with_mode(mode);
        self.names()
            .map(|name| resolver.resolve(name).map(|value| (name.to_owned(), value)))
            .collect()
    }
}

impl<N, V> FromIterator<(N, V)> for Store
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut store = Store::new();
        for (name, value) in iter {
            store.insert(name, value);
        }
        store
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
