//! Error types for loading and resolving Jelly declarations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while resolving a name to its final string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A declaration references itself, directly or through other names.
    /// `chain` runs from the first occurrence back to the repeated name.
    #[error("cyclic reference: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// Strict mode only: the name has no declaration.
    #[error("undefined name '{name}'")]
    Undefined { name: String },

    /// Strict mode only: the value of `name` contains an item that is
    /// neither a quoted literal nor an `@` reference.
    #[error("malformed token {text:?} in value of '{name}'")]
    Malformed { name: String, text: String },
}

/// Failure while reading declarations from a stream or file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read error: {0}")]
    Read(#[from] io::Error),
}
