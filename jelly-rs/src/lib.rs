//! Jelly: `name = value` declaration files.
//!
//! A value concatenates double-quoted literals and `@name` references to
//! other declarations in the same file:
//!
//! ```rust
//! use jelly::Store;
//!
//! let store = Store::load_str(
//!     "greeting = \"Hello, \"\n\
//!      name = \"World\"\n\
//!      full = @greeting@name",
//! );
//! assert_eq!(store.get("FULL"), "Hello, World");
//! assert_eq!(store.get("missing"), "");
//! ```

pub mod cli;
pub mod error;
pub mod lexer;
pub mod loader;
pub mod resolve;
pub mod store;

// Re-exports for convenience.
pub use error::{LoadError, ResolveError};
pub use lexer::{tokenize, Token};
pub use resolve::{Mode, Resolver};
pub use store::{Declaration, Store};
