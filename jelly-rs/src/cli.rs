//! Command-line argument parsing.
//!
//! Usage:
//!   jelly [-s] [-d] <file> [<name>...]

use std::path::PathBuf;

use crate::resolve::Mode;

pub const USAGE: &str = "Usage: jelly [-s] [-d] <file> [<name>...]";

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug)]
pub struct CliArgs {
    /// Jelly file to load.
    pub file: PathBuf,
    /// Names to resolve; empty means every declared name.
    pub names: Vec<String>,
    /// Strict resolution (`-s`).
    pub mode: Mode,
    /// Debug logging (`-d`).
    pub debug: bool,
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(raw.get(1..).unwrap_or_default())
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut mode = Mode::Lenient;
    let mut debug = false;
    let mut positional: Vec<String> = Vec::new();

    let mut iter = argv.iter();
    while let Some(arg) = iter.next() {
        // `--` ends flag processing.
        if arg == "--" {
            positional.extend(iter.by_ref().cloned());
            break;
        }

        // Non-flag argument.
        if !arg.starts_with('-') || arg == "-" {
            positional.push(arg.clone());
            continue;
        }

        for ch in arg[1..].chars() {
            match ch {
                's' => mode = Mode::Strict,
                'd' => debug = true,
                c => return Err(format!("unknown option: -{c}")),
            }
        }
    }

    if positional.is_empty() {
        return Err("missing file argument".to_owned());
    }
    let file = PathBuf::from(positional.remove(0));

    Ok(CliArgs { file, names: positional, mode, debug })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|&s| s.to_owned()).collect()
    }

    #[test]
    fn file_only() {
        let a = parse_argv(&argv(&["app.jelly"])).unwrap();
        assert_eq!(a.file, PathBuf::from("app.jelly"));
        assert!(a.names.is_empty());
        assert_eq!(a.mode, Mode::Lenient);
        assert!(!a.debug);
    }

    #[test]
    fn file_and_names() {
        let a = parse_argv(&argv(&["app.jelly", "full", "name"])).unwrap();
        assert_eq!(a.names, ["full", "name"]);
    }

    #[test]
    fn bool_flags() {
        let a = parse_argv(&argv(&["-s", "-d", "app.jelly"])).unwrap();
        assert_eq!(a.mode, Mode::Strict);
        assert!(a.debug);
    }

    #[test]
    fn combined_bool_flags() {
        let a = parse_argv(&argv(&["-sd", "app.jelly"])).unwrap();
        assert_eq!(a.mode, Mode::Strict);
        assert!(a.debug);
    }

    #[test]
    fn flags_after_file() {
        let a = parse_argv(&argv(&["app.jelly", "-s", "x"])).unwrap();
        assert_eq!(a.mode, Mode::Strict);
        assert_eq!(a.names, ["x"]);
    }

    #[test]
    fn double_dash_ends_flags() {
        let a = parse_argv(&argv(&["--", "-odd.jelly", "-s"])).unwrap();
        assert_eq!(a.file, PathBuf::from("-odd.jelly"));
        assert_eq!(a.names, ["-s"]);
        assert_eq!(a.mode, Mode::Lenient);
    }

    #[test]
    fn missing_file() {
        assert!(parse_argv(&argv(&[])).is_err());
        assert!(parse_argv(&argv(&["-s"])).is_err());
    }

    #[test]
    fn unknown_flag() {
        assert!(parse_argv(&argv(&["-z", "app.jelly"])).is_err());
    }
}
