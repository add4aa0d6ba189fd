//! Tokenizer for the right-hand side of a declaration.
//!
//! A value is a run of double-quoted literals and `@name` references:
//!
//! ```text
//! full = "Hello, " @name "!"
//! ```
//!
//! Scanning is a four-state machine driven one character at a time by
//! [`step`].  A backslash escapes exactly the next character; only `"` and
//! `\` are affected by it, every other character is dispatched as if the
//! escape were not there.
//!
//! | Character | `Normal`              | `InString`            |
//! |-----------|-----------------------|-----------------------|
//! | `@`       | start reference       | append                |
//! | `"`       | start literal         | close literal         |
//! | `\`       | → `EscapeNormal`      | → `EscapeInString`    |
//! | space     | end item              | append                |
//! | other     | append                | append                |
//!
//! In either escape state `"` is appended verbatim and `\` just cancels the
//! escape.

use std::fmt;
use std::str::Chars;

const VARIABLE: char = '@';
const QUOTE: char = '"';
const ESCAPE: char = '\\';

/// One scanned item of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Quoted text, delimiters removed.
    Literal(String),
    /// `@name`; holds `name`.
    Reference(String),
    /// Anything else: a bare word, or a string still open at end of input.
    /// Holds the item exactly as scanned.
    Malformed(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(text) => write!(f, "\"{}\"", text.replace(QUOTE, "\\\"")),
            Token::Reference(name) => write!(f, "{VARIABLE}{name}"),
            Token::Malformed(raw) => f.write_str(raw),
        }
    }
}

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Normal,
    InString,
    EscapeNormal,
    EscapeInString,
}

impl State {
    pub fn in_string(self) -> bool {
        matches!(self, State::InString | State::EscapeInString)
    }

    fn unescaped(self) -> State {
        match self {
            State::EscapeNormal => State::Normal,
            State::EscapeInString => State::InString,
            s => s,
        }
    }
}

/// What the scanner does with the character it just read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Add the character to the current item.
    Append(char),
    /// Drop the character.
    Skip,
    /// End the current item, if any.
    Break,
    /// End the current item, if any, and begin a new one with this character.
    Start(char),
    /// The closing quote: the current item is a complete literal.
    Close,
}

/// The transition function.
pub fn step(state: State, ch: char) -> (State, Action) {
    match (state, ch) {
        (State::EscapeNormal | State::EscapeInString, QUOTE) => {
            (state.unescaped(), Action::Append(QUOTE))
        }
        (State::EscapeNormal | State::EscapeInString, ESCAPE) => (state.unescaped(), Action::Skip),
        (State::EscapeNormal | State::EscapeInString, c) => step(state.unescaped(), c),

        (State::Normal, VARIABLE) => (State::Normal, Action::Start(VARIABLE)),
        (State::Normal, QUOTE) => (State::InString, Action::Start(QUOTE)),
        (State::Normal, ESCAPE) => (State::EscapeNormal, Action::Skip),
        (State::Normal, ' ') => (State::Normal, Action::Break),
        (State::Normal, c) => (State::Normal, Action::Append(c)),

        (State::InString, QUOTE) => (State::Normal, Action::Close),
        (State::InString, ESCAPE) => (State::EscapeInString, Action::Skip),
        (State::InString, c) => (State::InString, Action::Append(c)),
    }
}

/// Streaming tokenizer over one raw value.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    chars: Chars<'a>,
    state: State,
    current: String,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { chars: src.chars(), state: State::Normal, current: String::new() }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Take the current item, if any, as an unclosed token.
    fn flush(&mut self) -> Option<Token> {
        if self.current.is_empty() {
            return None;
        }
        let item = std::mem::take(&mut self.current);
        Some(match item.strip_prefix(VARIABLE) {
            Some(name) => Token::Reference(name.to_owned()),
            None => Token::Malformed(item),
        })
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while let Some(ch) = self.chars.next() {
            let (state, action) = step(self.state, ch);
            self.state = state;
            match action {
                Action::Append(c) => self.current.push(c),
                Action::Skip => {}
                Action::Break => {
                    if let Some(tok) = self.flush() {
                        return Some(tok);
                    }
                }
                Action::Start(c) => {
                    let done = self.flush();
                    self.current.push(c);
                    if done.is_some() {
                        return done;
                    }
                }
                Action::Close => {
                    let item = std::mem::take(&mut self.current);
                    let text = item.strip_prefix(QUOTE).unwrap_or(&item);
                    return Some(Token::Literal(text.to_owned()));
                }
            }
        }
        self.flush()
    }
}

/// Split a raw value into tokens.  Never fails.
pub fn tokenize(src: &str) -> Vec<Token> {
    Lexer::new(src).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Token {
        Token::Literal(s.to_owned())
    }

    fn var(s: &str) -> Token {
        Token::Reference(s.to_owned())
    }

    fn bad(s: &str) -> Token {
        Token::Malformed(s.to_owned())
    }

    // -- transition table -----------------------------------------------------

    #[test]
    fn transitions_from_normal() {
        use Action::*;
        use State::*;
        assert_eq!(step(Normal, '@'), (Normal, Start('@')));
        assert_eq!(step(Normal, '"'), (InString, Start('"')));
        assert_eq!(step(Normal, '\\'), (EscapeNormal, Skip));
        assert_eq!(step(Normal, ' '), (Normal, Break));
        assert_eq!(step(Normal, 'x'), (Normal, Append('x')));
    }

    #[test]
    fn transitions_from_in_string() {
        use Action::*;
        use State::*;
        assert_eq!(step(InString, '@'), (InString, Append('@')));
        assert_eq!(step(InString, '"'), (Normal, Close));
        assert_eq!(step(InString, '\\'), (EscapeInString, Skip));
        assert_eq!(step(InString, ' '), (InString, Append(' ')));
        assert_eq!(step(InString, 'x'), (InString, Append('x')));
    }

    #[test]
    fn escape_lasts_exactly_one_character() {
        use Action::*;
        use State::*;
        assert_eq!(step(EscapeInString, '"'), (InString, Append('"')));
        assert_eq!(step(EscapeNormal, '"'), (Normal, Append('"')));
        assert_eq!(step(EscapeInString, '\\'), (InString, Skip));
        assert_eq!(step(EscapeNormal, '\\'), (Normal, Skip));
        // Any other character behaves as unescaped and clears the escape.
        assert_eq!(step(EscapeInString, 'n'), (InString, Append('n')));
        assert_eq!(step(EscapeNormal, '@'), (Normal, Start('@')));
        assert_eq!(step(EscapeNormal, ' '), (Normal, Break));
        assert_eq!(step(EscapeInString, ' '), (InString, Append(' ')));
    }

    // -- tokenize -------------------------------------------------------------

    #[test]
    fn empty_value() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn single_literal() {
        assert_eq!(tokenize(r#""hello""#), [lit("hello")]);
    }

    #[test]
    fn empty_literal() {
        assert_eq!(tokenize(r#""""#), [lit("")]);
    }

    #[test]
    fn literals_with_and_without_space() {
        assert_eq!(tokenize(r#""1""2""#), [lit("1"), lit("2")]);
        assert_eq!(tokenize(r#""1" "2""#), [lit("1"), lit("2")]);
    }

    #[test]
    fn space_inside_literal_kept() {
        assert_eq!(tokenize(r#""Hello, ""#), [lit("Hello, ")]);
    }

    #[test]
    fn adjacent_references() {
        assert_eq!(tokenize("@greeting@name"), [var("greeting"), var("name")]);
    }

    #[test]
    fn reference_glued_to_literal() {
        assert_eq!(tokenize(r#"@a"x"@b"#), [var("a"), lit("x"), var("b")]);
    }

    #[test]
    fn at_sign_inside_literal_is_text() {
        assert_eq!(tokenize(r#""me@host""#), [lit("me@host")]);
    }

    #[test]
    fn escaped_quotes_inside_literal() {
        assert_eq!(tokenize(r#""say \"hi\"""#), [lit(r#"say "hi""#)]);
    }

    #[test]
    fn double_backslash_cancels_escape() {
        // `\\` consumes nothing and leaves the following quote unescaped.
        assert_eq!(tokenize(r#""a\\" "b""#), [lit("a"), lit("b")]);
    }

    #[test]
    fn escape_before_ordinary_char_is_dropped() {
        assert_eq!(tokenize(r#""a\nb""#), [lit("anb")]);
    }

    #[test]
    fn bare_word_is_malformed() {
        assert_eq!(tokenize("hello"), [bad("hello")]);
        assert_eq!(tokenize(r#""a"b"#), [lit("a"), bad("b")]);
    }

    #[test]
    fn unterminated_string_kept_as_is() {
        assert_eq!(tokenize(r#"@a "open"#), [var("a"), bad(r#""open"#)]);
    }

    #[test]
    fn unterminated_reference_at_end() {
        assert_eq!(tokenize(r#""x" @tail"#), [lit("x"), var("tail")]);
    }

    #[test]
    fn lone_at_sign_is_empty_reference() {
        assert_eq!(tokenize("@"), [var("")]);
        assert_eq!(tokenize(r#"@"x""#), [var(""), lit("x")]);
    }

    #[test]
    fn lexer_reports_open_string() {
        let mut lx = Lexer::new(r#""abc"#);
        assert!(lx.next().is_some());
        assert!(lx.state().in_string());
        assert_eq!(lx.next(), None);
    }

    #[test]
    fn display_renders_source_form() {
        assert_eq!(lit(r#"say "hi""#).to_string(), r#""say \"hi\"""#);
        assert_eq!(var("name").to_string(), "@name");
        assert_eq!(bad("word").to_string(), "word");
    }
}
