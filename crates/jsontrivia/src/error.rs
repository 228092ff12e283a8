//! Parse error types.
//!
//! Every failure raised while tokenizing or parsing carries the 1-based line
//! and column of the offending source location. Errors abort the whole parse;
//! there are no partial results.

use thiserror::Error;

use crate::tokenizer::Position;

/// An error raised by [`parse`](crate::parse) and its variants.
///
/// Displays as `"<kind> at <line>:<column>"`.
///
/// # Examples
///
/// ```
/// let err = jsontrivia::parse("[1, ?]").unwrap_err();
/// assert_eq!(err.to_string(), "invalid character '?' at 1:5");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {line}:{column}")]
pub struct ParseError {
    pub(crate) kind: ErrorKind,
    /// 1-based source line of the error.
    pub line: usize,
    /// 1-based source column of the error.
    pub column: usize,
}

/// What went wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A character that cannot begin or continue any token.
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    /// A string literal ran to end of input without a closing quote.
    #[error("unterminated string")]
    UnterminatedString,
    /// A `/* */` comment ran to end of input without its closing `*/`.
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    /// A backslash escape other than the eight JSON escapes.
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    /// A malformed `\uXXXX` escape, including unpaired surrogates.
    #[error("invalid unicode escape sequence")]
    InvalidUnicodeEscape,
    /// A numeric literal violating the JSON number grammar.
    #[error("invalid number")]
    InvalidNumber,
    /// A well-formed token in a position the grammar forbids.
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    /// The token stream ended while a value or structure was still open.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

/// Coarse classification of a [`ParseError`], one per failure stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The tokenizer rejected a character sequence.
    Lexical,
    /// The parser rejected a token the grammar forbids at that position.
    Syntax,
    /// Input ended mid-structure.
    UnexpectedEnd,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, at: Position) -> Self {
        Self {
            kind,
            line: at.line,
            column: at.column,
        }
    }

    /// The specific failure.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Which stage rejected the input.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self.kind {
            ErrorKind::UnexpectedToken(_) => ErrorCategory::Syntax,
            ErrorKind::UnexpectedEndOfInput => ErrorCategory::UnexpectedEnd,
            _ => ErrorCategory::Lexical,
        }
    }
}
