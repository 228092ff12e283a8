//! The lexer: raw text to a flat token sequence.
//!
//! Comments are first-class tokens here, not stripped trivia. Each token also
//! records whether it begins on the same source line as the end of the token
//! before it; the parser uses that line-adjacency bit to classify comments as
//! inline (same line as the thing they follow) or own-line.

use core::iter::Peekable;
use core::str::Chars;

use crate::error::{ErrorKind, ParseError};

/// A 1-based line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub(crate) const START: Position = Position { line: 1, column: 1 };
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    /// A standalone `-`; the parser fuses it with a following number.
    Minus,
    /// A string literal, escapes already decoded.
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    /// `// ...` comment text, without the `//` or the line terminator.
    LineComment(String),
    /// `/* ... */` comment text, without the delimiters.
    BlockComment(String),
}

impl TokenKind {
    /// The token as it would read in source, used in syntax error messages.
    pub(crate) fn lexeme(&self) -> String {
        match self {
            TokenKind::LBrace => "{".into(),
            TokenKind::RBrace => "}".into(),
            TokenKind::LBracket => "[".into(),
            TokenKind::RBracket => "]".into(),
            TokenKind::Colon => ":".into(),
            TokenKind::Comma => ",".into(),
            TokenKind::Minus => "-".into(),
            TokenKind::String(s) => format!("\"{s}\""),
            TokenKind::Number(n) => n.to_string(),
            TokenKind::Boolean(b) => b.to_string(),
            TokenKind::Null => "null".into(),
            TokenKind::LineComment(text) => format!("//{text}"),
            TokenKind::BlockComment(text) => format!("/*{text}*/"),
        }
    }

}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Position of the token's first character.
    pub start: Position,
    /// Position one past the token's last character.
    pub end: Position,
    /// True when this token starts on the line the previous token ended on.
    pub follows_on_same_line: bool,
}

/// Tokenize `text`, or fail at the first invalid character sequence.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(text).run()
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\n' | '\r' => {
                    self.bump();
                }
                _ => break,
            }
        }
    }

    fn run(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        let mut prev_end_line = None;

        loop {
            self.skip_whitespace();
            let Some(c) = self.peek() else { break };
            let start = self.position();

            let kind = match c {
                '{' => self.punct(TokenKind::LBrace),
                '}' => self.punct(TokenKind::RBrace),
                '[' => self.punct(TokenKind::LBracket),
                ']' => self.punct(TokenKind::RBracket),
                ':' => self.punct(TokenKind::Colon),
                ',' => self.punct(TokenKind::Comma),
                '-' => self.punct(TokenKind::Minus),
                '"' => self.lex_string(start)?,
                '0'..='9' => self.lex_number(start)?,
                't' => self.lex_literal("true", TokenKind::Boolean(true))?,
                'f' => self.lex_literal("false", TokenKind::Boolean(false))?,
                'n' => self.lex_literal("null", TokenKind::Null)?,
                '/' => self.lex_comment(start)?,
                other => {
                    return Err(ParseError::new(ErrorKind::InvalidCharacter(other), start));
                }
            };

            let end = self.position();
            tokens.push(Token {
                kind,
                start,
                end,
                follows_on_same_line: prev_end_line == Some(start.line),
            });
            prev_end_line = Some(end.line);
        }

        Ok(tokens)
    }

    fn punct(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    fn lex_literal(
        &mut self,
        expected: &'static str,
        kind: TokenKind,
    ) -> Result<TokenKind, ParseError> {
        for want in expected.chars() {
            let at = self.position();
            match self.bump() {
                Some(got) if got == want => {}
                Some(got) => {
                    return Err(ParseError::new(ErrorKind::InvalidCharacter(got), at));
                }
                None => {
                    return Err(ParseError::new(ErrorKind::UnexpectedEndOfInput, at));
                }
            }
        }
        Ok(kind)
    }

    fn lex_string(&mut self, start: Position) -> Result<TokenKind, ParseError> {
        self.bump(); // opening quote
        let mut value = String::new();

        loop {
            let at = self.position();
            match self.bump() {
                None => {
                    return Err(ParseError::new(ErrorKind::UnterminatedString, start));
                }
                Some('"') => break,
                Some('\\') => value.push(self.lex_escape(at, start)?),
                Some(c) if (c as u32) < 0x20 => {
                    return Err(ParseError::new(ErrorKind::InvalidCharacter(c), at));
                }
                Some(c) => value.push(c),
            }
        }

        Ok(TokenKind::String(value))
    }

    /// Decode one escape sequence; `at` is the backslash position.
    fn lex_escape(&mut self, at: Position, string_start: Position) -> Result<char, ParseError> {
        match self.bump() {
            None => Err(ParseError::new(
                ErrorKind::UnterminatedString,
                string_start,
            )),
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('/') => Ok('/'),
            Some('b') => Ok('\u{0008}'),
            Some('f') => Ok('\u{000C}'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('u') => self.lex_unicode_escape(at),
            Some(other) => Err(ParseError::new(ErrorKind::InvalidEscape(other), at)),
        }
    }

    /// Decode `\uXXXX`, pairing surrogates; `at` is the backslash position.
    fn lex_unicode_escape(&mut self, at: Position) -> Result<char, ParseError> {
        let bad = || ParseError::new(ErrorKind::InvalidUnicodeEscape, at);
        let high = self.read_hex4().ok_or_else(bad)?;

        if (0xD800..=0xDBFF).contains(&high) {
            // High surrogate: a low surrogate escape must follow.
            if self.bump() != Some('\\') || self.bump() != Some('u') {
                return Err(bad());
            }
            let low = self.read_hex4().ok_or_else(bad)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(bad());
            }
            let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(combined).ok_or_else(bad);
        }
        if (0xDC00..=0xDFFF).contains(&high) {
            // Unpaired low surrogate.
            return Err(bad());
        }
        char::from_u32(high).ok_or_else(bad)
    }

    fn read_hex4(&mut self) -> Option<u32> {
        let mut value = 0;
        for _ in 0..4 {
            let digit = self.bump()?.to_digit(16)?;
            value = (value << 4) | digit;
        }
        Some(value)
    }

    fn lex_number(&mut self, start: Position) -> Result<TokenKind, ParseError> {
        let bad = || ParseError::new(ErrorKind::InvalidNumber, start);
        let mut raw = String::new();

        // Integer part: `0` alone or a nonzero digit run. The tokenizer never
        // sees a leading minus; `-` is its own token.
        match self.peek() {
            Some('0') => {
                raw.push('0');
                self.bump();
                if matches!(self.peek(), Some('0'..='9')) {
                    return Err(bad());
                }
            }
            Some('1'..='9') => {
                while let Some(c @ '0'..='9') = self.peek() {
                    raw.push(c);
                    self.bump();
                }
            }
            _ => return Err(bad()),
        }

        if self.peek() == Some('.') {
            raw.push('.');
            self.bump();
            if !matches!(self.peek(), Some('0'..='9')) {
                return Err(bad());
            }
            while let Some(c @ '0'..='9') = self.peek() {
                raw.push(c);
                self.bump();
            }
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            raw.push('e');
            self.bump();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                raw.push(sign);
                self.bump();
            }
            if !matches!(self.peek(), Some('0'..='9')) {
                return Err(bad());
            }
            while let Some(c @ '0'..='9') = self.peek() {
                raw.push(c);
                self.bump();
            }
        }

        raw.parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| bad())
    }

    fn lex_comment(&mut self, start: Position) -> Result<TokenKind, ParseError> {
        self.bump(); // leading slash
        match self.peek() {
            Some('/') => {
                self.bump();
                let mut text = String::new();
                while let Some(c) = self.peek() {
                    if c == '\n' || c == '\r' {
                        break;
                    }
                    text.push(c);
                    self.bump();
                }
                Ok(TokenKind::LineComment(text))
            }
            Some('*') => {
                self.bump();
                let mut text = String::new();
                loop {
                    match self.bump() {
                        None => {
                            return Err(ParseError::new(
                                ErrorKind::UnterminatedBlockComment,
                                start,
                            ));
                        }
                        Some('*') if self.peek() == Some('/') => {
                            self.bump();
                            return Ok(TokenKind::BlockComment(text));
                        }
                        Some(c) => text.push(c),
                    }
                }
            }
            _ => Err(ParseError::new(ErrorKind::InvalidCharacter('/'), start)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Result<Vec<TokenKind>, ParseError> {
        tokenize(input).map(|tokens| tokens.into_iter().map(|t| t.kind).collect())
    }

    #[test]
    fn structural_tokens() {
        assert_eq!(
            kinds("{}[]:,-").unwrap(),
            vec![
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Colon,
                TokenKind::Comma,
                TokenKind::Minus,
            ]
        );
    }

    #[test]
    fn literals() {
        assert_eq!(
            kinds("true false null").unwrap(),
            vec![
                TokenKind::Boolean(true),
                TokenKind::Boolean(false),
                TokenKind::Null,
            ]
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(
            kinds("123 0.5 1e10 2.5e3 1E+2").unwrap(),
            vec![
                TokenKind::Number(123.0),
                TokenKind::Number(0.5),
                TokenKind::Number(1e10),
                TokenKind::Number(2500.0),
                TokenKind::Number(100.0),
            ]
        );
    }

    #[test]
    fn strings_and_escapes() {
        assert_eq!(
            kinds(r#" "hello" "a\nb" "A" "\"" "#).unwrap(),
            vec![
                TokenKind::String("hello".into()),
                TokenKind::String("a\nb".into()),
                TokenKind::String("A".into()),
                TokenKind::String("\"".into()),
            ]
        );
        assert_eq!(
            kinds(r#""\" \\ \/ \b \f \n \r \t""#).unwrap(),
            vec![TokenKind::String(
                "\" \\ / \u{0008} \u{000C} \n \r \t".into()
            )],
        );
    }

    #[test]
    fn surrogate_pairs() {
        assert_eq!(
            kinds(r#""😀""#).unwrap(),
            vec![TokenKind::String("\u{1F600}".into())],
        );
        assert_eq!(
            kinds(r#""\u0041\uD83D\uDE00""#).unwrap(),
            vec![TokenKind::String("A\u{1F600}".into())],
        );
        let err = kinds(r#""\uD83D""#).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidUnicodeEscape);
    }

    #[test]
    fn comments_are_tokens() {
        assert_eq!(
            kinds("// line\n/* block */ 1").unwrap(),
            vec![
                TokenKind::LineComment(" line".into()),
                TokenKind::BlockComment(" block ".into()),
                TokenKind::Number(1.0),
            ]
        );
    }

    #[test]
    fn line_adjacency() {
        let tokens = tokenize("1 // same\n// next\n2").unwrap();
        let flags: Vec<bool> = tokens.iter().map(|t| t.follows_on_same_line).collect();
        assert_eq!(flags, vec![false, true, false, false]);
    }

    #[test]
    fn multi_line_block_comment_positions() {
        let tokens = tokenize("/* a\nb */ 1").unwrap();
        assert_eq!(tokens[0].start, Position { line: 1, column: 1 });
        assert_eq!(tokens[0].end.line, 2);
        assert!(tokens[1].follows_on_same_line);
    }

    #[test]
    fn invalid_character() {
        let err = kinds("?").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidCharacter('?'));
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn truncated_literal() {
        let err = kinds("tru!").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidCharacter('!'));
        assert_eq!((err.line, err.column), (1, 4));
    }

    #[test]
    fn unterminated_string() {
        let err = kinds(" \"abc").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnterminatedString);
        assert_eq!((err.line, err.column), (1, 2));
    }

    #[test]
    fn control_character_in_string() {
        let err = kinds("\"\n\"").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidCharacter('\n'));
        assert_eq!((err.line, err.column), (1, 2));
    }

    #[test]
    fn invalid_escape() {
        let err = kinds(r#""\z""#).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidEscape('z'));
        assert_eq!((err.line, err.column), (1, 2));
    }

    #[test]
    fn bad_numbers() {
        for input in ["01", "1.", "1e", "1e+", "0.e1"] {
            let err = kinds(input).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidNumber, "input {input:?}");
        }
        // A leading decimal point never starts a number token.
        let err = kinds(".5").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidCharacter('.'));
    }

    #[test]
    fn unterminated_block_comment() {
        let err = kinds("/* never closed").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnterminatedBlockComment);
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn lone_slash() {
        let err = kinds("/").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidCharacter('/'));
    }

    #[test]
    fn crlf_line_counting() {
        let err = kinds("{\r\n  ?").unwrap_err();
        assert_eq!((err.line, err.column), (2, 3));
    }
}
