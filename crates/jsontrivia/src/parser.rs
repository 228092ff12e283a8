//! Recursive-descent parser over the token stream.
//!
//! All parse state lives in the [`Parser`] struct and is threaded through the
//! recursive calls, so concurrent and reentrant parses are safe by
//! construction. Comment tokens are collected as they are encountered and
//! attached to the nearest structural position of the container being built.
//!
//! Comment routing follows one rule worth spelling out: comments collected
//! right after a comma are split on their `inline` flag. The leading run of
//! inline comments stays with the comma (`AfterComma` of the previous member);
//! everything from the first own-line comment onward belongs to the next
//! member (`Before`).

use crate::comments::{CommentKind, CommentMap, CommentRecord, CommentSlot};
use crate::error::{ErrorKind, ParseError};
use crate::member::{MemberId, MemberKey};
use crate::tokenizer::{Position, Token, TokenKind, tokenize};
use crate::value::{Array, Map, Object, Value};

/// Options accepted by [`parse_with_options`] and [`parse_with_reviver`].
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Skip comment attachment entirely.
    ///
    /// Parsing is slightly faster and the resulting tree carries no comment
    /// metadata anywhere, exactly as if the input had none.
    ///
    /// # Default
    ///
    /// `false`
    pub remove_comments: bool,
}

/// Parse JSON-with-comments text, attaching every comment to the tree.
///
/// The accepted grammar is a superset of JSON: `//` and `/* */` comments are
/// permitted anywhere whitespace is, and a trailing comma before `}` or `]`
/// is tolerated.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying line and column on the first lexical or
/// structural violation; there are no partial results.
///
/// # Examples
///
/// ```
/// let value = jsontrivia::parse("{\"a\": 1, \"b\": [1, 2],}")?;
/// assert_eq!(jsontrivia::to_string(&value), r#"{"a":1,"b":[1,2]}"#);
/// # Ok::<(), jsontrivia::ParseError>(())
/// ```
pub fn parse(text: &str) -> Result<Value, ParseError> {
    parse_with_options(text, ParseOptions::default())
}

/// [`parse`] with explicit [`ParseOptions`].
///
/// # Errors
///
/// Returns a [`ParseError`] on the first lexical or structural violation.
pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Value, ParseError> {
    let root = parse_document::<NoReviver>(text, options, None)?;
    // Without a reviver nothing can suppress the root value.
    Ok(root.unwrap_or_default())
}

/// Parse with a reviver callback, mirroring the standard JSON contract.
///
/// The reviver runs bottom-up: object members and array elements are visited
/// innermost-first as they complete, each under [`MemberKey::Key`] or
/// [`MemberKey::Index`], and the whole document is visited last under
/// [`MemberKey::Root`]. Returning `None` omits an object member, stores
/// `null` for an array element, and makes the overall result `Ok(None)` at
/// the root.
///
/// # Errors
///
/// Returns a [`ParseError`] on the first lexical or structural violation.
///
/// # Examples
///
/// ```
/// use jsontrivia::{MemberKey, ParseOptions, parse_with_reviver};
///
/// let value = parse_with_reviver(r#"{"a":1,"b":2}"#, ParseOptions::default(), |key, value| {
///     match key {
///         MemberKey::Key(k) if k == "b" => None,
///         _ => Some(value),
///     }
/// })?
/// .expect("root not suppressed");
/// assert_eq!(jsontrivia::to_string(&value), r#"{"a":1}"#);
/// # Ok::<(), jsontrivia::ParseError>(())
/// ```
pub fn parse_with_reviver<F>(
    text: &str,
    options: ParseOptions,
    reviver: F,
) -> Result<Option<Value>, ParseError>
where
    F: FnMut(&MemberKey, Value) -> Option<Value>,
{
    parse_document(text, options, Some(reviver))
}

type NoReviver = fn(&MemberKey, Value) -> Option<Value>;

fn parse_document<F>(
    text: &str,
    options: ParseOptions,
    reviver: Option<F>,
) -> Result<Option<Value>, ParseError>
where
    F: FnMut(&MemberKey, Value) -> Option<Value>,
{
    let tokens = tokenize(text)?;
    let mut parser = Parser {
        tokens,
        index: 0,
        last_end: None,
        remove_comments: options.remove_comments,
        reviver,
    };

    let before_all = parser.collect_comments();
    let mut root = parser.parse_value()?;
    let after_all = parser.collect_comments();

    if parser.current().is_some() {
        return Err(parser.unexpected());
    }

    // Document-spanning comments attach to the root container. A scalar root
    // has no side-table to carry them, so there they are dropped.
    if let Some(comments) = root.comments_mut() {
        comments.set(CommentSlot::BeforeAll, before_all);
        comments.set(CommentSlot::AfterAll, after_all);
    }

    Ok(parser.revive(|| MemberKey::Root, root))
}

struct Parser<F> {
    tokens: Vec<Token>,
    index: usize,
    /// End position of the last consumed token, for end-of-input errors.
    last_end: Option<Position>,
    remove_comments: bool,
    reviver: Option<F>,
}

impl<F> Parser<F>
where
    F: FnMut(&MemberKey, Value) -> Option<Value>,
{
    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn current_or_end(&self) -> Result<&Token, ParseError> {
        self.current().ok_or_else(|| self.unexpected_end())
    }

    fn advance(&mut self) {
        if let Some(token) = self.tokens.get(self.index) {
            self.last_end = Some(token.end);
            self.index += 1;
        }
    }

    fn unexpected(&self) -> ParseError {
        match self.current() {
            Some(token) => ParseError::new(
                ErrorKind::UnexpectedToken(token.kind.lexeme()),
                token.start,
            ),
            None => self.unexpected_end(),
        }
    }

    fn unexpected_end(&self) -> ParseError {
        ParseError::new(
            ErrorKind::UnexpectedEndOfInput,
            self.last_end.unwrap_or(Position::START),
        )
    }

    /// Invoke the reviver if one is installed; `key` is only built when
    /// needed.
    fn revive(&mut self, key: impl FnOnce() -> MemberKey, value: Value) -> Option<Value> {
        match self.reviver.as_mut() {
            Some(reviver) => reviver(&key(), value),
            None => Some(value),
        }
    }

    /// Consume any run of comment tokens, returning their records.
    ///
    /// Under `remove_comments` the tokens are still consumed but nothing is
    /// recorded.
    fn collect_comments(&mut self) -> Vec<CommentRecord> {
        let mut comments = Vec::new();
        while let Some(token) = self.current() {
            let record = match &token.kind {
                TokenKind::LineComment(text) => (text.clone(), CommentKind::Line),
                TokenKind::BlockComment(text) => (text.clone(), CommentKind::Block),
                _ => break,
            };
            if !self.remove_comments {
                let (text, kind) = record;
                comments.push(CommentRecord {
                    text,
                    kind,
                    inline: token.follows_on_same_line,
                });
            }
            self.advance();
        }
        comments
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let token = self.current_or_end()?;
        match &token.kind {
            TokenKind::LBrace => {
                self.advance();
                self.parse_object()
            }
            TokenKind::LBracket => {
                self.advance();
                self.parse_array()
            }
            TokenKind::Minus => {
                self.advance();
                match &self.current_or_end()?.kind {
                    TokenKind::Number(n) => {
                        let n = -*n;
                        self.advance();
                        Ok(Value::Number(n))
                    }
                    _ => Err(self.unexpected()),
                }
            }
            TokenKind::Number(n) => {
                let n = *n;
                self.advance();
                Ok(Value::Number(n))
            }
            TokenKind::String(s) => {
                let s = s.clone();
                self.advance();
                Ok(Value::String(s))
            }
            TokenKind::Boolean(b) => {
                let b = *b;
                self.advance();
                Ok(Value::Boolean(b))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Value::Null)
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Parse an object body; the opening `{` is already consumed.
    fn parse_object(&mut self) -> Result<Value, ParseError> {
        let mut entries = Map::new();
        let mut comments = CommentMap::new();
        let mut pending = self.collect_comments();
        let mut started = false;
        let mut previous_key: Option<String> = None;

        loop {
            let token = self.current_or_end()?;
            if matches!(token.kind, TokenKind::RBrace) {
                break;
            }
            if started {
                if !matches!(token.kind, TokenKind::Comma) {
                    return Err(self.unexpected());
                }
                self.advance();
                pending = self.collect_comments();
                if let Some(prev) = &previous_key {
                    let inline_run = split_inline_prefix(&mut pending);
                    comments.set(
                        CommentSlot::AfterComma(MemberId::Key(prev.clone())),
                        inline_run,
                    );
                }
                // A trailing comma may be the last thing in the object.
                if matches!(self.current_or_end()?.kind, TokenKind::RBrace) {
                    break;
                }
            }
            started = true;

            let key = match &self.current_or_end()?.kind {
                TokenKind::String(s) => s.clone(),
                _ => return Err(self.unexpected()),
            };
            comments.set(
                CommentSlot::Before(MemberId::Key(key.clone())),
                std::mem::take(&mut pending),
            );
            self.advance();

            comments.set(CommentSlot::AfterKey(key.clone()), self.collect_comments());

            if !matches!(self.current_or_end()?.kind, TokenKind::Colon) {
                return Err(self.unexpected());
            }
            self.advance();
            comments.set(CommentSlot::AfterColon(key.clone()), self.collect_comments());

            let value = self.parse_value()?;
            if let Some(value) = self.revive(|| MemberKey::Key(key.clone()), value) {
                entries.insert(key.clone(), value);
            }
            comments.set(
                CommentSlot::AfterValue(MemberId::Key(key.clone())),
                self.collect_comments(),
            );
            previous_key = Some(key);
        }
        self.advance(); // closing brace

        let slot = if started {
            CommentSlot::Trailing
        } else {
            CommentSlot::Leading
        };
        comments.set(slot, pending);

        Ok(Value::Object(Object::from_parts(entries, comments)))
    }

    /// Parse an array body; the opening `[` is already consumed.
    fn parse_array(&mut self) -> Result<Value, ParseError> {
        let mut items = Vec::new();
        let mut comments = CommentMap::new();
        let mut pending = self.collect_comments();
        let mut started = false;
        let mut index = 0usize;

        loop {
            let token = self.current_or_end()?;
            if matches!(token.kind, TokenKind::RBracket) {
                break;
            }
            if started {
                if !matches!(token.kind, TokenKind::Comma) {
                    return Err(self.unexpected());
                }
                self.advance();
                pending = self.collect_comments();
                let inline_run = split_inline_prefix(&mut pending);
                comments.set(
                    CommentSlot::AfterComma(MemberId::Index(index - 1)),
                    inline_run,
                );
                if matches!(self.current_or_end()?.kind, TokenKind::RBracket) {
                    break;
                }
            }
            started = true;

            comments.set(
                CommentSlot::Before(MemberId::Index(index)),
                std::mem::take(&mut pending),
            );
            let value = self.parse_value()?;
            let value = self
                .revive(|| MemberKey::Index(index), value)
                .unwrap_or_default();
            items.push(value);
            comments.set(
                CommentSlot::AfterValue(MemberId::Index(index)),
                self.collect_comments(),
            );
            index += 1;
        }
        self.advance(); // closing bracket

        let slot = if started {
            CommentSlot::Trailing
        } else {
            CommentSlot::Leading
        };
        comments.set(slot, pending);

        Ok(Value::Array(Array::from_parts(items, comments)))
    }
}

/// Split off the leading run of inline comments after a comma; those stay
/// with the comma, the rest belong to the next member.
fn split_inline_prefix(pending: &mut Vec<CommentRecord>) -> Vec<CommentRecord> {
    let cut = pending
        .iter()
        .position(|c| !c.inline)
        .unwrap_or(pending.len());
    pending.drain(..cut).collect()
}
