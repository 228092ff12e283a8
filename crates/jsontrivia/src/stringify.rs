//! The serializer.
//!
//! Compact output (no indent) is plain JSON: comments are dropped by design.
//! Indented output re-emits every attached comment at its recorded position,
//! honoring the inline flag: inline comments join the preceding text with a
//! single space, own-line comments start on a fresh line at the current
//! depth, and a line comment always forces a line break before whatever
//! follows it.

use core::mem;

use crate::comments::{CommentKind, CommentMap, CommentSlot};
use crate::member::{MemberId, MemberKey};
use crate::value::{Array, Object, Value, escape_string};

/// Indentation accepted by [`stringify`] and [`to_string_pretty`].
///
/// `Indent::None` (or zero spaces, or an empty literal) selects compact
/// output, which never emits comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Indent {
    /// Compact output.
    #[default]
    None,
    /// Indent by this many spaces per level.
    Spaces(usize),
    /// Indent by this literal string per level, e.g. `"\t"`.
    Literal(String),
}

impl Indent {
    /// One level of indentation as a string; empty means compact.
    fn unit(&self) -> String {
        match self {
            Indent::None => String::new(),
            Indent::Spaces(n) => " ".repeat(*n),
            Indent::Literal(s) => s.clone(),
        }
    }
}

impl From<usize> for Indent {
    fn from(n: usize) -> Self {
        Indent::Spaces(n)
    }
}

impl From<&str> for Indent {
    fn from(s: &str) -> Self {
        Indent::Literal(s.to_string())
    }
}

impl From<String> for Indent {
    fn from(s: String) -> Self {
        Indent::Literal(s)
    }
}

/// Key filtering and value transformation during serialization, mirroring the
/// standard `JSON.stringify` replacer contract.
pub enum Replacer<'a> {
    /// Emit only these object keys, in exactly this order.
    Keys(Vec<String>),
    /// Called for every member (and once for the root under
    /// [`MemberKey::Root`]); `Some` replaces the value, `None` suppresses it.
    /// Suppressed object members are omitted; suppressed array elements
    /// render as `null`; a suppressed root makes [`stringify`] return `None`.
    Transform(Box<dyn FnMut(&MemberKey, &Value) -> Option<Value> + 'a>),
}

impl<'a> Replacer<'a> {
    /// A key-list replacer.
    pub fn keys<I>(keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Replacer::Keys(keys.into_iter().map(Into::into).collect())
    }

    /// A function replacer.
    pub fn transform<F>(f: F) -> Self
    where
        F: FnMut(&MemberKey, &Value) -> Option<Value> + 'a,
    {
        Replacer::Transform(Box::new(f))
    }
}

/// Render compact JSON. Comments are dropped.
///
/// # Examples
///
/// ```
/// let value = jsontrivia::parse("[1, /* gone */ 2]")?;
/// assert_eq!(jsontrivia::to_string(&value), "[1,2]");
/// # Ok::<(), jsontrivia::ParseError>(())
/// ```
#[must_use]
pub fn to_string(value: &Value) -> String {
    stringify(value, None, Indent::None).unwrap_or_default()
}

/// Render indented JSON, re-emitting every attached comment.
///
/// # Examples
///
/// ```
/// let value = jsontrivia::parse("{\n  // note\n  \"a\": 1\n}")?;
/// assert_eq!(
///     jsontrivia::to_string_pretty(&value, 2),
///     "{\n  // note\n  \"a\": 1\n}"
/// );
/// # Ok::<(), jsontrivia::ParseError>(())
/// ```
#[must_use]
pub fn to_string_pretty(value: &Value, indent: impl Into<Indent>) -> String {
    stringify(value, None, indent).unwrap_or_default()
}

/// Full-control serialization with an optional [`Replacer`].
///
/// Returns `None` only when a [`Replacer::Transform`] suppresses the root
/// value; with no replacer the result is always `Some`.
pub fn stringify(
    value: &Value,
    replacer: Option<Replacer<'_>>,
    indent: impl Into<Indent>,
) -> Option<String> {
    let mut writer = Writer {
        indent: indent.into().unit(),
        replacer,
    };
    let body = writer.write_member(&MemberKey::Root, value, "")?;

    if writer.indent.is_empty() {
        return Some(body);
    }

    // Document-level comments always come from the value the caller passed,
    // even if a replacer substituted the root.
    let Some(comments) = value.comments() else {
        return Some(body);
    };
    let before = process_comments(comments, &CommentSlot::BeforeAll, "", false);
    let after = process_comments(comments, &CommentSlot::AfterAll, "", false);
    Some(format!(
        "{}{}{}",
        before.trim_start(),
        body,
        after.trim_end()
    ))
}

struct Writer<'a> {
    /// One level of indentation; empty selects compact output.
    indent: String,
    replacer: Option<Replacer<'a>>,
}

impl Writer<'_> {
    /// Serialize one member, applying the function replacer. `None` means the
    /// member is suppressed.
    fn write_member(&mut self, key: &MemberKey, value: &Value, gap: &str) -> Option<String> {
        let replaced;
        let value = match &mut self.replacer {
            Some(Replacer::Transform(f)) => {
                replaced = f(key, value)?;
                &replaced
            }
            _ => value,
        };

        Some(match value {
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => quote(s),
            Value::Array(array) => {
                if self.indent.is_empty() {
                    self.compact_array(array)
                } else {
                    self.pretty_array(array, gap)
                }
            }
            Value::Object(object) => {
                if self.indent.is_empty() {
                    self.compact_object(object)
                } else {
                    self.pretty_object(object, gap)
                }
            }
        })
    }

    fn compact_array(&mut self, array: &Array) -> String {
        let mut out = String::from("[");
        for (i, item) in array.iter().enumerate() {
            if i != 0 {
                out.push(',');
            }
            let rendered = self
                .write_member(&MemberKey::Index(i), item, "")
                .unwrap_or_else(|| "null".to_string());
            out.push_str(&rendered);
        }
        out.push(']');
        out
    }

    fn compact_object(&mut self, object: &Object) -> String {
        let mut out = String::from("{");
        let mut first = true;
        for key in self.member_keys(object) {
            let Some(value) = object.get(&key) else {
                continue;
            };
            let Some(rendered) = self.write_member(&MemberKey::Key(key.clone()), value, "") else {
                continue;
            };
            if !first {
                out.push(',');
            }
            first = false;
            out.push_str(&quote(&key));
            out.push(':');
            out.push_str(&rendered);
        }
        out.push('}');
        out
    }

    //  | deeper        |
    //  | gap  | indent |
    //        [
    //                 1,
    //                 2
    //        ]
    fn pretty_array(&mut self, array: &Array, gap: &str) -> String {
        let deeper = format!("{gap}{}", self.indent);
        let comments = array.comments();

        let mut inside = String::new();
        let mut after_comma = String::new();

        for (i, item) in array.iter().enumerate() {
            if i != 0 {
                inside.push(',');
            }

            let before = join(
                &mem::take(&mut after_comma),
                &process_comments(comments, &CommentSlot::Before(MemberId::Index(i)), &deeper, false),
                &deeper,
            );
            if before.is_empty() {
                inside.push('\n');
                inside.push_str(&deeper);
            } else {
                inside.push_str(&before);
            }

            // A suppressed element still occupies its position.
            let rendered = self
                .write_member(&MemberKey::Index(i), item, &deeper)
                .unwrap_or_else(|| "null".to_string());
            inside.push_str(&rendered);

            inside.push_str(&process_comments(
                comments,
                &CommentSlot::AfterValue(MemberId::Index(i)),
                &deeper,
                false,
            ));
            after_comma = process_comments(
                comments,
                &CommentSlot::AfterComma(MemberId::Index(i)),
                &deeper,
                false,
            );
        }

        inside.push_str(&join(
            &after_comma,
            &process_comments(comments, &CommentSlot::Trailing, &deeper, false),
            &deeper,
        ));

        format!("[{}]", close_content(&inside, comments, gap, &self.indent))
    }

    fn pretty_object(&mut self, object: &Object, gap: &str) -> String {
        let deeper = format!("{gap}{}", self.indent);
        let comments = object.comments();

        let mut inside = String::new();
        let mut after_comma = String::new();
        let mut first = true;

        for key in self.member_keys(object) {
            let Some(value) = object.get(&key) else {
                continue;
            };
            let Some(rendered) = self.write_member(&MemberKey::Key(key.clone()), value, &deeper)
            else {
                continue;
            };
            if !first {
                inside.push(',');
            }
            first = false;

            let before = join(
                &mem::take(&mut after_comma),
                &process_comments(
                    comments,
                    &CommentSlot::Before(MemberId::Key(key.clone())),
                    &deeper,
                    false,
                ),
                &deeper,
            );
            if before.is_empty() {
                inside.push('\n');
                inside.push_str(&deeper);
            } else {
                inside.push_str(&before);
            }

            inside.push_str(&quote(&key));
            inside.push_str(&process_comments(
                comments,
                &CommentSlot::AfterKey(key.clone()),
                &deeper,
                false,
            ));
            inside.push(':');
            inside.push_str(&process_comments(
                comments,
                &CommentSlot::AfterColon(key.clone()),
                &deeper,
                false,
            ));
            inside.push(' ');
            inside.push_str(&rendered);
            inside.push_str(&process_comments(
                comments,
                &CommentSlot::AfterValue(MemberId::Key(key.clone())),
                &deeper,
                false,
            ));

            after_comma = process_comments(
                comments,
                &CommentSlot::AfterComma(MemberId::Key(key.clone())),
                &deeper,
                false,
            );
        }

        inside.push_str(&join(
            &after_comma,
            &process_comments(comments, &CommentSlot::Trailing, &deeper, false),
            &deeper,
        ));

        format!("{{{}}}", close_content(&inside, comments, gap, &self.indent))
    }

    /// The object keys to emit: the key-list replacer's keys verbatim, or the
    /// object's own keys in insertion order.
    fn member_keys(&self, object: &Object) -> Vec<String> {
        match &self.replacer {
            Some(Replacer::Keys(keys)) => keys.clone(),
            _ => object.keys().cloned().collect(),
        }
    }
}

/// Render one comment group. Inline comments are separated by a single space,
/// own-line comments by a newline plus `deeper_gap`. When `always_break` is
/// set, or when the group ends with a line comment, a trailing newline plus
/// `deeper_gap` is appended so following content starts on a fresh line.
fn process_comments(
    comments: &CommentMap,
    slot: &CommentSlot,
    deeper_gap: &str,
    always_break: bool,
) -> String {
    let Some(group) = comments.get(slot) else {
        return String::new();
    };

    let mut out = String::new();
    let mut ends_with_line_comment = false;
    for comment in group {
        if comment.inline {
            out.push(' ');
        } else {
            out.push('\n');
            out.push_str(deeper_gap);
        }
        match comment.kind {
            CommentKind::Line => {
                ends_with_line_comment = true;
                out.push_str("//");
                out.push_str(&comment.text);
            }
            CommentKind::Block => {
                ends_with_line_comment = false;
                out.push_str("/*");
                out.push_str(&comment.text);
                out.push_str("*/");
            }
        }
    }

    if always_break || ends_with_line_comment {
        out.push('\n');
        out.push_str(deeper_gap);
    }
    out
}

/// Merge a carried after-comma fragment with a before-member fragment so that
/// the member lands on a fresh line at `gap` depth.
fn join(one: &str, two: &str, gap: &str) -> String {
    if !one.is_empty() {
        if two.is_empty() {
            format!("{}\n{gap}", one.trim_end())
        } else {
            format!("{one}{}\n{gap}", two.trim())
        }
    } else if !two.is_empty() {
        format!("{}\n{gap}", two.trim_end())
    } else {
        String::new()
    }
}

/// Finish a container body: prepend any `Leading` comments (an empty
/// container's only content) and put the closing bracket on its own line.
fn close_content(inside: &str, comments: &CommentMap, gap: &str, indent: &str) -> String {
    let deeper = format!("{gap}{indent}");
    let leading = process_comments(comments, &CommentSlot::Leading, &deeper, true);
    join(&leading, inside, gap)
}

fn format_number(n: f64) -> String {
    // JSON numbers must be finite; everything else encodes as null.
    if n.is_finite() {
        n.to_string()
    } else {
        "null".to_string()
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", escape_string(s))
}
