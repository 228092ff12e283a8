//! A comment-preserving JSON parser, document model, and serializer.
//!
//! `jsontrivia` parses a superset of JSON (`//` and `/* */` comments
//! anywhere whitespace is allowed, plus tolerated trailing commas) into an
//! ordinary value tree, and can serialize that tree back with every comment
//! restored to its original relative position. Comments ride in a hidden
//! side-table on each object and array, so code that only cares about data
//! sees plain containers: insertion-ordered maps and ordinary sequences.
//!
//! # Round-tripping
//!
//! ```
//! let source = "{\n  // environment\n  \"name\": \"prod\", // locked\n  \"replicas\": [1, 2]\n}";
//! let value = jsontrivia::parse(source)?;
//!
//! // Data is plain JSON; compact output drops the comments.
//! assert_eq!(
//!     jsontrivia::to_string(&value),
//!     r#"{"name":"prod","replicas":[1,2]}"#
//! );
//!
//! // Indented output restores them, inline ones on the same line.
//! let pretty = jsontrivia::to_string_pretty(&value, 2);
//! assert!(pretty.contains("// environment"));
//! assert!(pretty.contains("\"name\": \"prod\", // locked"));
//! # Ok::<(), jsontrivia::ParseError>(())
//! ```
//!
//! # Revivers and replacers
//!
//! [`parse_with_reviver`] and [`stringify`] mirror the standard JSON
//! reviver/replacer contracts: members are visited bottom-up under their key
//! or index, the whole document once more under [`MemberKey::Root`], and
//! returning `None` omits the member.

mod comments;
mod error;
mod member;
mod parser;
mod stringify;
mod tokenizer;
mod value;

#[cfg(any(test, feature = "serde"))]
mod serde;

#[cfg(test)]
mod tests;

pub use comments::{CommentKind, CommentMap, CommentRecord, CommentSlot};
pub use error::{ErrorCategory, ErrorKind, ParseError};
pub use member::{MemberId, MemberKey};
pub use parser::{ParseOptions, parse, parse_with_options, parse_with_reviver};
pub use stringify::{Indent, Replacer, stringify, to_string, to_string_pretty};
pub use value::{Array, Map, Object, Value};
