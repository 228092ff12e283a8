//! The comment side-table.
//!
//! Comments never live inside the data a container holds; each [`Object`] and
//! [`Array`] carries a [`CommentMap`] keyed by [`CommentSlot`], a position tag
//! naming where, relative to the container's members, a group of comments
//! belongs. Consumers that only care about data can ignore the table entirely:
//! iteration, indexing, and equality of containers never see it.
//!
//! [`Object`]: crate::Object
//! [`Array`]: crate::Array

use crate::member::MemberId;

/// Line (`//`) or block (`/* */`) comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `// ...`, runs to the end of its line.
    Line,
    /// `/* ... */`, may span lines.
    Block,
}

/// One comment, as attached to a container.
///
/// `inline` records whether the comment shared a source line with the token
/// immediately before it; the serializer uses it to choose between same-line
/// placement (single space separator) and own-line placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    /// The comment text, without delimiters.
    pub text: String,
    /// Line or block.
    pub kind: CommentKind,
    /// True when the comment followed another token on the same line.
    pub inline: bool,
}

impl CommentRecord {
    /// A `//` comment on its own line.
    #[must_use]
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: CommentKind::Line,
            inline: false,
        }
    }

    /// A `/* */` comment on its own line.
    #[must_use]
    pub fn block(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: CommentKind::Block,
            inline: false,
        }
    }

    /// The same comment, marked inline.
    #[must_use]
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

/// Where, relative to a container's members, a comment group belongs.
///
/// A single container can host any number of independently positioned groups
/// without them colliding with real data or with each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommentSlot {
    /// Before the entire document. Only meaningful on the root container.
    BeforeAll,
    /// After the entire document. Only meaningful on the root container.
    AfterAll,
    /// Inside a container that has no members.
    Leading,
    /// After the last member, before the closing `}` or `]`.
    Trailing,
    /// Before a member (before its key, for objects).
    Before(MemberId),
    /// Between an object key and its colon.
    AfterKey(String),
    /// Between the colon and the member value.
    AfterColon(String),
    /// Immediately after a member value, before any comma.
    AfterValue(MemberId),
    /// On the same line as the comma that follows a member.
    AfterComma(MemberId),
}

/// An ordered `CommentSlot -> Vec<CommentRecord>` table, one per container.
///
/// Slots keep insertion order; a handful of entries at most, so lookups are
/// linear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentMap {
    slots: Vec<(CommentSlot, Vec<CommentRecord>)>,
}

impl CommentMap {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The comments attached at `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: &CommentSlot) -> Option<&[CommentRecord]> {
        self.slots
            .iter()
            .find(|(s, _)| s == slot)
            .map(|(_, comments)| comments.as_slice())
    }

    /// Attach `comments` at `slot`, replacing any previous group there.
    ///
    /// Empty groups are dropped rather than stored.
    pub fn set(&mut self, slot: CommentSlot, comments: Vec<CommentRecord>) {
        if comments.is_empty() {
            self.remove(&slot);
            return;
        }
        if let Some(existing) = self.slots.iter_mut().find(|(s, _)| *s == slot) {
            existing.1 = comments;
        } else {
            self.slots.push((slot, comments));
        }
    }

    /// Detach and return the group at `slot`.
    pub fn remove(&mut self, slot: &CommentSlot) -> Option<Vec<CommentRecord>> {
        let index = self.slots.iter().position(|(s, _)| s == slot)?;
        Some(self.slots.remove(index).1)
    }

    /// True when no comments are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Iterate over `(slot, comments)` pairs in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = (&CommentSlot, &[CommentRecord])> {
        self.slots
            .iter()
            .map(|(slot, comments)| (slot, comments.as_slice()))
    }

    /// Drop every attached comment.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
