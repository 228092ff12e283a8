//! Identities for container members, used by comment slots and by the
//! reviver/replacer callbacks.

use core::fmt;

/// Identifies one member of a container: an object key or an array index.
///
/// # Examples
///
/// ```
/// use jsontrivia::MemberId;
///
/// assert_eq!(MemberId::from("name"), MemberId::Key("name".to_string()));
/// assert_eq!(MemberId::from(3), MemberId::Index(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberId {
    /// An object member, by key.
    Key(String),
    /// An array element, by 0-based index.
    Index(usize),
}

impl From<&str> for MemberId {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for MemberId {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for MemberId {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// The key under which a reviver or replacer callback is invoked.
///
/// Mirrors the standard JSON reviver/replacer contract: every member is
/// visited under its own key or index, and the whole document is visited once
/// more under [`MemberKey::Root`] (the `""` key in the standard contract).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberKey {
    /// The whole document.
    Root,
    /// An object member, by key.
    Key(String),
    /// An array element, by 0-based index.
    Index(usize),
}

impl MemberKey {
    /// The member key as a string, `Some` only for object members.
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            _ => None,
        }
    }

    /// The member index, `Some` only for array elements.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            _ => None,
        }
    }
}

impl From<MemberId> for MemberKey {
    fn from(id: MemberId) -> Self {
        match id {
            MemberId::Key(key) => Self::Key(key),
            MemberId::Index(index) => Self::Index(index),
        }
    }
}
