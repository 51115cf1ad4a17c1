//! Node type definitions.
//!
//! [`Node`] is the child union with exactly three variants (text, tag,
//! comment), matched exhaustively everywhere instead of probed by type.
//! [`Misc`] is the narrower pre-root union (a root element is not misc
//! content, so it has no tag variant).

use std::fmt;

use super::Tag;

/// A child of a [`Tag`]: character data, a nested element, or a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Character data, stored decoded (entities resolved).
    Text(String),
    /// A nested element.
    Tag(Tag),
    /// A comment.
    Comment(Comment),
}

impl Node {
    /// Returns the nested tag, if this node is one.
    #[must_use]
    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Node::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    /// Returns the text content, if this node is character data.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<Tag> for Node {
    fn from(tag: Tag) -> Self {
        Node::Tag(tag)
    }
}

impl From<Comment> for Node {
    fn from(comment: Comment) -> Self {
        Node::Comment(comment)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

/// An XML comment.
///
/// The text is opaque: entities inside comments are neither decoded nor
/// encoded. On output, any literal `-->` in the text is replaced with
/// `--|` so the comment cannot terminate itself early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// The comment text, without the `<!--`/`-->` delimiters.
    pub text: String,
}

impl Comment {
    /// Creates a comment with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<!-- {} -->", self.text.replace("-->", "--|"))
    }
}

/// Content that appeared outside the document's single root element.
///
/// Retained on [`Document::misc`](super::Document::misc), each entry
/// serialized on its own line before the root tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Misc {
    /// Edge-trimmed stray text, kept verbatim otherwise.
    Text(String),
    /// A top-level comment.
    Comment(Comment),
}

impl fmt::Display for Misc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Misc::Text(text) => f.write_str(text),
            Misc::Comment(comment) => comment.fmt(f),
        }
    }
}
