//! The XML document tree.
//!
//! A document is a plain ownership tree: a [`Document`] owns a root [`Tag`],
//! every tag owns its attributes and an ordered sequence of [`Node`]
//! children, and nothing is shared or back-referenced. There is no
//! inheritance between document and tag: a `Document` is a root `Tag`
//! plus the XML declaration metadata (`version`, `encoding`) and whatever
//! stray content appeared outside the root.
//!
//! The tree is not synchronized; callers needing concurrent access must
//! clone or lock externally.

mod node;

pub use node::{Comment, Misc, Node};

use std::fmt;

use crate::error::{ParseDiagnostic, ParseError};
use crate::parser::Parser;

/// An attribute on a [`Tag`].
///
/// Attributes are kept in insertion order, but the order carries no
/// semantic meaning; only the attribute *set* is guaranteed to round-trip
/// through parse/serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name.
    pub name: String,
    /// The attribute value, stored decoded (entities resolved).
    pub value: String,
}

/// One XML element.
///
/// ```
/// use minixml::Tag;
///
/// let mut tag = Tag::new("greeting");
/// tag.set_attr("lang", "en");
/// tag.add_child("hello");
/// assert_eq!(tag.to_string(), "<greeting lang=\"en\">hello</greeting>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// The tag name (`body` for `<body bla="fu"/>`).
    pub name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
    self_closing: bool,
}

impl Tag {
    /// Creates an empty, non-self-closing tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    /// Creates a childless tag that serializes as `<name/>`.
    pub fn self_closing(name: impl Into<String>) -> Self {
        Self {
            self_closing: true,
            ..Self::new(name)
        }
    }

    // -- Attributes --

    /// Returns the attributes in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns the value of the named attribute, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Sets an attribute, replacing any existing attribute of the same name.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
        self
    }

    // -- Children --

    /// Returns the ordered children.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Appends a child node.
    ///
    /// Appending a child always clears the self-closing flag: a tag with
    /// children cannot render as `<name/>`.
    pub fn add_child(&mut self, child: impl Into<Node>) -> &mut Self {
        self.self_closing = false;
        self.children.push(child.into());
        self
    }

    /// Returns whether this tag serializes as `<name/>`.
    #[must_use]
    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Sets the self-closing flag.
    ///
    /// The flag can only be raised while the tag has no children; the
    /// request is ignored otherwise, preserving the invariant that a
    /// self-closing tag is childless.
    pub fn set_self_closing(&mut self, self_closing: bool) -> &mut Self {
        self.self_closing = self_closing && self.children.is_empty();
        self
    }

    // -- Traversal --

    /// Iterates depth-first over this tag and every descendant tag.
    pub fn tags(&self) -> Tags<'_> {
        Tags { stack: vec![self] }
    }

    /// Returns the first tag (self included, depth-first) with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Tag> {
        self.tags().find(|t| t.name == name)
    }

    /// Returns every tag (self included, depth-first) with the given name.
    #[must_use]
    pub fn find_all(&self, name: &str) -> Vec<&Tag> {
        self.tags().filter(|t| t.name == name).collect()
    }

    /// Returns the concatenated text of this tag and all its descendants.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Tag(tag) => tag.collect_text(out),
                Node::Comment(_) => {}
            }
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::serial::render_tag(self, ""))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::serial::render(self, ""))
    }
}

/// Depth-first iterator over a tag and its descendant tags.
pub struct Tags<'a> {
    stack: Vec<&'a Tag>,
}

impl<'a> Iterator for Tags<'a> {
    type Item = &'a Tag;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.stack.pop()?;
        // Reverse push keeps document order.
        for child in tag.children.iter().rev() {
            if let Node::Tag(t) = child {
                self.stack.push(t);
            }
        }
        Some(tag)
    }
}

/// An XML document: a root [`Tag`] plus declaration metadata.
///
/// ```
/// use minixml::Document;
///
/// let doc = Document::parse_str("<root><child/></root>").unwrap();
/// assert_eq!(doc.root.name, "root");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// XML version from the `<?xml?>` declaration, if one was present.
    pub version: Option<String>,
    /// Encoding from the `<?xml?>` declaration, if one was present.
    pub encoding: Option<String>,
    /// Text and comments recorded outside the root element, in order.
    pub misc: Vec<Misc>,
    /// The single root element.
    pub root: Tag,
    /// Warnings collected during parsing.
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl Document {
    /// Wraps a tag as the root of a new document with no declaration
    /// metadata.
    #[must_use]
    pub fn new(root: Tag) -> Self {
        Self {
            version: None,
            encoding: None,
            misc: Vec::new(),
            root,
            diagnostics: Vec::new(),
        }
    }

    /// Parses an XML document from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] on any malformed input; see the crate docs
    /// for the accepted grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// use minixml::Document;
    ///
    /// let doc = Document::parse_str("<a x=\"1\"><b>hi</b></a>").unwrap();
    /// assert_eq!(doc.root.attr("x"), Some("1"));
    /// ```
    pub fn parse_str(input: &str) -> Result<Self, ParseError> {
        Self::parse_bytes(input.as_bytes())
    }

    /// Parses an XML document from raw bytes.
    ///
    /// A UTF-8 BOM is skipped; UTF-16LE input is routed through the lossy
    /// downgrade shim (see [`crate::encoding`]). Reading a file or stream
    /// into memory is the caller's job; the core does no I/O.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] on any malformed input.
    pub fn parse_bytes(input: &[u8]) -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser.feed(input);
        parser.parse()
    }

    /// Renders the document, declaration line included.
    ///
    /// Equivalent to [`crate::serial::serialize`].
    #[must_use]
    pub fn serialize(&self) -> String {
        crate::serial::serialize(self)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::serial::serialize(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tag_is_empty() {
        let tag = Tag::new("div");
        assert_eq!(tag.name, "div");
        assert!(tag.attributes().is_empty());
        assert!(tag.children().is_empty());
        assert!(!tag.is_self_closing());
    }

    #[test]
    fn test_set_attr_insertion_order() {
        let mut tag = Tag::new("div");
        tag.set_attr("b", "2").set_attr("a", "1");
        let names: Vec<&str> = tag.attributes().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut tag = Tag::new("div");
        tag.set_attr("x", "1");
        tag.set_attr("x", "2");
        assert_eq!(tag.attr("x"), Some("2"));
        assert_eq!(tag.attributes().len(), 1);
    }

    #[test]
    fn test_attr_missing() {
        assert_eq!(Tag::new("div").attr("nope"), None);
    }

    #[test]
    fn test_add_child_clears_self_closing() {
        let mut tag = Tag::self_closing("br");
        assert!(tag.is_self_closing());
        tag.add_child("text");
        assert!(!tag.is_self_closing());
        assert_eq!(tag.children().len(), 1);
    }

    #[test]
    fn test_set_self_closing_requires_childless() {
        let mut tag = Tag::new("div");
        tag.add_child("text");
        tag.set_self_closing(true);
        assert!(!tag.is_self_closing());

        let mut empty = Tag::new("br");
        empty.set_self_closing(true);
        assert!(empty.is_self_closing());
    }

    #[test]
    fn test_tags_iterator_document_order() {
        let mut inner = Tag::new("b");
        inner.add_child(Tag::new("c"));
        let mut root = Tag::new("a");
        root.add_child(inner);
        root.add_child(Tag::new("d"));

        let names: Vec<&str> = root.tags().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_find_and_find_all() {
        let mut root = Tag::new("list");
        let mut item = Tag::new("item");
        item.set_attr("id", "1");
        root.add_child(item);
        let mut item = Tag::new("item");
        item.set_attr("id", "2");
        root.add_child(item);

        assert_eq!(root.find("item").and_then(|t| t.attr("id")), Some("1"));
        assert_eq!(root.find("missing"), None);
        assert_eq!(root.find_all("item").len(), 2);
        // find includes self
        assert_eq!(root.find("list").map(|t| t.name.as_str()), Some("list"));
    }

    #[test]
    fn test_text_concatenates_descendants() {
        let mut bold = Tag::new("b");
        bold.add_child("world");
        let mut p = Tag::new("p");
        p.add_child("hello ");
        p.add_child(bold);
        p.add_child(Comment::new("ignored"));
        assert_eq!(p.text(), "hello world");
    }

    #[test]
    fn test_document_new_defaults() {
        let doc = Document::new(Tag::new("root"));
        assert_eq!(doc.version, None);
        assert_eq!(doc.encoding, None);
        assert!(doc.misc.is_empty());
        assert!(doc.diagnostics.is_empty());
    }
}
