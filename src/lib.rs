//! # minixml
//!
//! A small embeddable XML document model with an incremental byte-stream
//! parser and a pretty-printing serializer.
//!
//! The dialect is deliberately narrow: elements, attributes, text, and
//! comments, plus the leading `<?xml?>` declaration. There are no DTDs,
//! namespaces, CDATA sections, or processing instructions, and the only
//! entities handled are `&gt;`, `&lt;`, and `&quot;`. Input encoding
//! detection is limited to skipping a UTF-8 BOM and a lossy ASCII
//! downgrade for UTF-16LE input.
//!
//! ## Quick start
//!
//! ```
//! use minixml::Document;
//!
//! let doc = Document::parse_str(
//!     r#"<?xml version="1.0"?><config><port value="8080"/></config>"#,
//! )?;
//! let port = doc.root.find("port").and_then(|t| t.attr("value"));
//! assert_eq!(port, Some("8080"));
//! # Ok::<(), minixml::ParseError>(())
//! ```
//!
//! Streaming input goes through [`Parser`] directly:
//!
//! ```
//! use minixml::Parser;
//!
//! let mut parser = Parser::new();
//! for chunk in [&b"<log><line>ok</"[..], &b"line></log>"[..]] {
//!     parser.feed(chunk);
//! }
//! let doc = parser.parse()?;
//! assert_eq!(doc.root.text(), "ok");
//! # Ok::<(), minixml::ParseError>(())
//! ```
//!
//! ## Building and rendering trees
//!
//! ```
//! use minixml::{Document, Tag};
//!
//! let mut root = Tag::new("greeting");
//! root.set_attr("lang", "en");
//! root.add_child("hello");
//! let out = Document::new(root).serialize();
//! assert!(out.ends_with("<greeting lang=\"en\">hello</greeting>"));
//! ```
//!
//! Serialization keeps a tag on one line while its compact form fits in
//! 80 columns and otherwise indents each child by two spaces; see
//! [`serial`] for the exact layout rules.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

pub mod encoding;
pub mod entity;
pub mod error;
pub mod parser;
pub mod serial;
pub mod tree;

pub use error::{ParseDiagnostic, ParseError};
pub use parser::Parser;
pub use serial::serialize;
pub use tree::{Attribute, Comment, Document, Misc, Node, Tag};
