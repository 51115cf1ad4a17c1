//! Pretty-printing serializer.
//!
//! Rendering is the syntactic inverse of the parser: attribute values and
//! text children go back through [`entity::encode`], comments re-wrap in
//! `<!-- -->`, and a [`Document`] gets its declaration line (with
//! `version`/`encoding` defaults) plus any recorded pre-root content.
//!
//! ## Layout
//!
//! A tag renders in one of two modes. When its compact one-line form fits
//! in 80 columns it is emitted as-is. Otherwise each child tag or comment
//! goes on its own line indented by two more spaces, while text children
//! stay inline where they fall; when the last child is text, the closing
//! tag follows it immediately instead of moving to a fresh line.

use crate::entity;
use crate::tree::{Document, Node, Tag};

/// Compact renderings longer than this wrap onto multiple lines.
const WRAP_COLUMNS: usize = 80;

/// Renders a full document: declaration line, pre-root content, root tag.
#[must_use]
pub fn serialize(doc: &Document) -> String {
    let version = doc.version.as_deref().unwrap_or("1.0");
    let encoding = doc.encoding.as_deref().unwrap_or("us-ascii");
    let mut out = format!(
        "<?xml version=\"{}\" encoding=\"{}\"?>\n",
        entity::encode(version),
        entity::encode(encoding)
    );
    for misc in &doc.misc {
        out.push_str(&misc.to_string());
        out.push('\n');
    }
    out.push_str(&render_tag(&doc.root, ""));
    out
}

/// Renders one node at the given indent.
#[must_use]
pub fn render(node: &Node, indent: &str) -> String {
    match node {
        Node::Text(text) => format!("{indent}{}", entity::encode(text)),
        Node::Tag(tag) => render_tag(tag, indent),
        Node::Comment(comment) => format!("{indent}{comment}"),
    }
}

/// Renders one tag at the given indent, choosing compact or wrapped
/// layout by the 80-column rule.
#[must_use]
pub fn render_tag(tag: &Tag, indent: &str) -> String {
    if tag.is_self_closing() {
        return format!("{indent}{}/>", head(tag));
    }
    let compact = compact_tag(tag);
    if compact.len() <= WRAP_COLUMNS {
        return format!("{indent}{compact}");
    }

    let mut out = format!("{indent}{}>", head(tag));
    let child_indent = format!("{indent}  ");
    let mut last_was_text = false;
    for child in tag.children() {
        match child {
            Node::Text(text) => {
                out.push_str(&entity::encode(text));
                last_was_text = true;
            }
            Node::Tag(child) => {
                out.push('\n');
                out.push_str(&render_tag(child, &child_indent));
                last_was_text = false;
            }
            Node::Comment(comment) => {
                out.push('\n');
                out.push_str(&child_indent);
                out.push_str(&comment.to_string());
                last_was_text = false;
            }
        }
    }
    if !last_was_text {
        out.push('\n');
        out.push_str(indent);
    }
    out.push_str("</");
    out.push_str(&tag.name);
    out.push('>');
    out
}

/// `<name` plus encoded `key="value"` pairs, no closer.
fn head(tag: &Tag) -> String {
    let mut out = format!("<{}", tag.name);
    for attr in tag.attributes() {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        out.push_str(&entity::encode(&attr.value));
        out.push('"');
    }
    out
}

/// The single-line form, indent-free. Its length drives the layout choice.
fn compact_tag(tag: &Tag) -> String {
    let mut out = format!("{}>", head(tag));
    for child in tag.children() {
        out.push_str(&render(child, ""));
    }
    out.push_str("</");
    out.push_str(&tag.name);
    out.push('>');
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tree::Comment;

    #[test]
    fn test_compact_tag_with_attributes() {
        let mut tag = Tag::new("a");
        tag.set_attr("x", "1");
        let mut b = Tag::new("b");
        b.add_child("hi");
        tag.add_child(b);
        assert_eq!(render_tag(&tag, ""), r#"<a x="1"><b>hi</b></a>"#);
    }

    #[test]
    fn test_self_closing_has_no_space() {
        let mut tag = Tag::self_closing("br");
        tag.set_attr("clear", "all");
        assert_eq!(render_tag(&tag, ""), r#"<br clear="all"/>"#);
    }

    #[test]
    fn test_empty_tag_without_flag_uses_pair() {
        assert_eq!(render_tag(&Tag::new("p"), ""), "<p></p>");
    }

    #[test]
    fn test_attribute_values_encoded() {
        let mut tag = Tag::self_closing("a");
        tag.set_attr("cmp", "<=>");
        assert_eq!(render_tag(&tag, ""), r#"<a cmp="&lt;=&gt;"/>"#);
    }

    #[test]
    fn test_text_children_encoded() {
        let mut tag = Tag::new("a");
        tag.add_child("say \"<hi>\"");
        assert_eq!(render_tag(&tag, ""), "<a>say &quot;&lt;hi&gt;&quot;</a>");
    }

    #[test]
    fn test_exactly_80_stays_compact() {
        // <a> + 73-byte child + </a> is exactly 80 bytes.
        let mut tag = Tag::new("a");
        tag.add_child(Tag::self_closing(&"x".repeat(70)));
        let out = render_tag(&tag, "");
        assert_eq!(out.len(), 80);
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_81_wraps() {
        let child_name = "x".repeat(71);
        let mut tag = Tag::new("a");
        tag.add_child(Tag::self_closing(&child_name));
        let out = render_tag(&tag, "");
        assert_eq!(out, format!("<a>\n  <{child_name}/>\n</a>"));
    }

    #[test]
    fn test_wrapped_children_indent_two_spaces() {
        let mut tag = Tag::new("list");
        for i in 0..6 {
            let mut item = Tag::new("item");
            item.set_attr("id", format!("item-number-{i}"));
            tag.add_child(item);
        }
        let out = render_tag(&tag, "");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "<list>");
        assert_eq!(lines[1], r#"  <item id="item-number-0"></item>"#);
        assert_eq!(lines[7], "</list>");
    }

    #[test]
    fn test_wrapped_trailing_text_keeps_close_inline() {
        let mut tag = Tag::new("p");
        tag.add_child(Tag::self_closing(&"q".repeat(80)));
        tag.add_child("tail");
        let out = render_tag(&tag, "");
        assert!(out.ends_with("tail</p>"));
    }

    #[test]
    fn test_wrapped_comment_child_on_own_line() {
        let mut tag = Tag::new("p");
        tag.add_child(Tag::self_closing(&"q".repeat(80)));
        tag.add_child(Comment::new("note"));
        let out = render_tag(&tag, "");
        assert!(out.ends_with("\n  <!-- note -->\n</p>"));
    }

    #[test]
    fn test_document_defaults() {
        let doc = Document::new(Tag::self_closing("r"));
        assert_eq!(
            serialize(&doc),
            "<?xml version=\"1.0\" encoding=\"us-ascii\"?>\n<r/>"
        );
    }

    #[test]
    fn test_document_misc_lines_precede_root() {
        let doc = Document::parse_str("<!-- hi --> <root/>").unwrap();
        assert_eq!(
            serialize(&doc),
            "<?xml version=\"1.0\" encoding=\"us-ascii\"?>\n<!-- hi -->\n<root/>"
        );
    }

    #[test]
    fn test_nested_indent_accumulates() {
        let mut inner = Tag::new("inner");
        inner.add_child(Tag::self_closing(&"w".repeat(80)));
        let mut outer = Tag::new("outer");
        outer.add_child(inner);
        let out = render_tag(&outer, "");
        assert!(out.contains("\n  <inner>\n    <"));
        assert!(out.ends_with("\n  </inner>\n</outer>"));
    }
}
