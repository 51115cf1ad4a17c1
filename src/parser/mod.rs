//! The incremental XML parser.
//!
//! Input arrives through [`Parser::feed`], which may be called any number
//! of times before [`Parser::parse`] consumes the parser and returns the
//! finished [`Document`]. The first `feed` call sniffs the byte prolog:
//! a UTF-8 BOM is skipped, and UTF-16LE input is routed through the lossy
//! ASCII downgrade in [`crate::encoding`].
//!
//! Parsing is a single pass. The element tokenizer produces one token at
//! a time (a text run, a comment, or a tag with its attributes) and the
//! driving state machine places each token using a stack of currently
//! open tags. Any structural fault is fatal and reported as a
//! [`ParseError`] carrying the line number and the next few raw bytes.
//! The one lenient case is an unrecognized attribute on the `<?xml?>`
//! declaration, which is recorded as a [`ParseDiagnostic`] instead.

mod input;

use crate::encoding::{self, Prolog};
use crate::entity;
use crate::error::{ParseDiagnostic, ParseError};
use crate::tree::{Comment, Document, Misc, Tag};

use input::Cursor;

/// One token from the element tokenizer.
enum Element {
    Text(String),
    Comment(Comment),
    Tag(Tag),
}

/// Incremental whole-document parser.
///
/// ```
/// use minixml::Parser;
///
/// let mut parser = Parser::new();
/// parser.feed(b"<greeting>hel");
/// parser.feed(b"lo</greeting>");
/// let doc = parser.parse().unwrap();
/// assert_eq!(doc.root.text(), "hello");
/// ```
pub struct Parser {
    cursor: Cursor,
    fed: bool,
    diagnostics: Vec<ParseDiagnostic>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cursor: Cursor::new(),
            fed: false,
            diagnostics: Vec::new(),
        }
    }

    /// Appends input bytes.
    ///
    /// The first call inspects the byte prolog: a UTF-8 BOM is consumed
    /// silently, and a UTF-16LE BOM or NUL-interleaved leading bytes
    /// switch the chunk through the lossy ASCII downgrade. Later chunks
    /// are appended as-is.
    pub fn feed(&mut self, bytes: &[u8]) -> &mut Self {
        if self.fed {
            self.cursor.append(bytes);
            return self;
        }
        self.fed = true;
        match encoding::sniff(bytes) {
            Prolog::Utf8Bom => self.cursor.append(&bytes[3..]),
            Prolog::Utf16Le { bom } => {
                let body = if bom { &bytes[2..] } else { bytes };
                self.cursor.append(&encoding::downgrade_utf16le(body));
            }
            Prolog::Plain => self.cursor.append(bytes),
        }
        self
    }

    /// Parses the accumulated input into a [`Document`], consuming the
    /// parser.
    ///
    /// # Errors
    ///
    /// Fails with [`ParseError`] on any structural fault: unterminated
    /// tag, comment, or quoted value, a mismatched or unexpected closing
    /// tag, an invalid tag or attribute name, a misplaced or repeated
    /// `<?xml?>` declaration, a second root element, an input that ends
    /// with open tags, or an input with no root element at all.
    pub fn parse(mut self) -> Result<Document, ParseError> {
        let mut stack: Vec<Tag> = Vec::new();
        let mut root_slot: Option<Tag> = None;
        let mut root_taken = false;
        let mut seen_decl = false;
        let mut version: Option<String> = None;
        let mut encoding: Option<String> = None;
        let mut misc: Vec<Misc> = Vec::new();

        while !self.cursor.at_end() {
            match self.next_element()? {
                Element::Text(raw) => {
                    // Whitespace between tags carries no meaning.
                    if raw.trim().is_empty() {
                        continue;
                    }
                    match stack.last_mut() {
                        Some(parent) => {
                            parent.add_child(entity::decode(&raw));
                        }
                        None => misc.push(Misc::Text(raw.trim().to_owned())),
                    }
                }
                Element::Comment(comment) => match stack.last_mut() {
                    Some(parent) => {
                        parent.add_child(comment);
                    }
                    None => misc.push(Misc::Comment(comment)),
                },
                Element::Tag(tag) if tag.name == "?xml" => {
                    if !stack.is_empty() || root_taken || !misc.is_empty() {
                        return Err(self.cursor.fatal("misplaced <?xml?> declaration"));
                    }
                    if seen_decl {
                        return Err(self.cursor.fatal("multiple <?xml?> declarations"));
                    }
                    seen_decl = true;
                    for attr in tag.attributes() {
                        match attr.name.as_str() {
                            "version" => version = Some(attr.value.clone()),
                            "encoding" => encoding = Some(attr.value.clone()),
                            other => self.diagnostics.push(ParseDiagnostic {
                                message: format!("unhandled declaration attribute {other:?}"),
                                line: self.cursor.line(),
                            }),
                        }
                    }
                }
                Element::Tag(tag) if tag.name.starts_with('/') => {
                    let name = tag.name[1..].to_owned();
                    if !tag.attributes().is_empty() || tag.is_self_closing() || name.is_empty() {
                        return Err(self.cursor.fatal(format!("malformed closing tag </{name}>")));
                    }
                    let top = match stack.pop() {
                        Some(top) => top,
                        None => return Err(self.cursor.fatal(format!("unexpected </{name}>"))),
                    };
                    if top.name != name {
                        return Err(self.cursor.fatal(format!(
                            "unexpected </{name}>, expected </{open}>",
                            open = top.name
                        )));
                    }
                    match stack.last_mut() {
                        Some(parent) => {
                            parent.add_child(top);
                        }
                        None => root_slot = Some(top),
                    }
                }
                Element::Tag(tag) => {
                    if !valid_tag_name(&tag.name) {
                        return Err(self
                            .cursor
                            .fatal(format!("invalid tag name <{}>", tag.name)));
                    }
                    if let Some(parent) = stack.last_mut() {
                        if tag.is_self_closing() {
                            parent.add_child(tag);
                        } else {
                            stack.push(tag);
                        }
                    } else {
                        if root_taken {
                            return Err(self.cursor.fatal("multiple root elements"));
                        }
                        root_taken = true;
                        if tag.is_self_closing() {
                            root_slot = Some(tag);
                        } else {
                            stack.push(tag);
                        }
                    }
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(self
                .cursor
                .fatal(format!("unexpected end of input, <{}> not closed", open.name)));
        }
        let root = match root_slot {
            Some(root) => root,
            None => return Err(self.cursor.fatal("no root element")),
        };
        Ok(Document {
            version,
            encoding,
            misc,
            root,
            diagnostics: self.diagnostics,
        })
    }

    // -- Tokenizer --

    fn next_element(&mut self) -> Result<Element, ParseError> {
        if self.cursor.peek() == Some(b'<') {
            self.cursor.bump();
            self.parse_tag()
        } else {
            let (text, _) = self.cursor.take_until_byte(b'<');
            Ok(Element::Text(text))
        }
    }

    /// Parses one tag, the `<` already consumed. Comments are recognized
    /// here and re-routed before any name tokenization happens.
    fn parse_tag(&mut self) -> Result<Element, ParseError> {
        self.cursor.skip_whitespace();
        if self.cursor.starts_with(b"!--") {
            self.cursor.advance(3);
            let len = match self.cursor.find(b"-->") {
                Some(len) => len,
                None => return Err(self.cursor.fatal("unterminated comment")),
            };
            let text = self.cursor.take(len);
            self.cursor.advance(3);
            return Ok(Element::Comment(Comment::new(text.trim())));
        }

        let mut name = String::new();
        if self.cursor.peek() == Some(b'/') {
            name.push('/');
            self.cursor.bump();
        }
        name.push_str(&self.cursor.take_until(name_stop));
        let mut tag = Tag::new(name);

        loop {
            match self.cursor.skip_whitespace() {
                None => {
                    return Err(self
                        .cursor
                        .fatal(format!("unterminated tag <{}>", tag.name)))
                }
                Some(b'>') => {
                    self.cursor.bump();
                    break;
                }
                Some(_) => self.parse_attribute(&mut tag)?,
            }
        }
        Ok(Element::Tag(tag))
    }

    /// Parses one attribute-position token: `/>`, the closing `?` of a
    /// declaration, or a `name[=value]` pair. The cursor sits on a
    /// non-whitespace byte that is not `>`.
    fn parse_attribute(&mut self, tag: &mut Tag) -> Result<(), ParseError> {
        match self.cursor.peek() {
            Some(b'/') => {
                self.cursor.bump();
                if self.cursor.skip_whitespace() != Some(b'>') {
                    return Err(self
                        .cursor
                        .fatal(format!("expected > after / in <{}>", tag.name)));
                }
                tag.set_self_closing(true);
                Ok(())
            }
            Some(b'?') if tag.name.starts_with('?') => {
                self.cursor.bump();
                Ok(())
            }
            Some(b) if b.is_ascii_alphabetic() => {
                let name = self
                    .cursor
                    .take_until(|b| name_stop(b) || b == b'=');
                if !valid_attr_name(&name) {
                    return Err(self.cursor.fatal(format!(
                        "invalid attribute name {name:?} in <{}>",
                        tag.name
                    )));
                }
                let value = if self.cursor.skip_whitespace() == Some(b'=') {
                    self.cursor.bump();
                    match self.cursor.skip_whitespace() {
                        Some(quote @ (b'"' | b'\'')) => {
                            self.cursor.bump();
                            let (value, closed) = self.cursor.take_until_byte(quote);
                            if !closed {
                                return Err(self.cursor.fatal(format!(
                                    "unterminated quote in <{}>",
                                    tag.name
                                )));
                            }
                            self.cursor.bump();
                            value
                        }
                        _ => self.cursor.take_until(name_stop),
                    }
                } else {
                    // Bare attribute, value defaults to the name.
                    name.clone()
                };
                tag.set_attr(name, entity::decode(&value));
                Ok(())
            }
            _ => Err(self
                .cursor
                .fatal(format!("invalid attribute in <{}>", tag.name))),
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn name_stop(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'/' || b == b'>'
}

fn valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '-'))
}

fn valid_attr_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | ':' | '.' | '-'))
}
