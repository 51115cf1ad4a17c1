//! Byte cursor over the accumulated parser input.
//!
//! The cursor owns the full buffered input and a single forward position.
//! It tracks the current line number for error reporting and hands the
//! parser lossy UTF-8 string slices, so stray non-UTF-8 bytes degrade to
//! replacement characters instead of aborting the parse.

use memchr::{memchr, memmem};

use crate::error::{ParseError, CONTEXT_BYTES};

pub(crate) struct Cursor {
    buf: Vec<u8>,
    pos: usize,
    line: u32,
}

impl Cursor {
    pub(crate) fn new() -> Self {
        Self {
            buf: Vec::new(),
            pos: 0,
            line: 1,
        }
    }

    /// Appends another chunk of input.
    pub(crate) fn append(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Consumes one byte.
    pub(crate) fn bump(&mut self) {
        if let Some(b) = self.peek() {
            if b == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    /// Consumes `n` bytes, counting newlines in the skipped span.
    pub(crate) fn advance(&mut self, n: usize) {
        let end = (self.pos + n).min(self.buf.len());
        self.line += count_newlines(&self.buf[self.pos..end]);
        self.pos = end;
    }

    /// Skips whitespace and returns the first non-whitespace byte without
    /// consuming it. Returns `None` when the input runs out.
    pub(crate) fn skip_whitespace(&mut self) -> Option<u8> {
        while let Some(b) = self.peek() {
            if !b.is_ascii_whitespace() {
                return Some(b);
            }
            self.bump();
        }
        None
    }

    /// Consumes bytes until `pred` matches (exclusive) or the input ends,
    /// returning them as a lossy string.
    pub(crate) fn take_until(&mut self, pred: impl Fn(u8) -> bool) -> String {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if pred(b) {
                break;
            }
            self.bump();
        }
        String::from_utf8_lossy(&self.buf[start..self.pos]).into_owned()
    }

    /// Consumes bytes up to the next occurrence of `byte` (exclusive),
    /// or the rest of the input when absent. Returns the taken span and
    /// whether the byte was found.
    pub(crate) fn take_until_byte(&mut self, byte: u8) -> (String, bool) {
        let rest = &self.buf[self.pos..];
        let (end, found) = match memchr(byte, rest) {
            Some(i) => (i, true),
            None => (rest.len(), false),
        };
        let taken = String::from_utf8_lossy(&rest[..end]).into_owned();
        self.advance(end);
        (taken, found)
    }

    /// Consumes exactly `n` bytes (capped at the input length), returning
    /// them as a lossy string.
    pub(crate) fn take(&mut self, n: usize) -> String {
        let end = (self.pos + n).min(self.buf.len());
        let taken = String::from_utf8_lossy(&self.buf[self.pos..end]).into_owned();
        self.advance(end - self.pos);
        taken
    }

    /// Whether the unconsumed input begins with `prefix`.
    pub(crate) fn starts_with(&self, prefix: &[u8]) -> bool {
        self.buf[self.pos..].starts_with(prefix)
    }

    /// Offset of the next occurrence of `needle` in the unconsumed input.
    pub(crate) fn find(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(&self.buf[self.pos..], needle)
    }

    pub(crate) fn line(&self) -> u32 {
        self.line
    }

    /// The next few unconsumed bytes, for error context.
    fn context(&self) -> String {
        let rest = &self.buf[self.pos..];
        let end = rest.len().min(CONTEXT_BYTES);
        String::from_utf8_lossy(&rest[..end]).into_owned()
    }

    /// Builds a fatal error at the current position.
    pub(crate) fn fatal(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            line: self.line,
            context: self.context(),
        }
    }
}

fn count_newlines(bytes: &[u8]) -> u32 {
    bytes.iter().filter(|&&b| b == b'\n').count() as u32
}
