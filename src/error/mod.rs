//! Error types and diagnostics for XML parsing.
//!
//! This crate has a single fatal error kind, [`ParseError`]. Every error
//! carries the 1-based line number at the point of failure and the next few
//! raw bytes of input, so a message reads like:
//!
//! ```text
//! XML syntax error near line 3, before "</a></b>": unexpected </a>, expected </b>
//! ```
//!
//! Non-fatal findings (today only unrecognized attributes on the `<?xml?>`
//! declaration) are collected as [`ParseDiagnostic`] values on the finished
//! [`Document`](crate::tree::Document) rather than aborting the parse.

use std::fmt;

/// How many raw bytes of input are captured as error context.
pub(crate) const CONTEXT_BYTES: usize = 8;

/// The error type returned when XML parsing fails.
///
/// Parsing is all-or-nothing: the first structural error aborts the parse,
/// no partial tree is returned and no resynchronization is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The primary error message.
    pub message: String,
    /// 1-based line number where the error occurred.
    pub line: u32,
    /// The next (up to 8) raw bytes of input at the point of failure,
    /// decoded lossily for display.
    pub context: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "XML syntax error near line {}, before {:?}: {}",
            self.line, self.context, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// A non-fatal warning emitted during parsing.
///
/// The parser is deliberately lenient in exactly one place: attributes on
/// the `<?xml?>` declaration other than `version` and `encoding` are
/// reported here instead of raising a [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    /// Human-readable description of the finding.
    pub message: String,
    /// 1-based line number where the finding was made.
    pub line: u32,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning: {} near line {}", self.message, self.line)
    }
}
