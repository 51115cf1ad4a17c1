//! Input prolog sniffing and the UTF-16 downgrade shim.
//!
//! The parser accepts raw bytes and inspects the first few of them once,
//! on the first `feed`:
//!
//! - `EF BB BF`: a UTF-8 BOM, silently consumed.
//! - `FF FE`: a UTF-16LE BOM, routed through [`downgrade_utf16le`].
//! - `3C 00`: no BOM, but a NUL-interleaved `<` strongly suggests
//!   BOM-less UTF-16LE; routed through [`downgrade_utf16le`] as well.
//!
//! Big-endian UTF-16 is not recognized. The downgrade is a best-effort
//! legacy-compatibility shim, **not** Unicode support: every code point
//! outside ASCII is replaced, lossily, with `?`.

/// What the leading bytes of the input look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prolog {
    /// A UTF-8 byte-order mark (`EF BB BF`); skip 3 bytes and parse as-is.
    Utf8Bom,
    /// UTF-16LE content. `bom` is `true` when a `FF FE` mark is present
    /// (and must be skipped), `false` for the bare `3C 00` pattern.
    Utf16Le {
        /// Whether a 2-byte BOM precedes the content.
        bom: bool,
    },
    /// Anything else, parsed as the bytes stand.
    Plain,
}

/// Classifies the start of an input buffer.
///
/// # Examples
///
/// ```
/// use minixml::encoding::{sniff, Prolog};
///
/// assert_eq!(sniff(b"\xEF\xBB\xBF<r/>"), Prolog::Utf8Bom);
/// assert_eq!(sniff(b"\xFF\xFE<\x00"), Prolog::Utf16Le { bom: true });
/// assert_eq!(sniff(b"<\x00r\x00"), Prolog::Utf16Le { bom: false });
/// assert_eq!(sniff(b"<r/>"), Prolog::Plain);
/// ```
#[must_use]
pub fn sniff(bytes: &[u8]) -> Prolog {
    if bytes.len() >= 3 && bytes[0] == 0xEF && bytes[1] == 0xBB && bytes[2] == 0xBF {
        Prolog::Utf8Bom
    } else if bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] == 0xFE {
        Prolog::Utf16Le { bom: true }
    } else if bytes.len() >= 2 && bytes[0] == 0x3C && bytes[1] == 0x00 {
        Prolog::Utf16Le { bom: false }
    } else {
        Prolog::Plain
    }
}

/// Downgrades UTF-16LE bytes to a single-byte-per-character working form.
///
/// The input (without its BOM) is decoded as UTF-16LE via `encoding_rs`;
/// ASCII code points are kept, everything else, including the replacement
/// characters produced for malformed sequences or lone surrogates, becomes
/// a literal `?`.
///
/// This is lossy by design. It exists so that UTF-16 documents produced by
/// legacy tooling still parse when their markup is ASCII, which is the only
/// case the shim promises to handle.
#[must_use]
pub fn downgrade_utf16le(bytes: &[u8]) -> Vec<u8> {
    let (decoded, _, _) = encoding_rs::UTF_16LE.decode(bytes);
    decoded
        .chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}
