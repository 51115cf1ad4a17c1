//! Entity encoding and decoding.
//!
//! This crate handles exactly three character entities: `&gt;`, `&lt;` and
//! `&quot;`. There is no generic numeric or named entity support; [`decode`]
//! passes anything else through verbatim, by design. Both directions are
//! stateless and used on text content and attribute values; comment text
//! is never entity-coded.

use memchr::{memchr, memchr3};

/// Replaces every `>`, `<` and `"` with its escaped form.
///
/// All other characters, including `&` and already-escaped sequences, are
/// left untouched. This means `encode` is not idempotent-safe around text
/// that already contains escapes; callers hold decoded text.
///
/// # Examples
///
/// ```
/// assert_eq!(minixml::entity::encode("a < b"), "a &lt; b");
/// assert_eq!(minixml::entity::encode("&lt;"), "&lt;");
/// ```
#[must_use]
pub fn encode(text: &str) -> String {
    // Fast path: nothing to escape.
    if memchr3(b'>', b'<', b'"', text.as_bytes()).is_none() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '>' => out.push_str("&gt;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Replaces `&gt;`, `&lt;` and `&quot;` (case-insensitive) with `>`, `<`
/// and `"`.
///
/// Any other `&`-led substring is kept verbatim: decode is permissive and
/// never fails. `decode(encode(s)) == s` holds for any `s` that contains no
/// literal `&`; in the presence of `&` followed by escape-looking text the
/// two are intentionally not inverses.
///
/// # Examples
///
/// ```
/// assert_eq!(minixml::entity::decode("a &lt; b"), "a < b");
/// assert_eq!(minixml::entity::decode("&GT;"), ">");
/// assert_eq!(minixml::entity::decode("&amp;"), "&amp;");
/// ```
#[must_use]
pub fn decode(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(off) = memchr(b'&', &bytes[pos..]) {
        let amp = pos + off;
        // '&' is ASCII, so amp is always a char boundary.
        out.push_str(&text[pos..amp]);
        let rest = &bytes[amp..];
        if starts_with_ci(rest, b"&gt;") {
            out.push('>');
            pos = amp + 4;
        } else if starts_with_ci(rest, b"&lt;") {
            out.push('<');
            pos = amp + 4;
        } else if starts_with_ci(rest, b"&quot;") {
            out.push('"');
            pos = amp + 6;
        } else {
            out.push('&');
            pos = amp + 1;
        }
    }
    out.push_str(&text[pos..]);
    out
}

/// ASCII case-insensitive prefix check.
fn starts_with_ci(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
}
