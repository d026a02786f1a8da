//! Entity escaping for text content and attribute values.

use std::borrow::Cow;

fn needs_escape(ch: char) -> bool {
    matches!(ch, '&' | '<' | '>' | '"' | '\'')
}

/// Escape `& < > " '`. Borrows the input when nothing needs replacing.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(needs_escape) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    escape_into(text, &mut out);
    Cow::Owned(out)
}

/// Append `text` to `out` with `& < > " '` replaced by named entities.
pub fn escape_into(text: &str, out: &mut String) {
    let mut rest = text;
    while let Some(pos) = rest.find(needs_escape) {
        out.push_str(&rest[..pos]);
        // All five are single-byte ASCII.
        out.push_str(match rest.as_bytes()[pos] {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            _ => "&#39;",
        });
        rest = &rest[pos + 1..];
    }
    out.push_str(rest);
}
