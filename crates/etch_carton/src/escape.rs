//! HTML escaping and entity decoding.

use std::borrow::Cow;

/// Escape text for HTML content and double-quoted attribute values.
///
/// `&`, `<`, `>`, `"` and `'` are replaced; the apostrophe uses the hexadecimal
/// form `&#x27;` so output matches the reference renderer byte for byte.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    let Some(first) = s.bytes().position(needs_escape) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + 8);
    out.push_str(&s[..first]);
    for c in s[first..].chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escape into an existing buffer.
#[inline]
pub fn escape_html_into(out: &mut String, s: &str) {
    out.push_str(&escape_html(s));
}

#[inline]
fn needs_escape(b: u8) -> bool {
    matches!(b, b'&' | b'<' | b'>' | b'"' | b'\'')
}

/// Decode character references (`&amp;`, `&#39;`, `&nbsp;`, ...) in literal template
/// text and attribute values.
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(htmlize::unescape(s).to_string())
}
