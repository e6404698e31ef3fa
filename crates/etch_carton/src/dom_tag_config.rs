//! DOM tag configuration.
//!
//! Static classification of HTML tag names used by the scanner (auto-closing void
//! elements) and the renderer (self-closing output, leading newline handling).

use phf::{phf_set, Set};

/// Elements that never have children and always render as `<tag/>`.
pub static VOID_TAGS: Set<&'static str> = phf_set! {
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen",
    "link", "meta", "param", "source", "track", "wbr", "menuitem",
};

/// Elements whose content drops a single leading line break when parsed by a
/// browser, so the renderer has to emit an extra one.
pub static NEWLINE_EATING_TAGS: Set<&'static str> = phf_set! {
    "listing", "pre", "textarea",
};

#[inline]
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(tag)
}

#[inline]
pub fn is_newline_eating_tag(tag: &str) -> bool {
    NEWLINE_EATING_TAGS.contains(tag)
}

/// Custom elements contain a hyphen. Their attributes bypass the property table.
#[inline]
pub fn is_custom_element(tag: &str) -> bool {
    tag.contains('-')
}

/// Check if a character can start a tag name.
#[inline]
pub fn is_tag_start_char(c: u8) -> bool {
    c.is_ascii_alphabetic()
}
