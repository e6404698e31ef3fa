//! Inline style helpers.

use compact_str::CompactString;
use phf::{phf_set, Set};

/// CSS properties that accept plain numbers, so no `px` suffix is appended.
pub static UNITLESS_PROPERTIES: Set<&'static str> = phf_set! {
    "animationIterationCount", "borderImageOutset", "borderImageSlice", "borderImageWidth",
    "boxFlex", "boxFlexGroup", "boxOrdinalGroup", "columnCount", "columns", "flex",
    "flexGrow", "flexPositive", "flexShrink", "flexNegative", "flexOrder", "gridArea",
    "gridRow", "gridRowEnd", "gridRowSpan", "gridRowStart", "gridColumn", "gridColumnEnd",
    "gridColumnSpan", "gridColumnStart", "fontWeight", "lineClamp", "lineHeight", "opacity",
    "order", "orphans", "tabSize", "widows", "zIndex", "zoom",
    // SVG
    "fillOpacity", "floodOpacity", "stopOpacity", "strokeDasharray", "strokeDashoffset",
    "strokeMiterlimit", "strokeOpacity", "strokeWidth",
};

const VENDOR_PREFIXES: [&str; 4] = ["Webkit", "ms", "Moz", "O"];

/// Whether a (camelCase) style property takes unitless numbers.
///
/// Vendor-prefixed variants (`WebkitFlexGrow`, `msFlex`) follow their base property.
pub fn is_unitless_property(name: &str) -> bool {
    if UNITLESS_PROPERTIES.contains(name) {
        return true;
    }
    for prefix in VENDOR_PREFIXES {
        if let Some(rest) = name.strip_prefix(prefix) {
            let mut chars = rest.chars();
            if let Some(first) = chars.next() {
                if first.is_ascii_uppercase() {
                    let mut base = CompactString::default();
                    base.push(first.to_ascii_lowercase());
                    base.push_str(chars.as_str());
                    if UNITLESS_PROPERTIES.contains(base.as_str()) {
                        return true;
                    }
                }
            }
        }
    }
    false
}

/// Convert a camelCase style property to its CSS name.
///
/// `backgroundColor` becomes `background-color` and the `ms` vendor prefix becomes
/// `-ms-`. Custom properties (`--foo`) must not be passed here.
pub fn hyphenate_style_name(name: &str) -> CompactString {
    let mut out = CompactString::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    out
}

#[inline]
pub fn is_custom_style_property(name: &str) -> bool {
    name.starts_with("--")
}
