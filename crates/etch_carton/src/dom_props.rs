//! DOM property table.
//!
//! Maps a prop name as written in a template (`className`, `htmlFor`, `tabIndex`,
//! `strokeWidth`, ...) to the attribute name that is emitted and to the value policy
//! that decides whether and how the value is serialized.
//!
//! Props that are not listed are emitted verbatim under their own name with the
//! [`PropertyKind::String`] policy, except that booleans are dropped (see
//! [`accepts_booleans`]).

use phf::{phf_map, Map};

/// How a property value is turned into an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PropertyKind {
    /// Handled by the renderer itself, never serialized as an attribute.
    Reserved = 0,
    /// Any value is stringified.
    String = 1,
    /// Booleans are stringified to `"true"` / `"false"`.
    BooleanishString = 2,
    /// Present as `name=""` when truthy, omitted otherwise.
    Boolean = 3,
    /// `name=""` for `true`, omitted for `false`, stringified otherwise.
    OverloadedBoolean = 4,
    /// Omitted when the value is not a number.
    Numeric = 5,
    /// Omitted when the value is not a number or is below 1.
    PositiveNumeric = 6,
}

/// A property table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyInfo {
    pub attribute_name: &'static str,
    pub kind: PropertyKind,
}

impl PropertyInfo {
    /// Whether boolean values are meaningful for this property.
    #[inline]
    pub fn accepts_booleans(&self) -> bool {
        matches!(
            self.kind,
            PropertyKind::BooleanishString | PropertyKind::Boolean | PropertyKind::OverloadedBoolean
        )
    }
}

const fn info(attribute_name: &'static str, kind: PropertyKind) -> PropertyInfo {
    PropertyInfo {
        attribute_name,
        kind,
    }
}

use PropertyKind::{
    Boolean, BooleanishString, Numeric, OverloadedBoolean, PositiveNumeric, Reserved,
    String as Str,
};

/// Known properties, keyed by prop name.
pub static PROPERTIES: Map<&'static str, PropertyInfo> = phf_map! {
    // Reserved
    "children" => info("children", Reserved),
    "dangerouslySetInnerHTML" => info("dangerouslySetInnerHTML", Reserved),
    "defaultValue" => info("defaultValue", Reserved),
    "defaultChecked" => info("defaultChecked", Reserved),
    "innerHTML" => info("innerHTML", Reserved),
    "suppressContentEditableWarning" => info("suppressContentEditableWarning", Reserved),
    "suppressHydrationWarning" => info("suppressHydrationWarning", Reserved),
    "style" => info("style", Reserved),

    // Renamed string attributes
    "acceptCharset" => info("accept-charset", Str),
    "className" => info("class", Str),
    "htmlFor" => info("for", Str),
    "httpEquiv" => info("http-equiv", Str),
    "tabIndex" => info("tabindex", Str),
    "crossOrigin" => info("crossorigin", Str),

    // Booleanish strings
    "contentEditable" => info("contenteditable", BooleanishString),
    "draggable" => info("draggable", BooleanishString),
    "spellCheck" => info("spellcheck", BooleanishString),
    "value" => info("value", BooleanishString),
    "autoReverse" => info("autoReverse", BooleanishString),
    "externalResourcesRequired" => info("externalResourcesRequired", BooleanishString),
    "focusable" => info("focusable", BooleanishString),
    "preserveAlpha" => info("preserveAlpha", BooleanishString),

    // Booleans
    "allowFullScreen" => info("allowfullscreen", Boolean),
    "async" => info("async", Boolean),
    "autoFocus" => info("autofocus", Boolean),
    "autoPlay" => info("autoplay", Boolean),
    "controls" => info("controls", Boolean),
    "default" => info("default", Boolean),
    "defer" => info("defer", Boolean),
    "disabled" => info("disabled", Boolean),
    "disablePictureInPicture" => info("disablepictureinpicture", Boolean),
    "formNoValidate" => info("formnovalidate", Boolean),
    "hidden" => info("hidden", Boolean),
    "loop" => info("loop", Boolean),
    "noModule" => info("nomodule", Boolean),
    "noValidate" => info("novalidate", Boolean),
    "open" => info("open", Boolean),
    "playsInline" => info("playsinline", Boolean),
    "readOnly" => info("readonly", Boolean),
    "required" => info("required", Boolean),
    "reversed" => info("reversed", Boolean),
    "scoped" => info("scoped", Boolean),
    "seamless" => info("seamless", Boolean),
    "itemScope" => info("itemscope", Boolean),
    "checked" => info("checked", Boolean),
    "multiple" => info("multiple", Boolean),
    "muted" => info("muted", Boolean),
    "selected" => info("selected", Boolean),

    // Overloaded booleans
    "capture" => info("capture", OverloadedBoolean),
    "download" => info("download", OverloadedBoolean),

    // Numbers
    "cols" => info("cols", PositiveNumeric),
    "rows" => info("rows", PositiveNumeric),
    "size" => info("size", PositiveNumeric),
    "span" => info("span", PositiveNumeric),
    "rowSpan" => info("rowspan", Numeric),
    "start" => info("start", Numeric),

    // Namespaced
    "xlinkActuate" => info("xlink:actuate", Str),
    "xlinkArcrole" => info("xlink:arcrole", Str),
    "xlinkHref" => info("xlink:href", Str),
    "xlinkRole" => info("xlink:role", Str),
    "xlinkShow" => info("xlink:show", Str),
    "xlinkTitle" => info("xlink:title", Str),
    "xlinkType" => info("xlink:type", Str),
    "xmlBase" => info("xml:base", Str),
    "xmlLang" => info("xml:lang", Str),
    "xmlSpace" => info("xml:space", Str),
    "xmlnsXlink" => info("xmlns:xlink", Str),

    // SVG presentation attributes
    "accentHeight" => info("accent-height", Str),
    "alignmentBaseline" => info("alignment-baseline", Str),
    "arabicForm" => info("arabic-form", Str),
    "baselineShift" => info("baseline-shift", Str),
    "capHeight" => info("cap-height", Str),
    "clipPath" => info("clip-path", Str),
    "clipRule" => info("clip-rule", Str),
    "colorInterpolation" => info("color-interpolation", Str),
    "colorInterpolationFilters" => info("color-interpolation-filters", Str),
    "colorProfile" => info("color-profile", Str),
    "colorRendering" => info("color-rendering", Str),
    "dominantBaseline" => info("dominant-baseline", Str),
    "enableBackground" => info("enable-background", Str),
    "fillOpacity" => info("fill-opacity", Str),
    "fillRule" => info("fill-rule", Str),
    "floodColor" => info("flood-color", Str),
    "floodOpacity" => info("flood-opacity", Str),
    "fontFamily" => info("font-family", Str),
    "fontSize" => info("font-size", Str),
    "fontSizeAdjust" => info("font-size-adjust", Str),
    "fontStretch" => info("font-stretch", Str),
    "fontStyle" => info("font-style", Str),
    "fontVariant" => info("font-variant", Str),
    "fontWeight" => info("font-weight", Str),
    "glyphName" => info("glyph-name", Str),
    "glyphOrientationHorizontal" => info("glyph-orientation-horizontal", Str),
    "glyphOrientationVertical" => info("glyph-orientation-vertical", Str),
    "horizAdvX" => info("horiz-adv-x", Str),
    "horizOriginX" => info("horiz-origin-x", Str),
    "imageRendering" => info("image-rendering", Str),
    "letterSpacing" => info("letter-spacing", Str),
    "lightingColor" => info("lighting-color", Str),
    "markerEnd" => info("marker-end", Str),
    "markerMid" => info("marker-mid", Str),
    "markerStart" => info("marker-start", Str),
    "overlinePosition" => info("overline-position", Str),
    "overlineThickness" => info("overline-thickness", Str),
    "paintOrder" => info("paint-order", Str),
    "panose1" => info("panose-1", Str),
    "pointerEvents" => info("pointer-events", Str),
    "renderingIntent" => info("rendering-intent", Str),
    "shapeRendering" => info("shape-rendering", Str),
    "stopColor" => info("stop-color", Str),
    "stopOpacity" => info("stop-opacity", Str),
    "strikethroughPosition" => info("strikethrough-position", Str),
    "strikethroughThickness" => info("strikethrough-thickness", Str),
    "strokeDasharray" => info("stroke-dasharray", Str),
    "strokeDashoffset" => info("stroke-dashoffset", Str),
    "strokeLinecap" => info("stroke-linecap", Str),
    "strokeLinejoin" => info("stroke-linejoin", Str),
    "strokeMiterlimit" => info("stroke-miterlimit", Str),
    "strokeOpacity" => info("stroke-opacity", Str),
    "strokeWidth" => info("stroke-width", Str),
    "textAnchor" => info("text-anchor", Str),
    "textDecoration" => info("text-decoration", Str),
    "textRendering" => info("text-rendering", Str),
    "underlinePosition" => info("underline-position", Str),
    "underlineThickness" => info("underline-thickness", Str),
    "unicodeBidi" => info("unicode-bidi", Str),
    "unicodeRange" => info("unicode-range", Str),
    "unitsPerEm" => info("units-per-em", Str),
    "vAlphabetic" => info("v-alphabetic", Str),
    "vHanging" => info("v-hanging", Str),
    "vIdeographic" => info("v-ideographic", Str),
    "vMathematical" => info("v-mathematical", Str),
    "vectorEffect" => info("vector-effect", Str),
    "vertAdvY" => info("vert-adv-y", Str),
    "vertOriginX" => info("vert-origin-x", Str),
    "vertOriginY" => info("vert-origin-y", Str),
    "wordSpacing" => info("word-spacing", Str),
    "writingMode" => info("writing-mode", Str),
    "xHeight" => info("x-height", Str),
};

/// Look up a prop in the property table.
#[inline]
pub fn property_info(name: &str) -> Option<&'static PropertyInfo> {
    PROPERTIES.get(name)
}

/// Whether boolean values survive for `name`.
///
/// Unknown props only keep booleans when they are `data-*` or `aria-*` attributes.
pub fn accepts_booleans(name: &str, info: Option<&PropertyInfo>) -> bool {
    match info {
        Some(info) => info.accepts_booleans(),
        None => {
            let prefix = name.get(..5).map(|p| p.to_ascii_lowercase());
            matches!(prefix.as_deref(), Some("data-") | Some("aria-"))
        }
    }
}

/// Props that never reach the markup: reserved props and event handlers (`on*`).
pub fn should_ignore_attribute(name: &str, info: Option<&PropertyInfo>) -> bool {
    if let Some(info) = info {
        return info.kind == PropertyKind::Reserved;
    }
    let bytes = name.as_bytes();
    bytes.len() > 2 && matches!(bytes[0], b'o' | b'O') && matches!(bytes[1], b'n' | b'N')
}

/// Props handled by the renderer on custom elements.
pub fn is_reserved_custom_prop(name: &str) -> bool {
    matches!(
        name,
        "children"
            | "dangerouslySetInnerHTML"
            | "suppressContentEditableWarning"
            | "suppressHydrationWarning"
    )
}

fn is_attribute_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}')
}

fn is_attribute_name_char(c: char) -> bool {
    is_attribute_name_start_char(c)
        || matches!(c, '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

/// Attribute names that can be written into markup without breaking the tag.
pub fn is_attribute_name_safe(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_attribute_name_start_char(first) => chars.all(is_attribute_name_char),
        _ => false,
    }
}
