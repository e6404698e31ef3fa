//! Inline style serialization.

use compact_str::{format_compact, CompactString};
use etch_carton::{
    escape_html_into, format_number, hyphenate_style_name, is_custom_style_property,
    is_unitless_property,
};
use etch_relief::{EtchError, Result};

use crate::value::{Props, Value};

/// Write ` style="..."` for a style object. Null writes nothing; any other
/// non-object is an error.
pub(crate) fn render_style(out: &mut String, value: &Value) -> Result<()> {
    match value {
        Value::Undefined | Value::Null => Ok(()),
        Value::Object(styles) => {
            if let Some(css) = serialize_style(styles) {
                out.push_str(" style=\"");
                escape_html_into(out, &css);
                out.push('"');
            }
            Ok(())
        }
        _ => Err(EtchError::StyleNotObject),
    }
}

/// `name:value` pairs joined by `;`, or `None` when every value is null.
pub fn serialize_style(styles: &Props) -> Option<String> {
    let mut css = String::new();
    let mut delimiter = "";
    for (name, value) in styles {
        if value.is_nullish() {
            continue;
        }
        let custom = is_custom_style_property(name);
        css.push_str(delimiter);
        if custom {
            css.push_str(name);
        } else {
            css.push_str(&hyphenate_style_name(name));
        }
        css.push(':');
        css.push_str(&style_value(name, value, custom));
        delimiter = ";";
    }
    (!css.is_empty()).then_some(css)
}

fn style_value(name: &str, value: &Value, custom: bool) -> CompactString {
    match value {
        Value::Bool(_) => CompactString::default(),
        Value::String(s) if s.is_empty() => CompactString::default(),
        Value::Number(n) if !custom && *n != 0.0 && !is_unitless_property(name) => {
            format_compact!("{}px", format_number(*n))
        }
        _ => CompactString::from(value.to_js_string().trim()),
    }
}
