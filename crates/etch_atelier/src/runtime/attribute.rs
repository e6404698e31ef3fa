//! Attribute serialization.
//!
//! Each attribute is written as ` name="value"` directly after the tag name, or
//! as ` name=""` for boolean attributes. Whether it is written at all depends on
//! the property table: event handlers and reserved props are skipped, and
//! booleans, `NaN` and non-positive numbers are dropped for the property kinds
//! that do not accept them.

use etch_carton::{
    accepts_booleans, escape_html_into, is_attribute_name_safe, is_reserved_custom_prop,
    property_info, should_ignore_attribute, PropertyInfo, PropertyKind,
};
use etch_relief::Result;

use super::style::render_style;
use crate::value::Value;

/// Write one resolved prop of a host element.
pub(crate) fn render_prop(out: &mut String, name: &str, value: &Value, custom: bool) -> Result<()> {
    match name {
        "key" | "ref" | "children" | "dangerouslySetInnerHTML" => Ok(()),
        "style" => render_style(out, value),
        _ => {
            render_attribute(out, name, value, custom);
            Ok(())
        }
    }
}

/// Write `name=value` if the value survives for that property.
pub fn render_attribute(out: &mut String, name: &str, value: &Value, custom: bool) {
    if custom {
        render_custom_attribute(out, name, value);
        return;
    }
    let info = property_info(name);
    if should_ignore_attribute(name, info) || should_remove_attribute(name, value, info) {
        return;
    }
    match info {
        Some(info) => {
            let empty = match info.kind {
                PropertyKind::Boolean => true,
                PropertyKind::OverloadedBoolean => matches!(value, Value::Bool(true)),
                _ => false,
            };
            if empty {
                write_empty(out, info.attribute_name);
            } else {
                write_quoted(out, info.attribute_name, value);
            }
        }
        None if is_attribute_name_safe(name) => write_quoted(out, name, value),
        None => {}
    }
}

/// Custom elements keep every safe, non-null, non-function value as is.
fn render_custom_attribute(out: &mut String, name: &str, value: &Value) {
    if is_reserved_custom_prop(name) || !is_attribute_name_safe(name) {
        return;
    }
    if value.is_nullish() || matches!(value, Value::Function(_) | Value::Symbol(_)) {
        return;
    }
    write_quoted(out, name, value);
}

fn should_remove_attribute(name: &str, value: &Value, info: Option<&PropertyInfo>) -> bool {
    match value {
        Value::Undefined | Value::Null | Value::Function(_) | Value::Symbol(_) => return true,
        Value::Bool(_) if !accepts_booleans(name, info) => return true,
        _ => {}
    }
    let Some(info) = info else {
        return false;
    };
    match info.kind {
        PropertyKind::Boolean => !value.is_truthy(),
        PropertyKind::OverloadedBoolean => matches!(value, Value::Bool(false)),
        PropertyKind::Numeric => value.to_number().is_nan(),
        PropertyKind::PositiveNumeric => {
            let n = value.to_number();
            n.is_nan() || n < 1.0
        }
        _ => false,
    }
}

fn write_empty(out: &mut String, name: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"\"");
}

fn write_quoted(out: &mut String, name: &str, value: &Value) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_html_into(out, &value.to_js_string());
    out.push('"');
}
