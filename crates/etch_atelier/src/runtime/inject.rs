//! Child injection.

use etch_carton::format_number;
use etch_relief::Result;

use super::context::RenderContext;
use super::{host, program};
use crate::value::Value;

/// Render a value in child position.
///
/// Nullish values, booleans, functions and symbols render nothing. Strings
/// and numbers are escaped text, arrays render their items in order, and
/// plain objects render their string form.
pub(crate) fn render_value(cx: &mut RenderContext<'_>, value: &Value) -> Result<()> {
    match value {
        Value::Undefined | Value::Null | Value::Bool(_) | Value::Function(_) | Value::Symbol(_) => {}
        Value::String(text) => {
            if !text.is_empty() {
                cx.push_text(text);
            }
        }
        Value::Number(n) => cx.push_text(&format_number(*n)),
        Value::Array(items) => {
            for item in items {
                render_value(cx, item)?;
            }
        }
        Value::Object(_) => cx.push_text(&value.to_js_string()),
        Value::Element(element) => host::render_element(cx, element)?,
        Value::Markup(markup) => program::render_markup(cx, markup)?,
    }
    Ok(())
}

/// Render an interpolated child. `lead_newline` is set for the only child of
/// a newline-eating element, whose leading newline the HTML parser would drop.
pub(crate) fn render_child(cx: &mut RenderContext<'_>, value: &Value, lead_newline: bool) -> Result<()> {
    if lead_newline && value.as_str().is_some_and(|text| text.starts_with('\n')) {
        cx.push_raw("\n");
    }
    render_value(cx, value)
}
