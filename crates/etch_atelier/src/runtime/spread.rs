//! Attribute helpers that depend on spreads and dynamic names.

use etch_relief::{AttrEntry, Node, Result};

use super::attribute::render_prop;
use crate::merge::{dynamic_name, entry_value, is_overridden, spread_survivors};
use crate::value::Value;

/// Keys of a spread object that no later attribute overrides.
pub(crate) fn render_spread(out: &mut String, node: &Node, entry: usize, values: &[Value]) -> Result<()> {
    let custom = node.is_custom_element();
    for (name, value) in spread_survivors(node, entry, values) {
        render_prop(out, name, value, custom)?;
    }
    Ok(())
}

/// A named attribute declared before a spread, unless the spread assigns it.
pub(crate) fn render_guarded_attribute(
    out: &mut String,
    node: &Node,
    entry: usize,
    values: &[Value],
) -> Result<()> {
    let Some(AttrEntry::Named { name, value, .. }) = node.attributes.get(entry) else {
        return Ok(());
    };
    if is_overridden(node, entry, name, values) {
        return Ok(());
    }
    render_prop(out, name, &entry_value(value, values), node.is_custom_element())
}

/// An attribute whose name is interpolated; it is written as a bare `true`.
pub(crate) fn render_dynamic_name(out: &mut String, node: &Node, entry: usize, values: &[Value]) -> Result<()> {
    let Some(AttrEntry::DynamicName { slot, .. }) = node.attributes.get(entry) else {
        return Ok(());
    };
    let Some(name) = values.get(*slot).and_then(dynamic_name) else {
        return Ok(());
    };
    if is_overridden(node, entry, name, values) {
        return Ok(());
    }
    render_prop(out, name, &Value::Bool(true), node.is_custom_element())
}
