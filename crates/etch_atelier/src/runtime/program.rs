//! Program execution.

use std::rc::Rc;

use etch_relief::Result;

use super::context::RenderContext;
use super::{dispatch, host, inject, spread, style};
use crate::codegen::{CompiledTemplate, Helper, Program};
use crate::markup::Markup;
use crate::runtime::attribute::render_attribute;
use crate::value::Value;

const UNDEFINED: &Value = &Value::Undefined;

pub(crate) fn render_markup(cx: &mut RenderContext<'_>, markup: &Markup) -> Result<()> {
    let Some(program) = markup.template.program(markup.entry) else {
        return Ok(());
    };
    run(cx, &markup.template, program, &markup.values)
}

fn run(
    cx: &mut RenderContext<'_>,
    template: &Rc<CompiledTemplate>,
    program: &Program,
    values: &Rc<[Value]>,
) -> Result<()> {
    let mut strings = program.strings.iter();
    if let Some(first) = strings.next() {
        cx.push_markup(first);
    }
    for (helper, string) in program.calls.iter().zip(strings) {
        call(cx, template, helper, values)?;
        cx.push_markup(string);
    }
    Ok(())
}

#[inline]
fn value(values: &[Value], slot: usize) -> &Value {
    values.get(slot).unwrap_or(UNDEFINED)
}

fn call(
    cx: &mut RenderContext<'_>,
    template: &Rc<CompiledTemplate>,
    helper: &Helper,
    values: &Rc<[Value]>,
) -> Result<()> {
    let tree = &template.tree;
    match helper {
        Helper::Text(escaped) => cx.push_escaped_text(escaped),
        Helper::Value { slot, name, custom } => {
            render_attribute(cx.attributes(), name, value(values, *slot), *custom)
        }
        Helper::Style { slot } => style::render_style(cx.attributes(), value(values, *slot))?,
        Helper::DynamicName { node, entry } => {
            spread::render_dynamic_name(cx.attributes(), tree.node(*node), *entry, values)?
        }
        Helper::Attribute { node, entry } => {
            spread::render_guarded_attribute(cx.attributes(), tree.node(*node), *entry, values)?
        }
        Helper::Spread { node, entry } => {
            spread::render_spread(cx.attributes(), tree.node(*node), *entry, values)?
        }
        Helper::RootMarker => cx.write_root_marker(),
        Helper::Child { slot, lead_newline } => {
            inject::render_child(cx, value(values, *slot), *lead_newline)?
        }
        Helper::Content { node } => host::render_content(cx, tree.node(*node), values)?,
        Helper::Component { node } => dispatch::render_component_node(cx, template, *node, values)?,
        Helper::Host { node } => host::render_host_node(cx, template, *node, values)?,
        Helper::SelectOpen { node } => host::open_select_node(cx, tree.node(*node), values)?,
        Helper::SelectClose => cx.pop_select_value(),
    }
    Ok(())
}
