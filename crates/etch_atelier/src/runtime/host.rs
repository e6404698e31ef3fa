//! Host elements rendered from props.
//!
//! Most elements are compiled straight into program strings. The ones here are
//! rendered from their merged props at runtime: elements from the element
//! graph, aliases, and the form elements whose output depends on props as a
//! whole (`input`, `textarea`, `select` and `option`).

use std::rc::Rc;

use compact_str::CompactString;
use etch_carton::{format_number, is_custom_element, is_newline_eating_tag, is_void_tag};
use etch_relief::{EtchError, Node, NodeId, Result};

use super::attribute::render_prop;
use super::context::RenderContext;
use super::dispatch::{nested_children, render_component};
use super::inject;
use crate::codegen::CompiledTemplate;
use crate::element::{Element, ElementKind};
use crate::merge::{content_of, resolve_content, resolve_props, take_key_and_ref, Content};
use crate::value::{Props, Value};

const CHILDREN: CompactString = CompactString::const_new("children");
const VALUE: CompactString = CompactString::const_new("value");
const SELECTED: CompactString = CompactString::const_new("selected");

pub(crate) fn render_element(cx: &mut RenderContext<'_>, element: &Element) -> Result<()> {
    match &element.kind {
        ElementKind::Host(tag) => render_host(cx, tag, element.props.clone()),
        ElementKind::Component(component) => {
            render_component(cx, component, &element.props, element.ref_.as_ref())
        }
        ElementKind::Fragment => match element.children() {
            Some(children) => inject::render_value(cx, children),
            None => Ok(()),
        },
    }
}

/// Render a host element from its props.
pub(crate) fn render_host(cx: &mut RenderContext<'_>, tag: &str, props: Props) -> Result<()> {
    let props = match tag {
        "input" => input_props(props),
        "textarea" => textarea_props(props),
        "option" => option_props(cx, props),
        _ => props,
    };
    let (props, select_value) = if tag == "select" {
        let (props, value) = select_props(props);
        (props, Some(value))
    } else {
        (props, None)
    };

    if is_void_tag(tag) {
        let has_content = ["children", "dangerouslySetInnerHTML"]
            .iter()
            .any(|name| props.get(*name).is_some_and(|v| !v.is_nullish()));
        if has_content {
            return Err(EtchError::VoidElementChildren { tag: tag.into() });
        }
    }
    let content = content_of(&props)?;

    write_open_tag(cx, tag, &props)?;
    if is_void_tag(tag) {
        cx.push_markup("/>");
        return Ok(());
    }
    cx.push_markup(">");

    let pushed = select_value.is_some();
    if let Some(value) = select_value {
        cx.push_select_value(value);
    }
    let result = render_content_value(cx, tag, content);
    if pushed {
        cx.pop_select_value();
    }
    result?;

    cx.push_markup("</");
    cx.push_markup(tag);
    cx.push_markup(">");
    Ok(())
}

/// `<tag` and its attributes, ending with the root marker.
fn write_open_tag(cx: &mut RenderContext<'_>, tag: &str, props: &Props) -> Result<()> {
    let custom = is_custom_element(tag) || props.contains_key("is");
    cx.push_markup("<");
    cx.push_markup(tag);
    for (name, value) in props {
        render_prop(cx.attributes(), name, value, custom)?;
    }
    cx.write_root_marker();
    Ok(())
}

fn render_content_value(cx: &mut RenderContext<'_>, tag: &str, content: Content) -> Result<()> {
    let newline_eating = is_newline_eating_tag(tag);
    match content {
        Content::None => Ok(()),
        Content::InnerHtml(html) => {
            if newline_eating && html.starts_with('\n') {
                cx.push_raw("\n");
            }
            cx.push_raw(&html);
            Ok(())
        }
        Content::Children(children) => inject::render_child(cx, &children, newline_eating),
    }
}

/// Content given through attributes of a compiled element.
pub(crate) fn render_content(cx: &mut RenderContext<'_>, node: &Node, values: &[Value]) -> Result<()> {
    let tag = node.element_name().unwrap_or_default();
    let content = resolve_content(node, values)?;
    if node.is_void() && content != Content::None {
        return Err(EtchError::VoidElementChildren { tag: tag.into() });
    }
    render_content_value(cx, tag, content)
}

/// Props of a compiled node, with nested children folded into `children`.
fn node_props(template: &Rc<CompiledTemplate>, node: &Node, values: &Rc<[Value]>) -> Props {
    let mut props = resolve_props(node, values);
    take_key_and_ref(&mut props);
    if node.has_nested_children() {
        props.insert(CHILDREN, nested_children(template, node, values));
    }
    props
}

pub(crate) fn render_host_node(
    cx: &mut RenderContext<'_>,
    template: &Rc<CompiledTemplate>,
    id: NodeId,
    values: &Rc<[Value]>,
) -> Result<()> {
    let node = template.tree.node(id);
    let Some(tag) = node.element_name() else {
        return Ok(());
    };
    let props = node_props(template, node, values);
    render_host(cx, tag, props)
}

/// `<select` and its attributes. The children are compiled; the selected value
/// stays on the stack until the matching `SelectClose`.
pub(crate) fn open_select_node(cx: &mut RenderContext<'_>, node: &Node, values: &[Value]) -> Result<()> {
    let mut props = resolve_props(node, values);
    take_key_and_ref(&mut props);
    let (props, value) = select_props(props);
    write_open_tag(cx, "select", &props)?;
    cx.push_select_value(value);
    Ok(())
}

fn first_present(props: &Props, names: [&str; 2]) -> Value {
    names
        .iter()
        .filter_map(|name| props.get(*name))
        .find(|value| !value.is_nullish())
        .cloned()
        .unwrap_or_default()
}

/// `type` goes first; `value` and `checked` fall back to their defaults.
fn input_props(props: Props) -> Props {
    let value = first_present(&props, ["value", "defaultValue"]);
    let checked = first_present(&props, ["checked", "defaultChecked"]);
    let mut out = Props::with_capacity_and_hasher(props.len() + 3, Default::default());
    out.insert(CompactString::const_new("type"), Value::Undefined);
    out.extend(props);
    out.insert(VALUE, value);
    out.insert(CompactString::const_new("checked"), checked);
    out
}

/// The initial value becomes the content: `value`, then `children`, then
/// `defaultValue`.
fn textarea_props(mut props: Props) -> Props {
    let initial = match props.get("value").filter(|v| !v.is_nullish()) {
        Some(value) => value.to_js_string(),
        None => {
            let children = props.get("children").filter(|c| !c.is_nullish()).map(|c| match c {
                Value::Array(items) => items.first().cloned().unwrap_or_default(),
                other => other.clone(),
            });
            match children {
                Some(children) => children.to_js_string(),
                None => props
                    .get("defaultValue")
                    .filter(|v| !v.is_nullish())
                    .map(Value::to_js_string)
                    .unwrap_or_default(),
            }
        }
    };
    props.insert(VALUE, Value::Undefined);
    props.insert(CHILDREN, Value::String(initial));
    props
}

/// The selected value is handed to the options and not written as an attribute.
fn select_props(mut props: Props) -> (Props, Value) {
    let value = first_present(&props, ["value", "defaultValue"]);
    props.insert(VALUE, Value::Undefined);
    (props, value)
}

/// `selected` goes first and is computed against the enclosing select's value.
/// Children are flattened to text.
fn option_props(cx: &RenderContext<'_>, props: Props) -> Props {
    let text = flatten_option_children(props.get("children"));
    let selected = match cx.select_value() {
        Some(select) if !select.is_nullish() => {
            let value = match props.get("value").filter(|v| !v.is_nullish()) {
                Some(value) => value.to_js_string(),
                None => text.clone(),
            };
            let is_selected = match select {
                Value::Array(items) => items.iter().any(|item| item.to_js_string() == value),
                single => single.to_js_string() == value,
            };
            Value::Bool(is_selected)
        }
        _ => Value::Null,
    };

    let mut out = Props::with_capacity_and_hasher(props.len() + 2, Default::default());
    out.insert(SELECTED, Value::Undefined);
    out.insert(CHILDREN, Value::Undefined);
    out.extend(props);
    out.insert(SELECTED, selected);
    out.insert(CHILDREN, Value::String(text));
    out
}

fn flatten_option_children(children: Option<&Value>) -> CompactString {
    fn collect(value: &Value, out: &mut CompactString) {
        match value {
            Value::String(text) => out.push_str(text),
            Value::Number(n) => out.push_str(&format_number(*n)),
            Value::Array(items) => items.iter().for_each(|item| collect(item, out)),
            _ => {}
        }
    }
    let mut out = CompactString::default();
    if let Some(children) = children {
        collect(children, &mut out);
    }
    out
}
