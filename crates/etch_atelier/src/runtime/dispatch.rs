//! Component invocation.

use std::rc::Rc;

use compact_str::CompactString;
use etch_relief::{Child, EtchError, Node, NodeId, Result};

use super::context::RenderContext;
use super::{host, inject};
use crate::codegen::CompiledTemplate;
use crate::component::Component;
use crate::markup::Markup;
use crate::merge::{resolve_props, take_key_and_ref};
use crate::value::{Props, Value};

/// Render the component at `id` with its merged props.
pub(crate) fn render_component_node(
    cx: &mut RenderContext<'_>,
    template: &Rc<CompiledTemplate>,
    id: NodeId,
    values: &Rc<[Value]>,
) -> Result<()> {
    let Some(component) = template.components.get(&id) else {
        tracing::warn!(node = %id, "component node without a resolved component");
        return Ok(());
    };
    let node = template.tree.node(id);
    let mut props = resolve_props(node, values);
    let (_, ref_) = take_key_and_ref(&mut props);
    if node.has_nested_children() {
        props.insert(
            CompactString::const_new("children"),
            nested_children(template, node, values),
        );
    }
    render_component(cx, component, &props, ref_.as_ref())
}

/// Children written between a node's tags, as a prop value: a single value,
/// or an array when there are several.
pub(crate) fn nested_children(
    template: &Rc<CompiledTemplate>,
    node: &Node,
    values: &Rc<[Value]>,
) -> Value {
    let mut items: Vec<Value> = node
        .children
        .iter()
        .map(|child| match child {
            Child::Text(text) => Value::String(text.clone()),
            Child::Slot(slot) => values.get(*slot).cloned().unwrap_or_default(),
            Child::Node(nested) => {
                Value::Markup(Markup::node(template.clone(), values.clone(), *nested))
            }
        })
        .collect();
    match items.len() {
        1 => items.pop().unwrap_or_default(),
        _ => Value::Array(items),
    }
}

/// Invoke a component and render what it returns.
pub(crate) fn render_component(
    cx: &mut RenderContext<'_>,
    component: &Component,
    props: &Props,
    ref_: Option<&Value>,
) -> Result<()> {
    cx.enter()?;
    let result = dispatch(cx, component, props, ref_);
    cx.leave();
    result
}

fn dispatch(
    cx: &mut RenderContext<'_>,
    component: &Component,
    props: &Props,
    ref_: Option<&Value>,
) -> Result<()> {
    match component {
        Component::Function(render) => {
            let output = render(props, cx)?;
            inject::render_value(cx, &output)
        }
        Component::Class(class) => {
            let mut instance = class.construct(props);
            instance.component_will_mount();
            let output = instance.render(props, cx)?;
            inject::render_value(cx, &output)
        }
        Component::Memo(inner) => dispatch(cx, inner, props, ref_),
        Component::ForwardRef(render) => {
            let output = render(props, ref_, cx)?;
            inject::render_value(cx, &output)
        }
        Component::Provider(context) => {
            let value = props.get("value").cloned().unwrap_or_default();
            cx.push_provider(context.clone(), value);
            let result = render_children(cx, props);
            cx.pop_provider();
            result
        }
        Component::Consumer(context) => {
            let Some(Value::Function(render)) = props.get("children") else {
                return Err(EtchError::ConsumerChild);
            };
            let current = cx.use_context(context);
            let output = render.call(&[current], cx)?;
            inject::render_value(cx, &output)
        }
        Component::Fragment => render_children(cx, props),
        Component::Alias(tag) => host::render_host(cx, tag, props.clone()),
    }
}

fn render_children(cx: &mut RenderContext<'_>, props: &Props) -> Result<()> {
    match props.get("children") {
        Some(children) => inject::render_value(cx, children),
        None => Ok(()),
    }
}
