//! Tree mode: build an element graph instead of a string.

use std::rc::Rc;

use compact_str::CompactString;
use etch_relief::{Child, NodeId, Tag, Tree};

use crate::codegen::ComponentTable;
use crate::element::{Element, ElementKind};
use crate::merge::{resolve_props, take_key_and_ref};
use crate::value::Value;

/// Element graph of `tree` with `values` bound.
///
/// A single top-level child is returned as is; several are wrapped in a
/// fragment element. An empty template is `null`.
pub fn build(tree: &Tree, components: &ComponentTable, values: &[Value]) -> Value {
    let builder = Builder {
        tree,
        components,
        values,
    };
    let mut items = builder.children(&tree.root);
    match items.len() {
        0 => Value::Null,
        1 => items.pop().unwrap_or_default(),
        _ => Value::from(Element::fragment(Value::Array(items))),
    }
}

struct Builder<'a> {
    tree: &'a Tree,
    components: &'a ComponentTable,
    values: &'a [Value],
}

impl Builder<'_> {
    fn children(&self, children: &[Child]) -> Vec<Value> {
        children.iter().map(|child| self.child(child)).collect()
    }

    fn child(&self, child: &Child) -> Value {
        match child {
            Child::Text(text) => Value::String(text.clone()),
            Child::Slot(slot) => self.values.get(*slot).cloned().unwrap_or_default(),
            Child::Node(id) => Value::Element(Rc::new(self.element(*id))),
        }
    }

    fn element(&self, id: NodeId) -> Element {
        let node = self.tree.node(id);
        let mut props = resolve_props(node, self.values);
        let (key, ref_) = take_key_and_ref(&mut props);
        if node.has_nested_children() {
            let mut children = self.children(&node.children);
            let children = match children.len() {
                1 => children.pop().unwrap_or_default(),
                _ => Value::Array(children),
            };
            props.insert(CompactString::const_new("children"), children);
        }
        let kind = match &node.tag {
            Tag::Element(name) => ElementKind::Host(name.clone()),
            Tag::Fragment => ElementKind::Fragment,
            Tag::Component(name) => match self.components.get(&id) {
                Some(component) => ElementKind::Component(component.clone()),
                None => ElementKind::Host(name.clone()),
            },
        };
        Element {
            kind,
            key,
            ref_,
            props,
        }
    }
}
