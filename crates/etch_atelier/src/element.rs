//! Element graph produced by tree mode.

use compact_str::CompactString;

use crate::component::Component;
use crate::value::{Props, Value};

/// What an element renders as.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Host element by tag name
    Host(CompactString),
    Component(Component),
    Fragment,
}

/// A framework-style element: a type, a key, a ref and props.
///
/// `key` and `ref` are taken out of the props when the element is built, and
/// nested children are stored under the `children` prop (a single value, or an
/// array when there is more than one).
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub key: Option<CompactString>,
    pub ref_: Option<Value>,
    pub props: Props,
}

impl Element {
    pub fn new(kind: ElementKind, props: Props) -> Self {
        Self {
            kind,
            key: None,
            ref_: None,
            props,
        }
    }

    pub fn host(tag: impl Into<CompactString>, props: Props) -> Self {
        Self::new(ElementKind::Host(tag.into()), props)
    }

    pub fn component(component: Component, props: Props) -> Self {
        Self::new(ElementKind::Component(component), props)
    }

    /// Fragment wrapping `children`.
    pub fn fragment(children: Value) -> Self {
        let mut props = Props::default();
        props.insert(CompactString::const_new("children"), children);
        Self::new(ElementKind::Fragment, props)
    }

    /// Host tag name.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Host(tag) => Some(tag.as_str()),
            _ => None,
        }
    }

    pub fn children(&self) -> Option<&Value> {
        self.props.get("children")
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self.kind, ElementKind::Fragment)
    }
}
