//! Deferred template output.

use std::fmt;
use std::rc::Rc;

use etch_relief::NodeId;

use crate::codegen::CompiledTemplate;
use crate::value::Value;

/// A compiled template bound to its values, rendered where it is injected.
///
/// Nested templates (`html` inside a component, or children written between a
/// component's tags) are not rendered eagerly: the markup is produced when the
/// value reaches a child position, so text separators and the root marker stay
/// consistent with the surrounding output.
#[derive(Clone)]
pub struct Markup {
    pub(crate) template: Rc<CompiledTemplate>,
    pub(crate) values: Rc<[Value]>,
    /// Sub-program to run instead of the root program
    pub(crate) entry: Option<NodeId>,
}

impl Markup {
    pub(crate) fn new(template: Rc<CompiledTemplate>, values: Vec<Value>) -> Self {
        Self {
            template,
            values: values.into(),
            entry: None,
        }
    }

    pub(crate) fn node(template: Rc<CompiledTemplate>, values: Rc<[Value]>, node: NodeId) -> Self {
        Self {
            template,
            values,
            entry: Some(node),
        }
    }

    pub fn template(&self) -> &CompiledTemplate {
        &self.template
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.template, &other.template)
            && Rc::ptr_eq(&self.values, &other.values)
            && self.entry == other.entry
    }
}

impl fmt::Debug for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Markup")
            .field("entry", &self.entry)
            .field("values", &self.values.len())
            .finish()
    }
}
