//! Components and contexts.
//!
//! A [`Component`] is anything a capitalized tag can resolve to. Function and
//! class components return a [`Value`] that is rendered in their place; the
//! remaining variants wrap another component or carry context values down the
//! render.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use compact_str::CompactString;
use etch_relief::Result;

use crate::runtime::RenderContext;
use crate::value::{Props, Value};

pub(crate) type RenderFn = dyn Fn(&Props, &mut RenderContext<'_>) -> Result<Value>;
pub(crate) type ForwardRefFn = dyn Fn(&Props, Option<&Value>, &mut RenderContext<'_>) -> Result<Value>;

/// A stateful component definition.
///
/// Every render constructs a fresh instance; there is no update phase on the
/// server, so `component_will_mount` is the only lifecycle hook that runs.
pub trait ClassComponent {
    fn construct(&self, props: &Props) -> Box<dyn ComponentInstance>;
}

/// A constructed class component.
pub trait ComponentInstance {
    fn component_will_mount(&mut self) {}

    fn render(&mut self, props: &Props, cx: &mut RenderContext<'_>) -> Result<Value>;
}

/// Anything a component tag can resolve to.
#[derive(Clone)]
pub enum Component {
    Function(Rc<RenderFn>),
    Class(Rc<dyn ClassComponent>),
    /// Makes its `value` prop visible to consumers of the context
    Provider(Context),
    /// Calls its function child with the current context value
    Consumer(Context),
    /// Renders the wrapped component unchanged
    Memo(Rc<Component>),
    /// Receives the element's ref as a second argument
    ForwardRef(Rc<ForwardRefFn>),
    Fragment,
    /// Stands for a host element
    Alias(CompactString),
}

impl Component {
    pub fn function<F>(render: F) -> Self
    where
        F: Fn(&Props, &mut RenderContext<'_>) -> Result<Value> + 'static,
    {
        Self::Function(Rc::new(render))
    }

    pub fn class<C: ClassComponent + 'static>(class: C) -> Self {
        Self::Class(Rc::new(class))
    }

    pub fn forward_ref<F>(render: F) -> Self
    where
        F: Fn(&Props, Option<&Value>, &mut RenderContext<'_>) -> Result<Value> + 'static,
    {
        Self::ForwardRef(Rc::new(render))
    }

    pub fn memo(inner: Component) -> Self {
        Self::Memo(Rc::new(inner))
    }

    pub fn alias(tag: impl Into<CompactString>) -> Self {
        Self::Alias(tag.into())
    }

    /// Identity comparison. Two handles are the same component when they share
    /// the same definition.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Class(a), Self::Class(b)) => Rc::ptr_eq(a, b),
            (Self::Provider(a), Self::Provider(b)) | (Self::Consumer(a), Self::Consumer(b)) => {
                a.ptr_eq(b)
            }
            (Self::Memo(a), Self::Memo(b)) => Rc::ptr_eq(a, b) || a.ptr_eq(b),
            (Self::ForwardRef(a), Self::ForwardRef(b)) => Rc::ptr_eq(a, b),
            (Self::Fragment, Self::Fragment) => true,
            (Self::Alias(a), Self::Alias(b)) => a == b,
            _ => false,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Function(_) => "function",
            Self::Class(_) => "class",
            Self::Provider(_) => "provider",
            Self::Consumer(_) => "consumer",
            Self::Memo(_) => "memo",
            Self::ForwardRef(_) => "forward_ref",
            Self::Fragment => "fragment",
            Self::Alias(_) => "alias",
        }
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alias(tag) => write!(f, "Alias({tag})"),
            Self::Provider(cx) | Self::Consumer(cx) => {
                write!(f, "{}({})", self.kind_name(), cx.id())
            }
            _ => f.write_str(self.kind_name()),
        }
    }
}

thread_local! {
    static NEXT_CONTEXT_ID: Cell<u32> = const { Cell::new(0) };
}

struct ContextInner {
    id: u32,
    default: Value,
}

/// A context: a value passed down the render without threading props.
///
/// ```
/// use etch_atelier::{Context, Value};
///
/// let theme = Context::new("light");
/// assert_eq!(theme.default_value(), &Value::from("light"));
/// ```
#[derive(Clone)]
pub struct Context(Rc<ContextInner>);

impl Context {
    pub fn new(default: impl Into<Value>) -> Self {
        let id = NEXT_CONTEXT_ID.with(|next| {
            let id = next.get();
            next.set(id.wrapping_add(1));
            id
        });
        Self(Rc::new(ContextInner {
            id,
            default: default.into(),
        }))
    }

    pub fn id(&self) -> u32 {
        self.0.id
    }

    /// Value seen by consumers rendered outside any provider.
    pub fn default_value(&self) -> &Value {
        &self.0.default
    }

    pub fn provider(&self) -> Component {
        Component::Provider(self.clone())
    }

    pub fn consumer(&self) -> Component {
        Component::Consumer(self.clone())
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("id", &self.0.id)
            .field("default", &self.0.default)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let a = Component::function(|_, _| Ok(Value::Null));
        let b = Component::function(|_, _| Ok(Value::Null));
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
        assert_eq!(Component::alias("section"), Component::alias("section"));
        assert_ne!(Component::alias("section"), Component::Fragment);
    }

    #[test]
    fn test_contexts_are_distinct() {
        let a = Context::new(1);
        let b = Context::new(1);
        assert!(!a.ptr_eq(&b));
        assert_ne!(a.id(), b.id());
        assert!(a.provider().ptr_eq(&a.provider()));
        assert!(!a.provider().ptr_eq(&a.consumer()));
    }
}
