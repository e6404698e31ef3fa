//! Render-time values.
//!
//! Templates are rendered against a list of [`Value`]s, one per interpolation.
//! A value is dynamically typed: the same slot may hold a string in one render
//! and an element or a nested template in the next, and every helper decides
//! what to do with it by inspecting the variant.

use std::fmt;
use std::rc::Rc;

use compact_str::{CompactString, ToCompactString};
use etch_carton::{format_number, parse_number, FxBuildHasher};
use etch_relief::Result;
use indexmap::IndexMap;

use crate::element::Element;
use crate::markup::Markup;
use crate::runtime::RenderContext;

/// Ordered property map. Insertion order is the serialization order.
pub type Props = IndexMap<CompactString, Value, FxBuildHasher>;

/// Build a [`Props`] map from `name => value` pairs.
///
/// ```
/// use etch_atelier::{props, Value};
///
/// let props = props! { "id" => "main", "tabIndex" => 2 };
/// assert_eq!(props.get("id"), Some(&Value::from("main")));
/// ```
#[macro_export]
macro_rules! props {
    () => {
        $crate::Props::default()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut props = $crate::Props::default();
        $(props.insert($crate::CompactString::from($name), $crate::Value::from($value));)+
        props
    }};
}

/// A function value, callable during a render.
#[derive(Clone)]
pub struct Callback(Rc<CallbackFn>);

type CallbackFn = dyn Fn(&[Value], &mut RenderContext<'_>) -> Result<Value>;

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value], &mut RenderContext<'_>) -> Result<Value> + 'static,
    {
        Self(Rc::new(f))
    }

    pub fn call(&self, args: &[Value], cx: &mut RenderContext<'_>) -> Result<Value> {
        (self.0)(args, cx)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

/// A dynamically typed render value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(CompactString),
    Array(Vec<Value>),
    Object(Props),
    /// Element produced by tree mode or a component
    Element(Rc<Element>),
    /// Result of rendering a nested template with its values
    Markup(Markup),
    Function(Callback),
    /// Symbol with its description
    Symbol(CompactString),
}

impl Value {
    /// Wrap a closure as a function value.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Value], &mut RenderContext<'_>) -> Result<Value> + 'static,
    {
        Self::Function(Callback::new(f))
    }

    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<CompactString>,
        V: Into<Value>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// `null` or `undefined`.
    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Props> {
        match self {
            Self::Object(props) => Some(props),
            _ => None,
        }
    }

    /// Property lookup on object values.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|props| props.get(key))
    }

    /// String conversion with script semantics (`String(value)`).
    pub fn to_js_string(&self) -> CompactString {
        match self {
            Self::Undefined => CompactString::const_new("undefined"),
            Self::Null => CompactString::const_new("null"),
            Self::Bool(true) => CompactString::const_new("true"),
            Self::Bool(false) => CompactString::const_new("false"),
            Self::Number(n) => format_number(*n),
            Self::String(s) => s.clone(),
            Self::Array(items) => {
                let mut out = CompactString::default();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    if !item.is_nullish() {
                        out.push_str(&item.to_js_string());
                    }
                }
                out
            }
            Self::Object(_) | Self::Element(_) | Self::Markup(_) => {
                CompactString::const_new("[object Object]")
            }
            Self::Function(_) => CompactString::const_new("function () {}"),
            Self::Symbol(description) => compact_str::format_compact!("Symbol({description})"),
        }
    }

    /// Number conversion with script semantics (`Number(value)`).
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::String(s) => parse_number(s),
            Self::Array(items) if items.len() <= 1 => parse_number(&self.to_js_string()),
            _ => f64::NAN,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Element(_) => "element",
            Self::Markup(_) => "markup",
            Self::Function(_) => "function",
            Self::Symbol(_) => "symbol",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) | (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Element(a), Self::Element(b)) => Rc::ptr_eq(a, b) || a == b,
            (Self::Markup(a), Self::Markup(b)) => a.ptr_eq(b),
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_js_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::String(s.into())
    }
}

impl From<CompactString> for Value {
    fn from(s: CompactString) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(n: $ty) -> Self {
                Self::Number(n as f64)
            }
        })*
    };
}

impl_from_number!(f32, i32, i64, u32, u64, usize);

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Props> for Value {
    fn from(props: Props) -> Self {
        Self::Object(props)
    }
}

impl From<Element> for Value {
    fn from(element: Element) -> Self {
        Self::Element(Rc::new(element))
    }
}

impl From<Markup> for Value {
    fn from(markup: Markup) -> Self {
        Self::Markup(markup)
    }
}

impl From<Callback> for Value {
    fn from(callback: Callback) -> Self {
        Self::Function(callback)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s.into()),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(k, v)| (k.to_compact_string(), v.into()))
                    .collect(),
            ),
        }
    }
}
