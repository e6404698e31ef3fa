//! Attribute merging.
//!
//! An element's attributes are a source-ordered list of static names, dynamic
//! names and spreads. The final props follow last-write-wins in source order: a
//! spread overrides whatever came before it and is overridden by whatever comes
//! after. Content props (`children` and `dangerouslySetInnerHTML`) are resolved
//! the same way and then checked against each other.

use compact_str::CompactString;
use etch_relief::{AttrEntry, AttrValue, EtchError, Node, Result};

use crate::value::{Props, Value};

/// Content of an element after merging.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    None,
    Children(Value),
    /// Raw markup from `dangerouslySetInnerHTML.__html`
    InnerHtml(CompactString),
}

/// Value of a named attribute entry.
pub fn entry_value(value: &AttrValue, values: &[Value]) -> Value {
    match value {
        AttrValue::Literal(text) => Value::String(text.clone()),
        AttrValue::True => Value::Bool(true),
        AttrValue::Placeholder(slot) => values.get(*slot).cloned().unwrap_or_default(),
    }
}

/// Attribute name produced by a dynamic-name interpolation. Anything but a
/// non-empty string contributes no attribute.
pub fn dynamic_name(value: &Value) -> Option<&str> {
    value.as_str().filter(|name| !name.is_empty())
}

/// Keys a spread value contributes. Only plain objects spread.
fn spread_object(value: Option<&Value>) -> Option<&Props> {
    value.and_then(Value::as_object)
}

/// Resolve every attribute entry of `node` into single-valued props.
pub fn resolve_props(node: &Node, values: &[Value]) -> Props {
    let mut props = Props::default();
    for entry in &node.attributes {
        match entry {
            AttrEntry::Named { name, value, .. } => {
                props.insert(name.clone(), entry_value(value, values));
            }
            AttrEntry::DynamicName { slot, .. } => {
                if let Some(name) = values.get(*slot).and_then(dynamic_name) {
                    props.insert(CompactString::from(name), Value::Bool(true));
                }
            }
            AttrEntry::Spread { slot, .. } => {
                if let Some(object) = spread_object(values.get(*slot)) {
                    for (key, value) in object {
                        props.insert(key.clone(), value.clone());
                    }
                }
            }
        }
    }
    props
}

/// Whether a spread after entry `entry` assigns `name`.
pub fn is_overridden(node: &Node, entry: usize, name: &str, values: &[Value]) -> bool {
    node.meta
        .spreads
        .iter()
        .filter(|spread| spread.entry > entry)
        .any(|spread| spread_object(values.get(spread.slot)).is_some_and(|o| o.contains_key(name)))
}

/// Keys of the spread at `entry` that no later entry overrides, in object order.
pub fn spread_survivors<'v>(node: &Node, entry: usize, values: &'v [Value]) -> Vec<(&'v str, &'v Value)> {
    let Some(record) = node.spread_at(entry) else {
        return Vec::new();
    };
    let Some(object) = spread_object(values.get(record.slot)) else {
        return Vec::new();
    };
    object
        .iter()
        .filter(|(key, _)| {
            !record.after.iter().any(|name| name == *key)
                && !assigned_later(node, entry, key, values)
        })
        .map(|(key, value)| (key.as_str(), value))
        .collect()
}

/// Whether a dynamic name or spread after entry `entry` assigns `name`.
fn assigned_later(node: &Node, entry: usize, name: &str, values: &[Value]) -> bool {
    node.attributes
        .iter()
        .enumerate()
        .skip(entry + 1)
        .any(|(_, later)| match later {
            AttrEntry::DynamicName { slot, .. } => {
                values.get(*slot).and_then(dynamic_name) == Some(name)
            }
            AttrEntry::Spread { slot, .. } => {
                spread_object(values.get(*slot)).is_some_and(|o| o.contains_key(name))
            }
            AttrEntry::Named { .. } => false,
        })
}

/// Take `key` and `ref` out of resolved props.
pub fn take_key_and_ref(props: &mut Props) -> (Option<CompactString>, Option<Value>) {
    let key = props
        .shift_remove("key")
        .filter(|key| !key.is_nullish())
        .map(|key| key.to_js_string());
    let ref_ = props.shift_remove("ref").filter(|r| !r.is_nullish());
    (key, ref_)
}

/// Check the content props of `props` and decide what goes inside the element.
pub fn content_of(props: &Props) -> Result<Content> {
    let children = props.get("children").filter(|c| !c.is_nullish());
    let inner = props
        .get("dangerouslySetInnerHTML")
        .filter(|h| !h.is_nullish());
    match (children, inner) {
        (Some(_), Some(_)) => Err(EtchError::ChildrenConflict),
        (None, Some(inner)) => Ok(inner_html(inner)?.map_or(Content::None, Content::InnerHtml)),
        (Some(children), None) => Ok(Content::Children(children.clone())),
        (None, None) => Ok(Content::None),
    }
}

/// Merged content of a node that has no children between its tags.
pub fn resolve_content(node: &Node, values: &[Value]) -> Result<Content> {
    content_of(&resolve_props(node, values))
}

/// The `__html` markup of a `dangerouslySetInnerHTML` value.
pub fn inner_html(value: &Value) -> Result<Option<CompactString>> {
    match value {
        Value::Object(object) if object.contains_key("__html") => Ok(object
            .get("__html")
            .filter(|html| !html.is_nullish())
            .map(Value::to_js_string)),
        _ => Err(EtchError::InnerHtmlShape),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etch_armature::parse;
    use etch_relief::{NodeId, ParserOptions, Tree};

    use crate::props;

    fn tree(fragments: &[&str]) -> Tree {
        parse(&(), fragments, &ParserOptions::default()).unwrap()
    }

    fn keys(props: &Props) -> Vec<(&str, CompactString)> {
        props
            .iter()
            .map(|(k, v)| (k.as_str(), v.to_js_string()))
            .collect()
    }

    #[test]
    fn test_last_write_wins() {
        let tree = tree(&["<div a='1' ...", " b='2'></div>"]);
        let values = [Value::Object(props! { "a" => "x", "b" => "y", "c" => "z" })];
        let props = resolve_props(tree.node(NodeId::new(0)), &values);
        assert_eq!(keys(&props), [("a", "x".into()), ("b", "2".into()), ("c", "z".into())]);
    }

    #[test]
    fn test_non_object_spreads_contribute_nothing() {
        let tree = tree(&["<div a='1' ...", "></div>"]);
        for value in [Value::Null, Value::from("ab"), Value::array([1, 2])] {
            let props = resolve_props(tree.node(NodeId::new(0)), &[value]);
            assert_eq!(keys(&props), [("a", "1".into())]);
        }
    }

    #[test]
    fn test_dynamic_names() {
        let tree = tree(&["<input ", " ", "/>"]);
        let node = tree.node(NodeId::new(0));
        let props = resolve_props(node, &[Value::from("disabled"), Value::from(3)]);
        assert_eq!(keys(&props), [("disabled", "true".into())]);
    }

    #[test]
    fn test_survivors() {
        let tree = tree(&["<div ...", " b='s' ...", "></div>"]);
        let node = tree.node(NodeId::new(0));
        let values = [
            Value::Object(props! { "a" => 1, "b" => 2, "c" => 3 }),
            Value::Object(props! { "c" => 4 }),
        ];
        let first: Vec<&str> = spread_survivors(node, 0, &values)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(first, ["a"]);
        assert!(is_overridden(node, 0, "c", &values));
        assert!(!is_overridden(node, 1, "b", &values));
    }

    #[test]
    fn test_key_and_ref_are_taken() {
        let mut props = props! { "key" => 7, "id" => "a", "ref" => Value::Null };
        let (key, ref_) = take_key_and_ref(&mut props);
        assert_eq!(key.as_deref(), Some("7"));
        assert_eq!(ref_, None);
        assert_eq!(keys(&props), [("id", "a".into())]);
    }

    #[test]
    fn test_content_conflicts() {
        let html = Value::Object(props! { "__html" => "<b>x</b>" });
        assert_eq!(
            content_of(&props! { "dangerouslySetInnerHTML" => html.clone() }).unwrap(),
            Content::InnerHtml("<b>x</b>".into())
        );
        assert_eq!(
            content_of(&props! { "children" => "a", "dangerouslySetInnerHTML" => html }),
            Err(EtchError::ChildrenConflict)
        );
        assert_eq!(
            content_of(&props! { "dangerouslySetInnerHTML" => "<b>" }),
            Err(EtchError::InnerHtmlShape)
        );
        assert_eq!(
            content_of(&props! { "children" => Value::Null }).unwrap(),
            Content::None
        );
    }
}
