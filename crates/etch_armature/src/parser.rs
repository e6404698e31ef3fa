//! Template parser.
//!
//! This parser drives the tokenizer and builds a [`Tree`]: it resolves tag names
//! through a [`TagResolver`], keeps the open-element stack, matches closing tags,
//! records spread bookkeeping and classifies every interpolation boundary.

use std::borrow::Cow;

use compact_str::CompactString;
use etch_carton::{decode_entities, is_component_like, is_custom_element};
use etch_relief::{
    AttrEntry, AttrValue, Child, EtchError, Location, Node, NodeFlags, NodeId, ParserOptions,
    Result, SlotKind, SpreadRecord, Tag, Tree, WhitespaceStrategy,
};

use crate::text::condense_whitespace;
use crate::tokenizer::{Callbacks, Tokenizer};

/// What a tag name refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A registered component
    Component,
    /// A registered alias for a host element
    Alias(CompactString),
    /// Not registered; the name is used as a host element
    Unknown,
}

/// Resolves component names while parsing.
pub trait TagResolver {
    fn resolve(&self, name: &str) -> Resolution;

    /// Whether two names refer to the same registered component.
    fn same_component(&self, a: &str, b: &str) -> bool {
        a == b
    }
}

/// Resolver with no registered components.
impl TagResolver for () {
    fn resolve(&self, _name: &str) -> Resolution {
        Resolution::Unknown
    }
}

/// Parse template fragments into a tree.
pub fn parse<R: TagResolver + ?Sized>(
    resolver: &R,
    fragments: &[&str],
    options: &ParserOptions,
) -> Result<Tree> {
    let parser = Parser::new(resolver, *options, fragments.len().saturating_sub(1));
    let parser = Tokenizer::new(fragments, parser).tokenize()?;
    let tree = parser.finish();
    tracing::trace!(
        nodes = tree.nodes.len(),
        slots = tree.slots.len(),
        "parsed template"
    );
    Ok(tree)
}

/// Parser context for building the tree
pub struct Parser<'r, R: TagResolver + ?Sized> {
    resolver: &'r R,
    options: ParserOptions,
    tree: Tree,
    /// Open elements, innermost last
    stack: Vec<NodeId>,
    /// Node whose open tag is being read
    current: Option<NodeId>,
    /// Void element auto-closed most recently, so a redundant `</img>` is accepted
    last_void: Option<NodeId>,
}

impl<'r, R: TagResolver + ?Sized> Parser<'r, R> {
    pub fn new(resolver: &'r R, options: ParserOptions, slot_count: usize) -> Self {
        Self {
            resolver,
            options,
            tree: Tree::new(slot_count),
            stack: Vec::new(),
            current: None,
            last_void: None,
        }
    }

    pub fn finish(self) -> Tree {
        self.tree
    }

    fn parent(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    fn children_mut(&mut self, parent: Option<NodeId>) -> &mut Vec<Child> {
        match parent {
            Some(id) => &mut self.tree.node_mut(id).children,
            None => &mut self.tree.root,
        }
    }

    fn resolve_tag(&mut self, name: &str) -> (Tag, NodeFlags) {
        match self.resolver.resolve(name) {
            Resolution::Component => {
                self.tree.tie(name);
                (Tag::Component(name.into()), NodeFlags::COMPONENT)
            }
            Resolution::Alias(target) => {
                self.tree.tie(name);
                let flags = self.element_flags(&target);
                (Tag::Element(target), flags)
            }
            Resolution::Unknown if name == "Fragment" => {
                self.tree.tie(name);
                (Tag::Fragment, NodeFlags::empty())
            }
            Resolution::Unknown => {
                if is_component_like(name) {
                    self.tree.tie(name);
                }
                (Tag::Element(name.into()), self.element_flags(name))
            }
        }
    }

    fn element_flags(&self, tag: &str) -> NodeFlags {
        let mut flags = NodeFlags::empty();
        if (self.options.is_void_tag)(tag) {
            flags |= NodeFlags::VOID;
        }
        if is_custom_element(tag) {
            flags |= NodeFlags::CUSTOM_ELEMENT;
        }
        flags
    }

    fn closes(&self, open: NodeId, name: &str) -> bool {
        let node = self.tree.node(open);
        node.name == name
            || (node.tag == Tag::Fragment && name == "Fragment")
            || (node.is_component() && self.resolver.same_component(&node.name, name))
    }

    fn clean_text<'t>(&self, raw: &'t str) -> Option<Cow<'t, str>> {
        match self.options.whitespace {
            WhitespaceStrategy::Condense => condense_whitespace(raw),
            WhitespaceStrategy::Preserve => (!raw.is_empty()).then_some(Cow::Borrowed(raw)),
        }
    }

    fn decode<'t>(&self, raw: &'t str) -> Cow<'t, str> {
        if self.options.decode_entities {
            decode_entities(raw)
        } else {
            Cow::Borrowed(raw)
        }
    }

    fn current_node(&mut self) -> Option<&mut Node> {
        let id = self.current?;
        Some(self.tree.node_mut(id))
    }
}

impl<R: TagResolver + ?Sized> Callbacks for Parser<'_, R> {
    fn on_text(&mut self, text: &str, _loc: Location) -> Result<()> {
        let Some(cleaned) = self.clean_text(text) else {
            return Ok(());
        };
        let parent = self.parent();
        if parent.is_none() && cleaned.trim().is_empty() {
            return Ok(());
        }
        let value = CompactString::from(self.decode(&cleaned));
        self.last_void = None;
        self.children_mut(parent).push(Child::Text(value));
        Ok(())
    }

    fn on_open_tag_name(&mut self, name: &str, loc: Location) -> Result<()> {
        let parent = self.parent();
        let id = NodeId::new(self.tree.nodes.len());
        let (tag, flags) = self.resolve_tag(name);

        let mut node = Node::new(id, name.into(), tag, parent);
        node.meta.open = loc;
        node.meta.flags = flags;
        self.tree.nodes.push(node);
        self.children_mut(parent).push(Child::Node(id));

        self.current = Some(id);
        self.last_void = None;
        Ok(())
    }

    fn on_open_tag_end(&mut self, self_closing: bool) -> Result<()> {
        let Some(id) = self.current.take() else {
            return Ok(());
        };
        let node = self.tree.node_mut(id);

        // Names declared after each spread win over its keys
        for i in 0..node.meta.spreads.len() {
            let entry = node.meta.spreads[i].entry;
            let after = node.attributes[entry + 1..]
                .iter()
                .filter_map(AttrEntry::name)
                .map(CompactString::from)
                .collect();
            node.meta.spreads[i].after = after;
        }

        if self_closing {
            node.meta.flags |= NodeFlags::SELF_CLOSING | NodeFlags::CLOSED;
        } else if node.is_void() {
            node.meta.flags |= NodeFlags::CLOSED;
            self.last_void = Some(id);
        } else {
            self.stack.push(id);
        }
        Ok(())
    }

    fn on_close_tag(&mut self, name: &str, loc: Location) -> Result<()> {
        match self.stack.last().copied() {
            Some(open) if self.closes(open, name) => {
                self.stack.pop();
                let node = self.tree.node_mut(open);
                node.meta.close = Some(loc);
                node.meta.flags |= NodeFlags::CLOSED;
                self.last_void = None;
                Ok(())
            }
            open => {
                if let Some(void) = self.last_void.take() {
                    if self.tree.node(void).name == name {
                        self.tree.node_mut(void).meta.close = Some(loc);
                        return Ok(());
                    }
                }
                Err(match open {
                    Some(open) => EtchError::MismatchedClosingTag {
                        expected: self.tree.node(open).name.clone(),
                        found: name.into(),
                        loc,
                    },
                    None => EtchError::UnexpectedClosingTag {
                        found: name.into(),
                        loc,
                    },
                })
            }
        }
    }

    fn on_attribute(&mut self, name: &str, value: AttrValue, loc: Location) -> Result<()> {
        let Some(id) = self.current else {
            return Ok(());
        };
        let value = match value {
            AttrValue::Literal(raw) => AttrValue::Literal(self.decode(&raw).into()),
            value => value,
        };
        if let AttrValue::Placeholder(slot) = value {
            self.tree.slots[slot] = SlotKind::Attribute {
                node: id,
                name: name.into(),
            };
        }

        let node = self.tree.node_mut(id);
        if let AttrValue::Placeholder(slot) = value {
            node.meta.dyn_attrs.insert(name.into(), slot);
        }
        if name == "is" && matches!(node.tag, Tag::Element(_)) {
            node.meta.flags |= NodeFlags::CUSTOM_ELEMENT;
        }
        node.attributes.push(AttrEntry::Named {
            name: name.into(),
            value,
            loc,
        });
        Ok(())
    }

    fn on_spread(&mut self, slot: usize, loc: Location) -> Result<()> {
        let Some(id) = self.current else {
            return Ok(());
        };
        self.tree.slots[slot] = SlotKind::Spread { node: id };
        let Some(node) = self.current_node() else {
            return Ok(());
        };
        let before = node
            .attributes
            .iter()
            .filter_map(AttrEntry::name)
            .map(CompactString::from)
            .collect();
        node.meta.spreads.push(SpreadRecord {
            slot,
            entry: node.attributes.len(),
            before,
            after: Default::default(),
        });
        node.attributes.push(AttrEntry::Spread { slot, loc });
        Ok(())
    }

    fn on_dynamic_name(&mut self, slot: usize, loc: Location) -> Result<()> {
        let Some(id) = self.current else {
            return Ok(());
        };
        self.tree.slots[slot] = SlotKind::AttributeName { node: id };
        self.tree
            .node_mut(id)
            .attributes
            .push(AttrEntry::DynamicName { slot, loc });
        Ok(())
    }

    fn on_dynamic_child(&mut self, slot: usize, _loc: Location) -> Result<()> {
        let parent = self.parent();
        self.tree.slots[slot] = SlotKind::Child { parent };
        let children = self.children_mut(parent);
        let index = children.len();
        children.push(Child::Slot(slot));
        if let Some(parent) = parent {
            self.tree
                .node_mut(parent)
                .meta
                .dyn_children
                .insert(index, slot);
        }
        self.last_void = None;
        Ok(())
    }

    fn on_end(&mut self) -> Result<()> {
        match self.stack.last() {
            Some(&open) => {
                let node = self.tree.node(open);
                Err(EtchError::UnclosedTag {
                    tag: node.name.clone(),
                    loc: node.meta.open,
                })
            }
            None => Ok(()),
        }
    }
}
