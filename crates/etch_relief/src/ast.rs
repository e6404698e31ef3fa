//! Template tree node types.
//!
//! A [`Tree`] is the parsed, value-independent shape of one template: the nodes in
//! document order, the top-level children, and a classification of every
//! interpolation boundary. It is built once per template and shared by every
//! render of that template, so it never holds runtime values, only slot indices
//! into the values passed at render time.

use std::fmt;

use etch_carton::{bitflags, CompactString, FxHashMap, SmallVec};
use serde::{Deserialize, Serialize};

/// Index of a node in [`Tree::nodes`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position in the fragment sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Location {
    /// Index of the literal fragment
    pub fragment: u32,
    /// Byte offset inside that fragment
    pub offset: u32,
}

impl Location {
    pub const fn new(fragment: usize, offset: usize) -> Self {
        Self {
            fragment: fragment as u32,
            offset: offset as u32,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fragment {}, offset {}", self.fragment, self.offset)
    }
}

/// What a tag name resolved to when the template was parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "name")]
pub enum Tag {
    /// A host element, after alias resolution (`<Card>` registered as `"section"`
    /// becomes `Element("section")`)
    Element(CompactString),
    /// A registered component, looked up by this name
    Component(CompactString),
    /// `<>...</>` or `<Fragment>`
    Fragment,
}

/// Value of a named attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum AttrValue {
    /// Quoted or unquoted literal text
    Literal(CompactString),
    /// Bare attribute name (`<input disabled>`)
    True,
    /// Interpolated value, index into the render values
    Placeholder(usize),
}

/// One attribute position in source order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttrEntry {
    /// `name`, `name="v"`, `name='v'`, `name=v` or `name=${value}`
    Named {
        name: CompactString,
        value: AttrValue,
        loc: Location,
    },
    /// `...${object}`
    Spread { slot: usize, loc: Location },
    /// `${name}` in attribute-name position
    DynamicName { slot: usize, loc: Location },
}

impl AttrEntry {
    /// Static name, if the entry has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Interpolation index consumed by this entry.
    pub fn slot(&self) -> Option<usize> {
        match self {
            Self::Named {
                value: AttrValue::Placeholder(slot),
                ..
            }
            | Self::Spread { slot, .. }
            | Self::DynamicName { slot, .. } => Some(*slot),
            _ => None,
        }
    }

    pub fn loc(&self) -> Location {
        match self {
            Self::Named { loc, .. } | Self::Spread { loc, .. } | Self::DynamicName { loc, .. } => {
                *loc
            }
        }
    }

    #[inline]
    pub fn is_spread(&self) -> bool {
        matches!(self, Self::Spread { .. })
    }
}

/// One child position in source order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Child {
    /// Cleaned literal text (entities already decoded, not yet escaped)
    Text(CompactString),
    /// Interpolated child, index into the render values
    Slot(usize),
    /// Nested element, component or fragment
    Node(NodeId),
}

/// Spread bookkeeping for one `...${object}` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadRecord {
    /// Interpolation index of the spread object
    pub slot: usize,
    /// Position of the spread in [`Node::attributes`]
    pub entry: usize,
    /// Static attribute names declared before the spread
    pub before: SmallVec<[CompactString; 4]>,
    /// Static attribute names declared after the spread; these win over its keys
    pub after: SmallVec<[CompactString; 4]>,
}

bitflags! {
    /// Structural node flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct NodeFlags: u8 {
        /// Tag resolved to a registered component
        const COMPONENT = 1 << 0;
        /// Written as `<tag/>`
        const SELF_CLOSING = 1 << 1;
        /// Closing tag seen (or implied)
        const CLOSED = 1 << 2;
        /// Void element, auto-closed after its open tag
        const VOID = 1 << 3;
        /// Custom element (`<my-element>` or an `is` attribute)
        const CUSTOM_ELEMENT = 1 << 4;
    }
}

/// Parse-time metadata attached to a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeMeta {
    /// Location of the `<` of the open tag
    pub open: Location,
    /// Location of the `<` of the closing tag
    pub close: Option<Location>,
    pub flags: NodeFlags,
    /// Attribute name to the interpolation index of its last dynamic value
    pub dyn_attrs: FxHashMap<CompactString, usize>,
    /// Child position to interpolation index
    pub dyn_children: FxHashMap<usize, usize>,
    /// Spread records in source order
    pub spreads: Vec<SpreadRecord>,
}

/// An element, component or fragment node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Tag name as written in the template
    pub name: CompactString,
    pub tag: Tag,
    pub parent: Option<NodeId>,
    pub attributes: Vec<AttrEntry>,
    pub children: Vec<Child>,
    pub meta: NodeMeta,
}

impl Node {
    pub fn new(id: NodeId, name: CompactString, tag: Tag, parent: Option<NodeId>) -> Self {
        Self {
            id,
            name,
            tag,
            parent,
            attributes: Vec::new(),
            children: Vec::new(),
            meta: NodeMeta::default(),
        }
    }

    /// Host element name, after alias resolution.
    pub fn element_name(&self) -> Option<&str> {
        match &self.tag {
            Tag::Element(name) => Some(name.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub fn is_component(&self) -> bool {
        self.meta.flags.contains(NodeFlags::COMPONENT)
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        self.meta.flags.contains(NodeFlags::VOID)
    }

    #[inline]
    pub fn is_custom_element(&self) -> bool {
        self.meta.flags.contains(NodeFlags::CUSTOM_ELEMENT)
    }

    #[inline]
    pub fn has_spread(&self) -> bool {
        !self.meta.spreads.is_empty()
    }

    /// Index in [`Node::attributes`] of the last spread entry.
    pub fn last_spread_entry(&self) -> Option<usize> {
        self.meta.spreads.last().map(|s| s.entry)
    }

    /// Spread record for the attribute entry at `entry`.
    pub fn spread_at(&self, entry: usize) -> Option<&SpreadRecord> {
        self.meta.spreads.iter().find(|s| s.entry == entry)
    }

    /// Whether the node has children written between its tags.
    #[inline]
    pub fn has_nested_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether any static attribute entry uses `name`.
    pub fn has_named_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name() == Some(name))
    }
}

/// Classification of one interpolation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type")]
pub enum SlotKind {
    /// Value of the named attribute
    Attribute { node: NodeId, name: CompactString },
    /// Attribute name position
    AttributeName { node: NodeId },
    /// Spread object
    Spread { node: NodeId },
    /// Child of `parent`, or a top-level child
    Child { parent: Option<NodeId> },
    /// Inside a comment; the value is never read
    #[default]
    Ignored,
}

/// Parsed template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tree {
    /// Nodes in document order
    pub nodes: Vec<Node>,
    /// Top-level children
    pub root: Vec<Child>,
    /// One entry per interpolation
    pub slots: Vec<SlotKind>,
    /// Component-like tag names this tree resolved through the registry
    pub ties: Vec<CompactString>,
}

impl Tree {
    pub fn new(slot_count: usize) -> Self {
        Self {
            nodes: Vec::new(),
            root: Vec::new(),
            slots: vec![SlotKind::Ignored; slot_count],
            ties: Vec::new(),
        }
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Number of values a render of this tree expects.
    #[inline]
    pub fn value_count(&self) -> usize {
        self.slots.len()
    }

    /// Record a dependency on a component-like tag name.
    pub fn tie(&mut self, name: &str) {
        if !self.ties.iter().any(|t| t == name) {
            self.ties.push(CompactString::from(name));
        }
    }

    /// Node ids in document order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::new)
    }
}
