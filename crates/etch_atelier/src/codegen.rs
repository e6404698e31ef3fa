//! Code generation.
//!
//! A template tree compiles into [`Program`]s: alternating static strings and
//! helper calls. Everything that does not depend on the render values (tag
//! names, static attributes, literal text) is serialized once here; every
//! interpolation becomes a [`Helper`] that the runtime evaluates against the
//! values of a render.
//!
//! The root program renders the whole template. Elements written between a
//! component's tags get programs of their own, keyed by node, so they can be
//! handed to the component as children and rendered wherever it places them.

use std::mem;
use std::rc::Rc;

use compact_str::CompactString;
use etch_carton::{escape_html, is_newline_eating_tag, FxHashMap};
use etch_relief::{AttrEntry, AttrValue, Child, EtchError, Node, NodeId, Result, Tag, Tree};

use crate::component::Component;
use crate::runtime::attribute::render_attribute;
use crate::value::Value;

/// Components resolved for the component nodes of a tree.
pub type ComponentTable = FxHashMap<NodeId, Component>;

/// A runtime step of a program.
#[derive(Debug, Clone, PartialEq)]
pub enum Helper {
    /// Literal text, already escaped
    Text(CompactString),
    /// Interpolated value of a named attribute
    Value {
        slot: usize,
        name: CompactString,
        custom: bool,
    },
    /// Interpolated `style` object
    Style { slot: usize },
    /// Interpolated attribute name
    DynamicName { node: NodeId, entry: usize },
    /// Named attribute that a later spread may override
    Attribute { node: NodeId, entry: usize },
    Spread { node: NodeId, entry: usize },
    RootMarker,
    /// Interpolated child
    Child { slot: usize, lead_newline: bool },
    /// `children` or `dangerouslySetInnerHTML` given as attributes
    Content { node: NodeId },
    Component { node: NodeId },
    /// Form element whose output depends on its props as a whole
    Host { node: NodeId },
    /// `<select` with its attributes; pushes the selected value
    SelectOpen { node: NodeId },
    /// Pops the selected value
    SelectClose,
}

/// Static strings interleaved with helper calls:
/// `strings[0] calls[0] strings[1] ... calls[n-1] strings[n]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub strings: Vec<CompactString>,
    pub calls: Vec<Helper>,
}

impl Default for Program {
    fn default() -> Self {
        Self {
            strings: vec![CompactString::default()],
            calls: Vec::new(),
        }
    }
}

impl Program {
    fn push_static(&mut self, s: &str) {
        if let Some(last) = self.strings.last_mut() {
            last.push_str(s);
        }
    }

    fn push_call(&mut self, helper: Helper) {
        self.calls.push(helper);
        self.strings.push(CompactString::default());
    }

    /// Whether the program renders only static text.
    pub fn is_static(&self) -> bool {
        self.calls.is_empty()
    }
}

/// A compiled template.
#[derive(Debug)]
pub struct CompiledTemplate {
    pub tree: Rc<Tree>,
    pub components: Rc<ComponentTable>,
    pub root: Program,
    /// Programs for elements nested inside components
    pub programs: FxHashMap<NodeId, Program>,
}

impl CompiledTemplate {
    /// Program to run: the root, or the one generated for `entry`.
    pub fn program(&self, entry: Option<NodeId>) -> Option<&Program> {
        match entry {
            None => Some(&self.root),
            Some(node) => self.programs.get(&node),
        }
    }
}

/// Compile a tree.
pub fn generate(tree: Rc<Tree>, components: Rc<ComponentTable>) -> Result<CompiledTemplate> {
    let mut ctx = CodegenContext {
        tree: &tree,
        current: Program::default(),
        programs: FxHashMap::default(),
    };
    ctx.process_children(&tree.root, None, true)?;
    let root = mem::take(&mut ctx.current);
    let programs = mem::take(&mut ctx.programs);
    tracing::trace!(
        helpers = root.calls.len(),
        programs = programs.len(),
        "generated template"
    );
    Ok(CompiledTemplate {
        tree,
        components,
        root,
        programs,
    })
}

struct CodegenContext<'t> {
    tree: &'t Tree,
    current: Program,
    programs: FxHashMap<NodeId, Program>,
}

impl CodegenContext<'_> {
    fn process_children(&mut self, children: &[Child], parent: Option<&str>, top: bool) -> Result<()> {
        let lead_newline = children.len() == 1 && parent.is_some_and(is_newline_eating_tag);
        for child in children {
            match child {
                Child::Text(text) => self.current.push_call(Helper::Text(escape_html(text).into())),
                Child::Slot(slot) => self.current.push_call(Helper::Child {
                    slot: *slot,
                    lead_newline,
                }),
                Child::Node(id) => self.process_node(*id, top)?,
            }
        }
        Ok(())
    }

    fn process_node(&mut self, id: NodeId, top: bool) -> Result<()> {
        let tree = self.tree;
        let node = tree.node(id);
        match &node.tag {
            Tag::Fragment => self.process_children(&node.children, None, top),
            Tag::Component(_) => {
                self.current.push_call(Helper::Component { node: id });
                self.generate_nested(node)
            }
            Tag::Element(name) => match name.as_str() {
                "input" | "textarea" | "option" => {
                    check_static_content(node, name)?;
                    self.current.push_call(Helper::Host { node: id });
                    self.generate_nested(node)
                }
                _ => self.process_element(node, name, top),
            },
        }
    }

    /// Programs for the nested element children of a node rendered from props.
    /// Its children are passed along as values instead of being inlined.
    fn generate_nested(&mut self, node: &Node) -> Result<()> {
        for child in &node.children {
            if let Child::Node(nested) = child {
                self.generate_subprogram(*nested)?;
            }
        }
        Ok(())
    }

    fn generate_subprogram(&mut self, id: NodeId) -> Result<()> {
        if self.programs.contains_key(&id) {
            return Ok(());
        }
        let saved = mem::take(&mut self.current);
        let result = self.process_node(id, true);
        let program = mem::replace(&mut self.current, saved);
        result?;
        self.programs.insert(id, program);
        Ok(())
    }

    fn process_element(&mut self, node: &Node, tag: &str, top: bool) -> Result<()> {
        check_static_content(node, tag)?;
        let is_select = tag == "select";
        if is_select {
            self.current.push_call(Helper::SelectOpen { node: node.id });
        } else {
            self.current.push_static("<");
            self.current.push_static(tag);
            self.process_attributes(node)?;
            if top {
                self.current.push_call(Helper::RootMarker);
            }
        }

        if node.is_void() {
            if has_content_source(node) {
                self.current.push_call(Helper::Content { node: node.id });
            }
            self.current.push_static("/>");
            return Ok(());
        }
        self.current.push_static(">");

        if node.has_nested_children() {
            self.process_children(&node.children, Some(tag), false)?;
        } else if has_content_source(node) {
            self.current.push_call(Helper::Content { node: node.id });
        }

        self.current.push_static("</");
        self.current.push_static(tag);
        self.current.push_static(">");
        if is_select {
            self.current.push_call(Helper::SelectClose);
        }
        Ok(())
    }

    fn process_attributes(&mut self, node: &Node) -> Result<()> {
        let last_spread = node.last_spread_entry();
        let custom = node.is_custom_element();
        for (i, entry) in node.attributes.iter().enumerate() {
            let id = node.id;
            match entry {
                AttrEntry::Spread { .. } => {
                    self.current.push_call(Helper::Spread { node: id, entry: i })
                }
                AttrEntry::DynamicName { .. } => self
                    .current
                    .push_call(Helper::DynamicName { node: id, entry: i }),
                AttrEntry::Named { name, value, .. } => {
                    if is_content_or_reserved(name) {
                        continue;
                    }
                    let is_style = name == "style";
                    if is_style && !matches!(value, AttrValue::Placeholder(_)) {
                        return Err(EtchError::StyleNotObject);
                    }
                    if last_spread.is_some_and(|last| i < last) {
                        self.current
                            .push_call(Helper::Attribute { node: id, entry: i });
                        continue;
                    }
                    match value {
                        AttrValue::Placeholder(slot) if is_style => {
                            self.current.push_call(Helper::Style { slot: *slot })
                        }
                        AttrValue::Placeholder(slot) => self.current.push_call(Helper::Value {
                            slot: *slot,
                            name: name.clone(),
                            custom,
                        }),
                        static_value => {
                            let mut out = String::new();
                            render_attribute(&mut out, name, &static_value_of(static_value), custom);
                            self.current.push_static(&out);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn static_value_of(value: &AttrValue) -> Value {
    match value {
        AttrValue::Literal(text) => Value::String(text.clone()),
        _ => Value::Bool(true),
    }
}

#[inline]
fn is_content_or_reserved(name: &str) -> bool {
    matches!(name, "key" | "ref" | "children" | "dangerouslySetInnerHTML")
}

/// Whether content may come from attributes.
fn has_content_source(node: &Node) -> bool {
    node.has_spread()
        || node.attributes.iter().any(|entry| {
            matches!(
                entry.name(),
                Some("children" | "dangerouslySetInnerHTML")
            )
        })
}

/// Conflicts that are visible without any render values.
fn check_static_content(node: &Node, tag: &str) -> Result<()> {
    let is_static = |name: &str| {
        node.attributes.iter().any(|entry| {
            matches!(entry, AttrEntry::Named { name: n, value, .. }
                if n == name && !matches!(value, AttrValue::Placeholder(_)))
        })
    };
    let children = is_static("children");
    let inner_html = is_static("dangerouslySetInnerHTML");
    if node.is_void() && (children || inner_html) {
        return Err(EtchError::VoidElementChildren { tag: tag.into() });
    }
    if inner_html {
        return Err(EtchError::InnerHtmlShape);
    }
    Ok(())
}
