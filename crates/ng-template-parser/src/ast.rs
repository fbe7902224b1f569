//! AST types for templates.
//!
//! The tree lives in an arena owned by [`TemplateAst`]. Containers refer to
//! their children and attributes by [`NodeId`], and every node keeps a
//! non-owning `parent` index pointing at its enclosing tag.

use smol_str::SmolStr;
use source_map::Span;
use std::ops::Index;
use text_size::TextSize;

/// The synthetic name carried by the root node.
pub const ROOT_NAME: &str = "__root__";

/// Tag names that can never have children.
///
/// A tag with one of these names always becomes a [`NodeKind::SelfClosingTag`],
/// however it was written.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Returns true if `name` is in [`VOID_ELEMENTS`]. The comparison is case-sensitive.
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Index of a node inside its [`TemplateAst`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeId(u32);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node of the template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Offset where the search for this node began, including any leading
    /// whitespace that was skipped to reach it.
    pub full_start: TextSize,
    /// The exact source range this node was matched from.
    pub span: Span,
    /// The enclosing tag, `None` for the root.
    pub parent: Option<NodeId>,
    /// Kind and kind-specific fields.
    pub kind: NodeKind,
}

/// The closed set of node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The whole document. Named [`ROOT_NAME`], never has attributes.
    Root(Tag),
    /// An opening tag such as `<div class="x">`.
    StartTag(Tag),
    /// A tag written `<x/>`, or any void element.
    SelfClosingTag(Tag),
    /// A closing tag such as `</div>`.
    EndTag(EndTag),
    /// An attribute of a start or self-closing tag.
    Attribute(Attribute),
    /// A run of text.
    Text,
    /// A comment, including `<!--` and `-->`.
    Comment,
    /// An interpolation, including `{{` and `}}`.
    Interpolation,
}

/// Fields shared by the root, start tags and self-closing tags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tag {
    /// The tag name. Empty when the tag name was invalid.
    pub name: SmolStr,
    pub attributes: Vec<NodeId>,
    /// Child nodes in source order. For a closed start tag the last child is
    /// its matching end tag.
    pub children: Vec<NodeId>,
}

/// A closing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndTag {
    /// Everything between `</` and `>`, verbatim. `None` when the `>` was
    /// never found.
    pub name: Option<SmolStr>,
}

/// An attribute such as `ng-if="ctrl.ready"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: SmolStr,
    /// The value with surrounding quotes removed. `None` for valueless or
    /// malformed attributes.
    pub value: Option<String>,
    /// Offset of the first value character, past any opening quote.
    pub value_pos: Option<TextSize>,
}

impl Node {
    /// Returns the tag fields for root, start and self-closing tags.
    pub fn as_tag(&self) -> Option<&Tag> {
        match &self.kind {
            NodeKind::Root(tag) | NodeKind::StartTag(tag) | NodeKind::SelfClosingTag(tag) => {
                Some(tag)
            }
            _ => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&Attribute> {
        match &self.kind {
            NodeKind::Attribute(attr) => Some(attr),
            _ => None,
        }
    }

    /// Returns the name of a tag, end tag or attribute.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Root(tag) | NodeKind::StartTag(tag) | NodeKind::SelfClosingTag(tag) => {
                Some(tag.name.as_str())
            }
            NodeKind::EndTag(end) => end.name.as_deref(),
            NodeKind::Attribute(attr) => Some(attr.name.as_str()),
            NodeKind::Text | NodeKind::Comment | NodeKind::Interpolation => None,
        }
    }

    /// Returns true for nodes that can hold children: the root and start tags.
    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Root(_) | NodeKind::StartTag(_))
    }

    /// Returns true for start, end and self-closing tags.
    pub fn is_tag(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::StartTag(_) | NodeKind::SelfClosingTag(_) | NodeKind::EndTag(_)
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Root(_) => "Root",
            NodeKind::StartTag(_) => "StartTag",
            NodeKind::SelfClosingTag(_) => "SelfClosingTag",
            NodeKind::EndTag(_) => "EndTag",
            NodeKind::Attribute(_) => "Attribute",
            NodeKind::Text => "Text",
            NodeKind::Comment => "Comment",
            NodeKind::Interpolation => "Interpolation",
        }
    }

    /// Children of a container, empty for every other kind.
    pub fn children(&self) -> &[NodeId] {
        self.as_tag().map(|tag| tag.children.as_slice()).unwrap_or(&[])
    }

    /// Attributes of a tag, empty for every other kind.
    pub fn attributes(&self) -> &[NodeId] {
        self.as_tag()
            .map(|tag| tag.attributes.as_slice())
            .unwrap_or(&[])
    }
}

/// A parsed template: the source text and the node arena built from it.
///
/// The tree is immutable once [`crate::parse`] returns it.
#[derive(Debug, Clone)]
pub struct TemplateAst {
    source: String,
    nodes: Vec<Node>,
}

impl TemplateAst {
    /// Creates a tree holding only the root node.
    pub(crate) fn new(source: &str) -> Self {
        let root = Node {
            full_start: TextSize::from(0),
            span: Span::empty(TextSize::from(0)),
            parent: None,
            kind: NodeKind::Root(Tag {
                name: SmolStr::new_static(ROOT_NAME),
                attributes: Vec::new(),
                children: Vec::new(),
            }),
        };
        Self {
            source: source.to_string(),
            nodes: vec![root],
        }
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Appends `child` to the container `parent` and points it back up.
    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
        if let NodeKind::Root(tag) | NodeKind::StartTag(tag) | NodeKind::SelfClosingTag(tag) =
            &mut self.nodes[parent.index()].kind
        {
            tag.children.push(child);
        }
    }

    /// The template text this tree was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Node {
        &self.nodes[NodeId::ROOT.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of nodes in the arena, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true when the root has no children, i.e. the source was empty.
    pub fn is_empty(&self) -> bool {
        self.root().children().is_empty()
    }

    /// The exact source slice a node was matched from.
    pub fn text(&self, id: NodeId) -> &str {
        self[id].span.slice(&self.source)
    }

    /// Iterates over every node with its id, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index as u32), node))
    }
}

impl Index<NodeId> for TemplateAst {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}
