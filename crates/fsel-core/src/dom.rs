#![forbid(unsafe_code)]

//! In-memory element tree.
//!
//! [`ElementTree`] is a small arena-backed document used as the rendering
//! surface when no real DOM is available: tests, benchmarks, terminal hosts,
//! and embedders that mirror a browser document on their side of a bridge.
//!
//! # Invariants
//!
//! 1. Every `NodeId` handed out indexes a live slot; slots are never freed.
//! 2. `parent`/`children` links are kept symmetric by [`ElementTree::append_child`]
//!    and [`ElementTree::detach`].
//! 3. The tree is acyclic: appending an ancestor under its own descendant
//!    is rejected with [`DomError::HierarchyRequest`].

use std::collections::BTreeMap;
use std::fmt;

use crate::surface::Surface;

/// Stable handle to an element on a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap a raw host-side identifier.
    #[must_use]
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural errors from [`ElementTree`] mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomError {
    /// The id does not name an element of this tree.
    UnknownNode(NodeId),
    /// Appending `child` under `parent` would create a cycle.
    HierarchyRequest {
        /// Requested parent.
        parent: NodeId,
        /// Requested child.
        child: NodeId,
    },
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "unknown node {id}"),
            Self::HierarchyRequest { parent, child } => {
                write!(f, "cannot append {child} under its descendant {parent}")
            }
        }
    }
}

impl std::error::Error for DomError {}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attrs: BTreeMap<String, String>,
    text: String,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            parent: None,
            children: Vec::new(),
            attrs: BTreeMap::new(),
            text: String::new(),
        }
    }
}

/// Arena-backed element tree implementing [`Surface`].
#[derive(Debug, Clone)]
pub struct ElementTree {
    nodes: Vec<Element>,
    root: NodeId,
    focused: Option<NodeId>,
    /// Count of attribute/text/focus writes, for churn assertions.
    writes: u64,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    /// Create a tree holding only a `body` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body")],
            root: NodeId(0),
            focused: None,
            writes: 0,
        }
    }

    /// The document root.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Number of elements ever created (attached or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::new(tag));
        id
    }

    /// Create an element and append it under `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> Result<NodeId, DomError> {
        self.check(parent)?;
        let id = self.create_element(tag);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Append `child` as the last child of `parent`, moving it if attached
    /// elsewhere.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check(parent)?;
        self.check(child)?;
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        self.unlink(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Remove `node` from its parent. The subtree stays intact.
    pub fn detach(&mut self, node: NodeId) -> Result<(), DomError> {
        self.check(node)?;
        self.unlink(node);
        if let Some(focused) = self.focused
            && self.contains(node, focused)
        {
            self.focused = None;
        }
        Ok(())
    }

    /// Children of `node` in document order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|el| el.children.as_slice())
            .unwrap_or(&[])
    }

    /// Tag name of `node`.
    #[must_use]
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).map(|el| el.tag.as_str())
    }

    /// All attributes of `node`, sorted by name.
    pub fn attributes(&self, node: NodeId) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .get(node.0)
            .into_iter()
            .flat_map(|el| el.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// The element holding input focus.
    #[must_use]
    pub const fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move focus away from every element (focus left the document).
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Number of writes performed through [`Surface`] so far.
    #[must_use]
    pub const fn write_count(&self) -> u64 {
        self.writes
    }

    fn check(&self, node: NodeId) -> Result<(), DomError> {
        if node.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(DomError::UnknownNode(node))
        }
    }

    fn unlink(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let el = &self.nodes[node.0];
        out.push_str(&el.text);
        for &child in &el.children {
            self.collect_text(child, out);
        }
    }
}

impl Surface for ElementTree {
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|el| el.parent)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(node.0)
            .and_then(|el| el.attrs.get(name))
            .map(String::as_str)
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        if self.check(node).is_ok() {
            self.collect_text(node, &mut out);
        }
        out
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.nodes.get_mut(node.0) {
            el.attrs.insert(name.to_string(), value.to_string());
            self.writes += 1;
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.nodes.get_mut(node.0)
            && el.attrs.remove(name).is_some()
        {
            self.writes += 1;
        }
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        if self.check(node).is_err() {
            return;
        }
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        self.nodes[node.0].text = text.to_string();
        self.writes += 1;
    }

    fn focus(&mut self, node: NodeId) {
        if self.check(node).is_ok() {
            self.focused = Some(node);
            self.writes += 1;
        }
    }
}
