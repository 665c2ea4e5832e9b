// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM node types
//!
//! Nodes live in an id-keyed store owned by the [`Document`](super::Document);
//! a [`Node`] is a cheap handle into that store. Attributes are kept in
//! source order so a document can be re-serialized without shuffling markup.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

/// Unique node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a new unique node ID
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Document node
    Document,
    /// Document type node (<!DOCTYPE>)
    Doctype,
    /// Element node
    Element,
    /// Text node
    Text,
    /// Comment node
    Comment,
}

/// A single attribute, name already lowercased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

/// Internal node data
#[derive(Debug)]
pub struct NodeData {
    /// Node type
    pub node_type: NodeType,
    /// Tag name for elements, doctype name for doctypes (lowercase)
    pub name: Option<String>,
    /// Text content for text/comment nodes
    pub text: Option<String>,
    /// Attributes in source order (elements only)
    pub attrs: Vec<Attr>,
    /// Parent node ID
    pub parent: Option<NodeId>,
    /// Child node IDs in document order
    pub children: Vec<NodeId>,
}

impl NodeData {
    /// Create element node data
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Element,
            name: Some(name.into().to_ascii_lowercase()),
            text: None,
            attrs: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create text node data
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Text,
            name: None,
            text: Some(content.into()),
            attrs: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create comment node data
    pub fn comment(content: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Comment,
            name: None,
            text: Some(content.into()),
            attrs: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create doctype node data
    pub fn doctype(name: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Doctype,
            name: Some(name.into()),
            text: None,
            attrs: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create document node data
    pub fn document() -> Self {
        Self {
            node_type: NodeType::Document,
            name: None,
            text: None,
            attrs: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Look up an attribute value by (lowercase) name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// Shared node storage
pub(crate) type NodeStore = Arc<RwLock<HashMap<NodeId, NodeData>>>;

/// A reference to a node in the DOM tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Node ID
    pub id: NodeId,
    /// Reference to document's node storage
    nodes: NodeStore,
}

impl Node {
    /// Create a new node reference
    pub(crate) fn new(id: NodeId, nodes: NodeStore) -> Self {
        Self { id, nodes }
    }

    /// Get the node type
    pub fn node_type(&self) -> NodeType {
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| n.node_type)
            .unwrap_or(NodeType::Element)
    }

    /// Get the tag name (lowercase), `None` for non-elements
    pub fn name(&self) -> Option<String> {
        let nodes = self.nodes.read();
        let data = nodes.get(&self.id)?;
        if data.node_type == NodeType::Element {
            data.name.clone()
        } else {
            None
        }
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.node_type() == NodeType::Text
    }

    /// Get an attribute value
    pub fn attribute(&self, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        self.nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.attr(&name).map(String::from))
    }

    /// Set an attribute value, replacing in place or appending
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        if let Some(node) = self.nodes.write().get_mut(&self.id) {
            match node.attrs.iter_mut().find(|a| a.name == name) {
                Some(attr) => attr.value = value,
                None => node.attrs.push(Attr { name, value }),
            }
        }
    }

    /// Remove an attribute
    pub fn remove_attribute(&self, name: &str) {
        let name = name.to_ascii_lowercase();
        if let Some(node) = self.nodes.write().get_mut(&self.id) {
            node.attrs.retain(|a| a.name != name);
        }
    }

    /// Check if an attribute is present
    pub fn has_attribute(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| n.attrs.iter().any(|a| a.name == name))
            .unwrap_or(false)
    }

    /// Get all attributes in source order
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| {
                n.attrs
                    .iter()
                    .map(|a| (a.name.clone(), a.value.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get parent node
    pub fn parent(&self) -> Option<Node> {
        self.nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.parent)
            .map(|id| Node::new(id, self.nodes.clone()))
    }

    /// Get child nodes in document order
    pub fn children(&self) -> Vec<Node> {
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| {
                n.children
                    .iter()
                    .map(|&id| Node::new(id, self.nodes.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Append a child node, detaching it from any previous parent
    pub fn append_child(&self, child: &Node) {
        let mut nodes = self.nodes.write();

        let old_parent = nodes.get(&child.id).and_then(|d| d.parent);
        if let Some(old_id) = old_parent {
            if let Some(old_parent_data) = nodes.get_mut(&old_id) {
                old_parent_data.children.retain(|&id| id != child.id);
            }
        }

        if let Some(child_data) = nodes.get_mut(&child.id) {
            child_data.parent = Some(self.id);
        }
        if let Some(parent_data) = nodes.get_mut(&self.id) {
            parent_data.children.push(child.id);
        }
    }

    /// Get concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let nodes = self.nodes.read();
        collect_text(&nodes, self.id)
    }

    /// Serialize children to an HTML string
    pub fn inner_html(&self) -> String {
        let nodes = self.nodes.read();
        nodes
            .get(&self.id)
            .map(|n| {
                n.children
                    .iter()
                    .map(|&id| serialize_node(&nodes, id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Serialize this node (and its subtree) to an HTML string
    pub fn outer_html(&self) -> String {
        let nodes = self.nodes.read();
        serialize_node(&nodes, self.id)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

fn collect_text(nodes: &HashMap<NodeId, NodeData>, id: NodeId) -> String {
    match nodes.get(&id) {
        Some(node) => match node.node_type {
            NodeType::Text => node.text.clone().unwrap_or_default(),
            NodeType::Element | NodeType::Document => node
                .children
                .iter()
                .map(|&child| collect_text(nodes, child))
                .collect(),
            _ => String::new(),
        },
        None => String::new(),
    }
}

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn serialize_node(nodes: &HashMap<NodeId, NodeData>, id: NodeId) -> String {
    let Some(node) = nodes.get(&id) else {
        return String::new();
    };

    match node.node_type {
        NodeType::Text => escape_text(node.text.as_deref().unwrap_or("")),
        NodeType::Comment => format!("<!--{}-->", node.text.as_deref().unwrap_or("")),
        NodeType::Doctype => format!("<!DOCTYPE {}>", node.name.as_deref().unwrap_or("html")),
        NodeType::Element => {
            let tag = node.name.as_deref().unwrap_or("div");
            let mut out = String::new();
            out.push('<');
            out.push_str(tag);
            for attr in &node.attrs {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                out.push_str(&escape_attr(&attr.value));
                out.push('"');
            }
            out.push('>');

            if !VOID_ELEMENTS.contains(&tag) {
                for &child in &node.children {
                    out.push_str(&serialize_node(nodes, child));
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            out
        }
        NodeType::Document => node
            .children
            .iter()
            .map(|&child| serialize_node(nodes, child))
            .collect(),
    }
}

/// Escape text node content
fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Escape attribute values (double-quoted serialization)
fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_unique() {
        let id1 = NodeId::new();
        let id2 = NodeId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_attribute_order_preserved() {
        let store: NodeStore = Arc::new(RwLock::new(HashMap::new()));
        let id = NodeId::new();
        store.write().insert(id, NodeData::element("a"));

        let node = Node::new(id, store);
        node.set_attribute("href", "/docs");
        node.set_attribute("class", "nav");
        node.set_attribute("href", "/docs/intro");

        assert_eq!(
            node.attributes(),
            vec![
                ("href".to_string(), "/docs/intro".to_string()),
                ("class".to_string(), "nav".to_string()),
            ]
        );
        assert_eq!(node.outer_html(), r#"<a href="/docs/intro" class="nav"></a>"#);
    }

    #[test]
    fn test_attribute_names_case_insensitive() {
        let store: NodeStore = Arc::new(RwLock::new(HashMap::new()));
        let id = NodeId::new();
        store.write().insert(id, NodeData::element("a"));

        let node = Node::new(id, store);
        node.set_attribute("HREF", "https://example.com");
        assert_eq!(node.attribute("href"), Some("https://example.com".into()));
        assert!(node.has_attribute("Href"));
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_attr(r#"say "hi" & bye"#), "say &quot;hi&quot; &amp; bye");
    }

    #[test]
    fn test_void_element_serialization() {
        let store: NodeStore = Arc::new(RwLock::new(HashMap::new()));
        let id = NodeId::new();
        store.write().insert(id, NodeData::element("br"));

        let node = Node::new(id, store);
        assert_eq!(node.outer_html(), "<br>");
    }
}
