// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document representation

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use url::Url;

use super::node::{Node, NodeData, NodeId, NodeStore};
use super::selector::Selector;

/// HTML document backed by an id-keyed node store
///
/// Cloning a `Document` clones the handle, not the tree: all clones see
/// the same nodes, mirroring how a hosting page owns a single live DOM.
#[derive(Debug, Clone)]
pub struct Document {
    /// Document URL (the page identity for link classification)
    url: Option<Url>,
    /// Root node ID
    root_id: NodeId,
    /// Node storage
    nodes: NodeStore,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        let root_id = NodeId::new();
        let mut nodes = HashMap::new();
        nodes.insert(root_id, NodeData::document());

        Self {
            url: None,
            root_id,
            nodes: Arc::new(RwLock::new(nodes)),
        }
    }

    /// Create a document with a URL
    pub fn with_url(url: Url) -> Self {
        let mut doc = Self::new();
        doc.url = Some(url);
        doc
    }

    /// Get the document URL
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Get the document URL as a string
    pub fn url_string(&self) -> Option<String> {
        self.url.as_ref().map(|u| u.to_string())
    }

    /// Base URL for resolving relative hrefs
    ///
    /// A `<base href>` element takes precedence over the document URL,
    /// as in a real browsing context.
    pub fn base_url(&self) -> Option<Url> {
        if let Some(base_href) = self
            .query_selector("base[href]")
            .and_then(|b| b.attribute("href"))
        {
            match self.url.as_ref() {
                Some(doc_url) => {
                    if let Ok(resolved) = doc_url.join(&base_href) {
                        return Some(resolved);
                    }
                }
                None => {
                    if let Ok(absolute) = Url::parse(&base_href) {
                        return Some(absolute);
                    }
                }
            }
        }
        self.url.clone()
    }

    /// Get document title
    pub fn title(&self) -> String {
        self.query_selector("title")
            .map(|t| t.text_content())
            .unwrap_or_default()
    }

    /// Get the root node
    pub fn root(&self) -> Node {
        Node::new(self.root_id, self.nodes.clone())
    }

    pub(crate) fn store(&self) -> NodeStore {
        self.nodes.clone()
    }

    /// Get the `<body>` element
    pub fn body(&self) -> Option<Node> {
        self.query_selector("body")
    }

    /// Find the first element matching a selector, in document order
    pub fn query_selector(&self, selector: &str) -> Option<Node> {
        let sel = Selector::parse(selector).ok()?;
        let mut results = Vec::new();
        self.collect_matching(self.root(), &sel, &mut results, false);
        results.into_iter().next()
    }

    /// Find all elements matching a selector, in document order
    pub fn query_selector_all(&self, selector: &str) -> Vec<Node> {
        let mut results = Vec::new();
        if let Ok(sel) = Selector::parse(selector) {
            self.collect_matching(self.root(), &sel, &mut results, true);
        }
        results
    }

    /// All anchor elements in document order, href-less ones included
    ///
    /// Inert anchors are the annotator's concern, so this deliberately
    /// does not filter on `[href]`.
    pub fn anchors(&self) -> Vec<Node> {
        self.query_selector_all("a")
    }

    fn collect_matching(&self, node: Node, sel: &Selector, results: &mut Vec<Node>, all: bool) {
        if !all && !results.is_empty() {
            return;
        }
        if sel.matches(&node) {
            results.push(node.clone());
            if !all {
                return;
            }
        }
        for child in node.children() {
            self.collect_matching(child, sel, results, all);
        }
    }

    /// Create a detached element
    pub fn create_element(&self, tag: &str) -> Node {
        let id = NodeId::new();
        self.nodes.write().insert(id, NodeData::element(tag));
        Node::new(id, self.nodes.clone())
    }

    /// Create a detached text node
    pub fn create_text_node(&self, content: &str) -> Node {
        let id = NodeId::new();
        self.nodes.write().insert(id, NodeData::text(content));
        Node::new(id, self.nodes.clone())
    }

    /// Serialize the whole document to HTML
    pub fn outer_html(&self) -> String {
        self.root().outer_html()
    }

    /// Get all text content
    pub fn text_content(&self) -> String {
        self.root().text_content()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html_with_url;

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert!(doc.url().is_none());
        assert!(doc.title().is_empty());
        assert!(doc.anchors().is_empty());
    }

    #[test]
    fn test_anchors_include_hrefless() {
        let doc = crate::dom::parse_html(
            r#"<body><a href="/x">one</a><a name="top">two</a></body>"#,
        )
        .unwrap();
        assert_eq!(doc.anchors().len(), 2);
    }

    #[test]
    fn test_base_url_overrides_document_url() {
        let url = Url::parse("https://example.com/guide/intro/").unwrap();
        let doc = parse_html_with_url(
            r#"<head><base href="https://example.com/docs/"></head>"#,
            Some(url),
        )
        .unwrap();
        assert_eq!(
            doc.base_url().unwrap().as_str(),
            "https://example.com/docs/"
        );
    }

    #[test]
    fn test_document_order() {
        let doc = crate::dom::parse_html(
            "<body><p><a href='/1'>1</a></p><a href='/2'>2</a></body>",
        )
        .unwrap();
        let hrefs: Vec<_> = doc
            .anchors()
            .iter()
            .filter_map(|a| a.attribute("href"))
            .collect();
        assert_eq!(hrefs, vec!["/1", "/2"]);
    }
}
