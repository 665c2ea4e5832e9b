// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever
//!
//! Converts the html5ever tree into the crate's node store. Whitespace,
//! comments, and the doctype are preserved: annotated documents are
//! serialized back out, so the pass must not reformat what it didn't touch.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use url::Url;

use super::document::Document;
use super::node::{Attr, NodeData, NodeId};
use crate::error::{Error, Result};

/// Parse an HTML string into a [`Document`]
pub fn parse_html(html: &str) -> Result<Document> {
    parse_html_with_url(html, None)
}

/// Parse an HTML string with the page URL attached
pub fn parse_html_with_url(html: &str, url: Option<Url>) -> Result<Document> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| Error::HtmlParse(e.to_string()))?;

    let doc = match url {
        Some(u) => Document::with_url(u),
        None => Document::new(),
    };

    let root_id = doc.root().id;
    for child in dom.document.children.borrow().iter() {
        convert_node(&doc, child, root_id);
    }

    Ok(doc)
}

fn convert_node(doc: &Document, handle: &Handle, parent_id: NodeId) -> Option<NodeId> {
    let data = match handle.data {
        RcNodeData::Document => return None,
        RcNodeData::ProcessingInstruction { .. } => return None,
        RcNodeData::Doctype { ref name, .. } => NodeData::doctype(name.to_string()),
        RcNodeData::Text { ref contents } => NodeData::text(contents.borrow().to_string()),
        RcNodeData::Comment { ref contents } => NodeData::comment(contents.to_string()),
        RcNodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            let mut data = NodeData::element(name.local.to_string());
            for attr in attrs.borrow().iter() {
                data.attrs.push(Attr {
                    name: attr.name.local.to_string().to_ascii_lowercase(),
                    value: attr.value.to_string(),
                });
            }
            data
        }
    };

    let node_id = NodeId::new();
    {
        let store = doc.store();
        let mut nodes = store.write();
        let mut data = data;
        data.parent = Some(parent_id);
        nodes.insert(node_id, data);
        if let Some(parent) = nodes.get_mut(&parent_id) {
            parent.children.push(node_id);
        }
    }

    for child in handle.children.borrow().iter() {
        convert_node(doc, child, node_id);
    }

    Some(node_id)
}
