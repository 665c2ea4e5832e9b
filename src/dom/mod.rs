// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM engine for HTML parsing and mutation
//!
//! A deliberately small DOM built on html5ever: enough to enumerate
//! anchors, mutate their attributes, and serialize the document back out.

mod document;
mod node;
mod parser;
mod selector;

pub use document::Document;
pub use node::{Attr, Node, NodeData, NodeId, NodeType};
pub use parser::{parse_html, parse_html_with_url};
pub use selector::Selector;
