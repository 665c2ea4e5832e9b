// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Outlink - External Link Annotation
//!
//! Annotates external hyperlinks in rendered HTML so they open in a new
//! browsing context with a safe opener/referrer policy
//! (`target="_blank"`, `rel="noopener noreferrer"`). Pure Rust, no
//! browser process, no JavaScript engine.
//!
//! ## Features
//!
//! - One-shot pass: runs on the page's `DomContentLoaded` signal, touches
//!   nothing but `target`/`rel` on external anchors
//! - Browser host semantics: hostname + explicit non-default port,
//!   scheme-agnostic, `<base href>` honored
//! - Idempotent: re-running re-sets identical values
//! - Malformed, relative-only, and hostless (`mailto:`, `javascript:`)
//!   destinations are skipped, never faulted on
//! - Pure core: classification over explicit page-host values and plain
//!   link records, no ambient environment required
//! - Faithful serialization: attribute order, whitespace, comments, and
//!   doctype survive the round trip
//!
//! ## Example
//!
//! ```rust
//! use outlink::{Page, PageConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let page = Page::new(PageConfig::new());
//!     page.load_html(
//!         r#"<body><a href="https://other.org/">elsewhere</a></body>"#,
//!         "https://example.com/guide/",
//!     )?;
//!
//!     let html = page.content().unwrap();
//!     assert!(html.contains(r#"rel="noopener noreferrer""#));
//!     Ok(())
//! }
//! ```

pub mod annotate;
pub mod dom;
pub mod error;
pub mod page;

// Re-exports for convenience

// Page model
pub use page::{LifecycleEvent, LifecycleHook, Page, PageConfig};

// Annotation
pub use annotate::{
    annotate_html, AnnotationPolicy, AnnotationReport, HostMatch, LinkAnnotator,
};
pub use annotate::{classify_href, LinkClass, LinkDescriptor, PageHost};

// DOM
pub use dom::{parse_html, parse_html_with_url, Document, Node};

// Errors
pub use error::{Error, Result};

/// Outlink version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
