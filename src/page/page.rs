// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page implementation
//!
//! A `Page` stands in for the hosting environment: it loads HTML, owns
//! the resulting document, and raises lifecycle events. With annotation
//! enabled (the default), the external-link pass runs as a
//! `DomContentLoaded` hook, before `Load` and before control returns
//! from `load_html`.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use url::Url;

use super::config::PageConfig;
use super::lifecycle::{LifecycleEvent, LifecycleHook, LifecycleHooks};
use crate::annotate::{AnnotationReport, LinkAnnotator};
use crate::dom::{parse_html_with_url, Document, Node};
use crate::error::Result;

/// A loaded page
pub struct Page {
    /// Page configuration
    config: PageConfig,
    /// Current URL
    url: Arc<RwLock<Option<Url>>>,
    /// Current document
    document: Arc<RwLock<Option<Document>>>,
    /// Lifecycle hook registry
    hooks: Mutex<LifecycleHooks>,
    /// Report from the built-in annotator, per load
    last_report: Arc<RwLock<Option<AnnotationReport>>>,
}

impl Page {
    /// Create a new page
    pub fn new(config: PageConfig) -> Self {
        let page = Self {
            config,
            url: Arc::new(RwLock::new(None)),
            document: Arc::new(RwLock::new(None)),
            hooks: Mutex::new(LifecycleHooks::new()),
            last_report: Arc::new(RwLock::new(None)),
        };

        if page.config.annotate_external_links {
            let annotator = LinkAnnotator::new(page.config.policy.clone());
            let report_slot = page.last_report.clone();
            page.hooks.lock().register(
                LifecycleEvent::DomContentLoaded,
                Box::new(move |doc| {
                    let report = annotator.annotate_document(doc);
                    *report_slot.write() = Some(report);
                }),
            );
        }

        page
    }

    /// Get the active config
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Load an HTML document into the page
    ///
    /// Parses the markup, then fires `DomContentLoaded` and `Load`
    /// synchronously before returning. Hooks must not re-enter the page.
    pub fn load_html(&self, html: &str, url: &str) -> Result<()> {
        let parsed_url = Url::parse(url)?;
        let doc = parse_html_with_url(html, Some(parsed_url.clone()))?;

        *self.url.write() = Some(parsed_url);
        *self.document.write() = Some(doc.clone());
        *self.last_report.write() = None;

        let mut hooks = self.hooks.lock();
        hooks.begin_load();
        hooks.dispatch(LifecycleEvent::DomContentLoaded, &doc);
        hooks.dispatch(LifecycleEvent::Load, &doc);

        Ok(())
    }

    /// Register a hook for `DomContentLoaded`
    pub fn on_dom_content_loaded(&self, hook: LifecycleHook) {
        self.hooks
            .lock()
            .register(LifecycleEvent::DomContentLoaded, hook);
    }

    /// Register a hook for `Load`
    pub fn on_load(&self, hook: LifecycleHook) {
        self.hooks.lock().register(LifecycleEvent::Load, hook);
    }

    /// Check whether an event has fired for the current document
    pub fn has_fired(&self, event: LifecycleEvent) -> bool {
        self.hooks.lock().has_fired(event)
    }

    /// Get current URL
    pub fn url(&self) -> Option<String> {
        self.url.read().as_ref().map(|u| u.to_string())
    }

    /// Get current document
    pub fn document(&self) -> Option<Document> {
        self.document.read().clone()
    }

    /// Get page title
    pub fn title(&self) -> Option<String> {
        self.document.read().as_ref().map(|d| d.title())
    }

    /// Get page content as serialized HTML
    pub fn content(&self) -> Option<String> {
        self.document.read().as_ref().map(|d| d.outer_html())
    }

    /// Report from the built-in annotator for the current document
    pub fn last_annotation_report(&self) -> Option<AnnotationReport> {
        *self.last_report.read()
    }

    /// Query selector on the current document
    pub fn query_selector(&self, selector: &str) -> Option<Node> {
        self.document.read().as_ref()?.query_selector(selector)
    }

    /// Query selector all on the current document
    pub fn query_selector_all(&self, selector: &str) -> Vec<Node> {
        self.document
            .read()
            .as_ref()
            .map(|d| d.query_selector_all(selector))
            .unwrap_or_default()
    }

    /// All link destinations on the page, as written in the markup
    pub fn links(&self) -> Vec<String> {
        self.document
            .read()
            .as_ref()
            .map(|d| {
                d.anchors()
                    .into_iter()
                    .filter_map(|a| a.attribute("href"))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(PageConfig::default())
    }
}
