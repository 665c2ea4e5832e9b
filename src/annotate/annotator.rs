// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The annotation pass
//!
//! One synchronous sweep over the anchors of a document: external links
//! get `target` and `rel` set per policy, everything else is left alone.
//! The pass never fails and never touches anything but those two
//! attributes on anchors it classified as external.

use serde::Serialize;
use tracing::debug;
use url::Url;

use super::classify::{classify_href, resolve_href, LinkClass, LinkDescriptor, PageHost};
use super::policy::AnnotationPolicy;
use crate::dom::{parse_html_with_url, Document};
use crate::error::Result;

/// Counts from one annotation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationReport {
    /// Anchors examined
    pub scanned: usize,
    /// Anchors annotated as external
    pub annotated: usize,
    /// Anchors whose destination matched the page host
    pub internal: usize,
    /// Anchors with no usable destination
    pub inert: usize,
}

/// Annotates external links in a document
#[derive(Debug, Clone, Default)]
pub struct LinkAnnotator {
    policy: AnnotationPolicy,
}

impl LinkAnnotator {
    /// Create an annotator with the given policy
    pub fn new(policy: AnnotationPolicy) -> Self {
        Self { policy }
    }

    /// Get the active policy
    pub fn policy(&self) -> &AnnotationPolicy {
        &self.policy
    }

    /// Annotate a document, taking the page host from the document URL
    ///
    /// A document without a URL has no page identity; the pass is then a
    /// no-op rather than a fault.
    pub fn annotate_document(&self, doc: &Document) -> AnnotationReport {
        let Some(page_host) = doc.url().and_then(PageHost::from_url) else {
            debug!("document has no host identity, skipping annotation");
            return AnnotationReport::default();
        };
        self.annotate_with_host(doc, &page_host)
    }

    /// Annotate a document against an explicitly supplied page host
    pub fn annotate_with_host(&self, doc: &Document, page_host: &PageHost) -> AnnotationReport {
        let base = doc.base_url();
        let mut report = AnnotationReport::default();

        for anchor in doc.anchors() {
            report.scanned += 1;
            let href = anchor.attribute("href");
            match classify_href(href.as_deref(), base.as_ref(), page_host, self.policy.host_match)
            {
                LinkClass::External => {
                    anchor.set_attribute("target", self.policy.target.as_str());
                    let rel = self.rel_value(anchor.attribute("rel").as_deref());
                    anchor.set_attribute("rel", rel);
                    report.annotated += 1;
                }
                LinkClass::Internal => report.internal += 1,
                LinkClass::Inert => report.inert += 1,
            }
        }

        debug!(
            page_host = %page_host,
            scanned = report.scanned,
            annotated = report.annotated,
            "external links annotated"
        );
        report
    }

    /// Annotate plain link records, no document involved
    ///
    /// Relative hrefs resolve against `base`; with no base they are inert.
    pub fn annotate_links(
        &self,
        links: &mut [LinkDescriptor],
        base: Option<&Url>,
        page_host: &PageHost,
    ) -> AnnotationReport {
        let mut report = AnnotationReport::default();

        for link in links.iter_mut() {
            report.scanned += 1;
            match classify_href(link.href.as_deref(), base, page_host, self.policy.host_match) {
                LinkClass::External => {
                    link.set_attribute("target", self.policy.target.clone());
                    let rel = self.rel_value(link.attribute("rel"));
                    link.set_attribute("rel", rel);
                    report.annotated += 1;
                }
                LinkClass::Internal => report.internal += 1,
                LinkClass::Inert => report.inert += 1,
            }
        }

        report
    }

    /// Resolved destinations of the anchors the pass would annotate
    pub fn external_links(&self, doc: &Document) -> Vec<String> {
        let Some(page_host) = doc.url().and_then(PageHost::from_url) else {
            return Vec::new();
        };
        let base = doc.base_url();
        let mut out = Vec::new();

        for anchor in doc.anchors() {
            let Some(href) = anchor.attribute("href") else {
                continue;
            };
            if classify_href(Some(&href), base.as_ref(), &page_host, self.policy.host_match)
                == LinkClass::External
            {
                if let Some(resolved) = resolve_href(&href, base.as_ref()) {
                    out.push(resolved.to_string());
                }
            }
        }
        out
    }

    /// The rel value to write, honoring `merge_rel`
    fn rel_value(&self, existing: Option<&str>) -> String {
        if !self.policy.merge_rel {
            return self.policy.rel.clone();
        }

        let mut tokens: Vec<&str> = existing.unwrap_or("").split_whitespace().collect();
        for token in self.policy.rel.split_whitespace() {
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        tokens.join(" ")
    }
}

/// Parse, annotate, and re-serialize an HTML page in one call
pub fn annotate_html(html: &str, page_url: &str, policy: &AnnotationPolicy) -> Result<String> {
    let url = Url::parse(page_url)?;
    let doc = parse_html_with_url(html, Some(url))?;
    LinkAnnotator::new(policy.clone()).annotate_document(&doc);
    Ok(doc.outer_html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::policy::HostMatch;
    use crate::dom::parse_html_with_url;

    fn load(html: &str) -> Document {
        let url = Url::parse("https://example.com/guide/").unwrap();
        parse_html_with_url(html, Some(url)).unwrap()
    }

    #[test]
    fn test_external_link_annotated() {
        let doc = load(r#"<body><a href="https://other.org/page">x</a></body>"#);
        let report = LinkAnnotator::default().annotate_document(&doc);

        let a = doc.query_selector("a").unwrap();
        assert_eq!(a.attribute("target"), Some("_blank".to_string()));
        assert_eq!(a.attribute("rel"), Some("noopener noreferrer".to_string()));
        assert_eq!(report.annotated, 1);
    }

    #[test]
    fn test_internal_link_untouched() {
        let doc = load(r#"<body><a href="https://example.com/about">x</a></body>"#);
        let report = LinkAnnotator::default().annotate_document(&doc);

        let a = doc.query_selector("a").unwrap();
        assert!(!a.has_attribute("target"));
        assert!(!a.has_attribute("rel"));
        assert_eq!(report.internal, 1);
    }

    #[test]
    fn test_rel_overwritten_by_default() {
        let doc = load(r#"<body><a href="https://other.org/" rel="nofollow">x</a></body>"#);
        LinkAnnotator::default().annotate_document(&doc);
        let a = doc.query_selector("a").unwrap();
        assert_eq!(a.attribute("rel"), Some("noopener noreferrer".to_string()));
    }

    #[test]
    fn test_rel_merge_preserves_tokens() {
        let doc = load(r#"<body><a href="https://other.org/" rel="nofollow noopener">x</a></body>"#);
        let annotator = LinkAnnotator::new(AnnotationPolicy::new().merge_rel(true));
        annotator.annotate_document(&doc);

        let a = doc.query_selector("a").unwrap();
        assert_eq!(a.attribute("rel"), Some("nofollow noopener noreferrer".to_string()));

        // Merging again changes nothing
        annotator.annotate_document(&doc);
        let a = doc.query_selector("a").unwrap();
        assert_eq!(a.attribute("rel"), Some("nofollow noopener noreferrer".to_string()));
    }

    #[test]
    fn test_no_url_is_noop() {
        let doc = crate::dom::parse_html(r#"<body><a href="https://other.org/">x</a></body>"#)
            .unwrap();
        let report = LinkAnnotator::default().annotate_document(&doc);
        assert_eq!(report, AnnotationReport::default());
        assert!(!doc.query_selector("a").unwrap().has_attribute("target"));
    }

    #[test]
    fn test_explicit_host_overrides_document_url() {
        let doc = load(r#"<body><a href="https://example.com/about">x</a></body>"#);
        let annotator = LinkAnnotator::default();
        let other = PageHost::parse("docs.other.org").unwrap();
        let report = annotator.annotate_with_host(&doc, &other);

        // From docs.other.org's point of view, example.com is external
        assert_eq!(report.annotated, 1);
    }

    #[test]
    fn test_base_element_changes_resolution() {
        let doc = load(
            r#"<head><base href="https://cdn.other.org/assets/"></head>
               <body><a href="style.css">x</a></body>"#,
        );
        let report = LinkAnnotator::default().annotate_document(&doc);
        // Relative href now resolves to cdn.other.org
        assert_eq!(report.annotated, 1);
    }

    #[test]
    fn test_descriptor_pass() {
        let mut links = vec![
            LinkDescriptor::new("https://example.com/about"),
            LinkDescriptor::new("https://other.org/page"),
            LinkDescriptor::inert(),
        ];
        let page = PageHost::parse("example.com").unwrap();
        let report = LinkAnnotator::default().annotate_links(&mut links, None, &page);

        assert_eq!(report.scanned, 3);
        assert_eq!(report.internal, 1);
        assert_eq!(report.annotated, 1);
        assert_eq!(report.inert, 1);

        assert!(!links[0].has_attribute("target"));
        assert_eq!(links[1].attribute("target"), Some("_blank"));
        assert_eq!(links[1].attribute("rel"), Some("noopener noreferrer"));
        assert!(!links[2].has_attribute("rel"));
    }

    #[test]
    fn test_hostname_only_rule() {
        let doc = load(r#"<body><a href="https://example.com:8080/x">x</a></body>"#);
        let annotator =
            LinkAnnotator::new(AnnotationPolicy::new().host_match(HostMatch::HostnameOnly));
        let report = annotator.annotate_document(&doc);
        assert_eq!(report.internal, 1);
        assert_eq!(report.annotated, 0);
    }

    #[test]
    fn test_external_links_listing() {
        let doc = load(
            r#"<body>
                <a href="/local">l</a>
                <a href="https://other.org/page">e</a>
                <a href="mailto:dev@other.org">m</a>
            </body>"#,
        );
        let externals = LinkAnnotator::default().external_links(&doc);
        assert_eq!(externals, vec!["https://other.org/page".to_string()]);
    }

    #[test]
    fn test_annotate_html_roundtrip() {
        let html = r#"<!DOCTYPE html><html><body><a href="https://other.org/">x</a></body></html>"#;
        let out = annotate_html(html, "https://example.com/", &AnnotationPolicy::default())
            .unwrap();
        assert!(out.contains(r#"target="_blank""#));
        assert!(out.contains(r#"rel="noopener noreferrer""#));
    }
}
