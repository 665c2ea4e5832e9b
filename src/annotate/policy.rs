// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Annotation policy configuration

use serde::{Deserialize, Serialize};

/// Default value for the new-browsing-context attribute
pub const DEFAULT_TARGET: &str = "_blank";

/// Default opener/referrer policy value
pub const DEFAULT_REL: &str = "noopener noreferrer";

/// Host comparison rule for deciding whether a link is external
///
/// Neither rule looks at the scheme: `http://example.com` and
/// `https://example.com` are the same host, as they are for
/// `location.host` in a browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostMatch {
    /// Hostname plus explicit non-default port. `example.com:8080` is a
    /// different host than `example.com`. This is browser `location.host`
    /// behavior and the default.
    HostAndPort,
    /// Hostname only; ports are ignored entirely.
    HostnameOnly,
}

impl Default for HostMatch {
    fn default() -> Self {
        HostMatch::HostAndPort
    }
}

/// Configuration for the link annotation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationPolicy {
    /// Value written to `target` on external links
    pub target: String,
    /// Value written to `rel` on external links
    pub rel: String,
    /// Host comparison rule
    pub host_match: HostMatch,
    /// Preserve existing `rel` tokens and append missing policy tokens,
    /// instead of overwriting the attribute
    pub merge_rel: bool,
}

impl Default for AnnotationPolicy {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            rel: DEFAULT_REL.to_string(),
            host_match: HostMatch::default(),
            merge_rel: false,
        }
    }
}

impl AnnotationPolicy {
    /// Create the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `target` value
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Set the `rel` value
    pub fn rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = rel.into();
        self
    }

    /// Set the host comparison rule
    pub fn host_match(mut self, host_match: HostMatch) -> Self {
        self.host_match = host_match;
        self
    }

    /// Merge policy `rel` tokens with existing ones instead of overwriting
    pub fn merge_rel(mut self, merge: bool) -> Self {
        self.merge_rel = merge;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_values() {
        let policy = AnnotationPolicy::default();
        assert_eq!(policy.target, "_blank");
        assert_eq!(policy.rel, "noopener noreferrer");
        assert_eq!(policy.host_match, HostMatch::HostAndPort);
        assert!(!policy.merge_rel);
    }

    #[test]
    fn test_builder() {
        let policy = AnnotationPolicy::new()
            .rel("noopener")
            .host_match(HostMatch::HostnameOnly)
            .merge_rel(true);
        assert_eq!(policy.rel, "noopener");
        assert_eq!(policy.host_match, HostMatch::HostnameOnly);
        assert!(policy.merge_rel);
    }
}
