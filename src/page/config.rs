// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page configuration

use crate::annotate::AnnotationPolicy;

/// Page configuration
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Run the external-link annotator on `DomContentLoaded`
    pub annotate_external_links: bool,
    /// Policy used by the built-in annotator
    pub policy: AnnotationPolicy,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PageConfig {
    /// Create the default config: annotation enabled, default policy
    pub fn new() -> Self {
        Self {
            annotate_external_links: true,
            policy: AnnotationPolicy::default(),
        }
    }

    /// Enable or disable the built-in annotation hook
    pub fn annotate_external_links(mut self, enabled: bool) -> Self {
        self.annotate_external_links = enabled;
        self
    }

    /// Set the annotation policy
    pub fn policy(mut self, policy: AnnotationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Config that loads documents without touching them
    pub fn passthrough() -> Self {
        Self {
            annotate_external_links: false,
            policy: AnnotationPolicy::default(),
        }
    }
}
