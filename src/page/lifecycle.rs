// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page lifecycle events
//!
//! Models the two signals a hosting page raises for this crate's
//! purposes: structure parsed (`DomContentLoaded`) and load complete
//! (`Load`). Each event fires at most once per loaded document; hooks
//! run synchronously, in registration order, inside the dispatch.

use crate::dom::Document;

/// Lifecycle signal of a loaded page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Document structure is parsed; subresources may still be pending.
    /// This is where the link annotator runs.
    DomContentLoaded,
    /// The page load is complete
    Load,
}

/// A lifecycle callback
pub type LifecycleHook = Box<dyn Fn(&Document) + Send + Sync>;

/// Hook registry with exactly-once dispatch per load
pub(crate) struct LifecycleHooks {
    dom_content_loaded: Vec<LifecycleHook>,
    load: Vec<LifecycleHook>,
    fired: Vec<LifecycleEvent>,
}

impl LifecycleHooks {
    pub(crate) fn new() -> Self {
        Self {
            dom_content_loaded: Vec::new(),
            load: Vec::new(),
            fired: Vec::new(),
        }
    }

    pub(crate) fn register(&mut self, event: LifecycleEvent, hook: LifecycleHook) {
        match event {
            LifecycleEvent::DomContentLoaded => self.dom_content_loaded.push(hook),
            LifecycleEvent::Load => self.load.push(hook),
        }
    }

    /// Start a new document load: previous dispatches no longer count
    pub(crate) fn begin_load(&mut self) {
        self.fired.clear();
    }

    /// Fire an event for the current document, at most once
    pub(crate) fn dispatch(&mut self, event: LifecycleEvent, doc: &Document) {
        if self.fired.contains(&event) {
            return;
        }
        self.fired.push(event);

        let hooks = match event {
            LifecycleEvent::DomContentLoaded => &self.dom_content_loaded,
            LifecycleEvent::Load => &self.load,
        };
        for hook in hooks {
            hook(doc);
        }
    }

    pub(crate) fn has_fired(&self, event: LifecycleEvent) -> bool {
        self.fired.contains(&event)
    }
}
