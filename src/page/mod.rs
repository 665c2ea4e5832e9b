// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page model
//!
//! The stand-in for the hosting environment: document ownership,
//! lifecycle signals, and the built-in annotation hook.

mod config;
mod lifecycle;
mod page;

pub use config::PageConfig;
pub use lifecycle::{LifecycleEvent, LifecycleHook};
pub use page::Page;
