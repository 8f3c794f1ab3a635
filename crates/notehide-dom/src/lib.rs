//! # notehide-dom
//!
//! In-memory implementation of [`IHostDocument`](notehide_core::traits::IHostDocument).
//! Nodes live in a generational arena so handles to removed nodes go stale
//! instead of aliasing new ones. Ships the attribute-selector engine the
//! detectors query with and a mutation observer honoring an attribute allow-list.

pub mod builder;
pub mod document;
pub mod observer;
pub mod selector;

pub use builder::{el, text, NodeSpec};
pub use document::MemoryDocument;
pub use observer::MutationLog;
pub use selector::{AttrOp, AttributeSelector, CompoundSelector, SelectorList};
