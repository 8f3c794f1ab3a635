//! Mutation recording with an attribute allow-list.

use notehide_core::models::{MutationKind, MutationRecord, NodeHandle, ObserverOptions};

/// Pending structural mutations, recorded only while observing.
#[derive(Debug, Default)]
pub struct MutationLog {
    options: Option<ObserverOptions>,
    records: Vec<MutationRecord>,
}

impl MutationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, options: ObserverOptions) {
        self.options = Some(options);
    }

    pub fn disconnect(&mut self) {
        self.options = None;
        self.records.clear();
    }

    pub fn is_observing(&self) -> bool {
        self.options.is_some()
    }

    /// Record a child-list change on `target`. `is_root` tells whether the
    /// target is the observed root, for non-subtree observers.
    pub fn record_child_list(
        &mut self,
        target: NodeHandle,
        is_root: bool,
        added: Vec<NodeHandle>,
        removed: Vec<NodeHandle>,
    ) {
        let Some(options) = &self.options else {
            return;
        };
        if !options.child_list || !(options.subtree || is_root) {
            return;
        }
        self.records.push(MutationRecord {
            target,
            kind: MutationKind::ChildList { added, removed },
        });
    }

    /// Record an attribute change, dropped unless `name` is allow-listed.
    pub fn record_attribute(&mut self, target: NodeHandle, is_root: bool, name: &str) {
        let Some(options) = &self.options else {
            return;
        };
        if !(options.subtree || is_root) {
            return;
        }
        if !options.attribute_filter.iter().any(|a| a == name) {
            return;
        }
        self.records.push(MutationRecord {
            target,
            kind: MutationKind::Attribute {
                name: name.to_string(),
            },
        });
    }

    pub fn take(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn pending(&self) -> usize {
        self.records.len()
    }
}
