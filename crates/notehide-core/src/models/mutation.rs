use serde::{Deserialize, Serialize};

use super::node::NodeHandle;
use crate::constants::OBSERVED_ATTRIBUTES;

/// What the structural observer should report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverOptions {
    pub child_list: bool,
    pub subtree: bool,
    /// Attribute changes are reported only for names in this list.
    pub attribute_filter: Vec<String>,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            child_list: true,
            subtree: true,
            attribute_filter: OBSERVED_ATTRIBUTES.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// One structural change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationRecord {
    pub target: NodeHandle,
    pub kind: MutationKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MutationKind {
    ChildList {
        added: Vec<NodeHandle>,
        removed: Vec<NodeHandle>,
    },
    Attribute {
        name: String,
    },
}

impl MutationRecord {
    /// True when the record adds nodes to the document.
    pub fn adds_nodes(&self) -> bool {
        matches!(&self.kind, MutationKind::ChildList { added, .. } if !added.is_empty())
    }
}
