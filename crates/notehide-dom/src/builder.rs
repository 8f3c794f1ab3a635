//! Declarative node trees for tests and fixtures.
//!
//! ```
//! use notehide_dom::{el, MemoryDocument};
//! use notehide_core::traits::IHostDocument;
//!
//! let mut doc = MemoryDocument::new();
//! let root = doc.root();
//! let item = doc
//!     .append(root, &el("article").attr("data-testid", "tweet").text("hello"))
//!     .unwrap();
//! assert_eq!(doc.text_content(item), "hello");
//! ```

use std::collections::BTreeMap;

use notehide_core::errors::DocumentError;
use notehide_core::models::NodeHandle;
use notehide_core::traits::IHostDocument;
use serde::{Deserialize, Serialize};

use crate::document::MemoryDocument;

/// A node subtree. In JSON a string is a text node and an object an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Text(String),
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attrs: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<NodeSpec>,
    },
}

/// Start an element spec.
pub fn el(tag: &str) -> NodeSpec {
    NodeSpec::Element {
        tag: tag.to_string(),
        attrs: BTreeMap::new(),
        children: Vec::new(),
    }
}

/// A text node spec.
pub fn text(value: &str) -> NodeSpec {
    NodeSpec::Text(value.to_string())
}

impl NodeSpec {
    /// Set an attribute. No-op on text specs.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        if let NodeSpec::Element { attrs, .. } = &mut self {
            attrs.insert(name.to_string(), value.to_string());
        }
        self
    }

    /// Append a child. No-op on text specs.
    pub fn child(mut self, child: NodeSpec) -> Self {
        if let NodeSpec::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn children(self, kids: impl IntoIterator<Item = NodeSpec>) -> Self {
        kids.into_iter().fold(self, NodeSpec::child)
    }

    /// Append a text child.
    pub fn text(self, value: &str) -> Self {
        self.child(text(value))
    }
}

impl MemoryDocument {
    /// Build a detached subtree from `spec`.
    pub fn build(&mut self, spec: &NodeSpec) -> Result<NodeHandle, DocumentError> {
        match spec {
            NodeSpec::Text(value) => Ok(self.create_text(value)),
            NodeSpec::Element {
                tag,
                attrs,
                children,
            } => {
                let node = self.create_element(tag);
                for (name, value) in attrs {
                    self.set_attribute(node, name, value)?;
                }
                for child in children {
                    let child = self.build(child)?;
                    self.append_child(node, child)?;
                }
                Ok(node)
            }
        }
    }

    /// Build `spec` and insert it under `parent` as one mutation.
    pub fn append(
        &mut self,
        parent: NodeHandle,
        spec: &NodeSpec,
    ) -> Result<NodeHandle, DocumentError> {
        let node = self.build(spec)?;
        self.append_child(parent, node)?;
        Ok(node)
    }

    /// Build a document whose body holds `items`.
    pub fn from_specs(items: &[NodeSpec]) -> Result<(Self, Vec<NodeHandle>), DocumentError> {
        let mut doc = Self::new();
        let root = doc.root();
        let handles = items
            .iter()
            .map(|spec| doc.append(root, spec))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((doc, handles))
    }
}
