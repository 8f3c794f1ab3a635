//! MemoryDocument: generational arena of element and text nodes.

use notehide_core::errors::{DocumentError, SelectorError};
use notehide_core::models::{MutationRecord, NodeHandle, ObserverOptions};
use notehide_core::traits::IHostDocument;
use tracing::trace;

use crate::observer::MutationLog;
use crate::selector::SelectorList;

const STYLE_ATTRIBUTE: &str = "style";
const HIDDEN_STYLE: &str = "display: none";

#[derive(Debug, Clone)]
enum NodeData {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        /// Inline style before `set_hidden(true)`, restored on unhide.
        saved_style: Option<Option<String>>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeEntry {
    data: NodeData,
    parent: Option<u32>,
    children: Vec<u32>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    entry: Option<NodeEntry>,
}

/// In-memory host document rooted at a `body` element.
#[derive(Debug)]
pub struct MemoryDocument {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: u32,
    mutations: MutationLog,
}

impl MemoryDocument {
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: 0,
            mutations: MutationLog::new(),
        };
        let root = doc.allocate(NodeData::Element {
            tag: "body".to_string(),
            attributes: Vec::new(),
            saved_style: None,
        });
        doc.root = root.index();
        doc
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeHandle {
        self.allocate(NodeData::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            saved_style: None,
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeHandle {
        self.allocate(NodeData::Text(text.to_string()))
    }

    /// Append `child` as the last child of `parent`, moving it if already attached.
    pub fn append_child(
        &mut self,
        parent: NodeHandle,
        child: NodeHandle,
    ) -> Result<(), DocumentError> {
        self.live(parent)?;
        self.live(child)?;
        if self.element_parts(parent).is_none() {
            return Err(DocumentError::NotAnElement {
                index: parent.index(),
            });
        }
        if self.is_inclusive_ancestor(child.index(), parent.index()) {
            return Err(DocumentError::CyclicAttach {
                parent: parent.index(),
                child: child.index(),
            });
        }

        self.unlink(child.index());
        if let Some(entry) = self.entry_mut(child.index()) {
            entry.parent = Some(parent.index());
        }
        if let Some(entry) = self.entry_mut(parent.index()) {
            entry.children.push(child.index());
        }

        if self.is_attached_index(parent.index()) {
            let is_root = parent.index() == self.root;
            self.mutations
                .record_child_list(parent, is_root, vec![child], Vec::new());
        }
        Ok(())
    }

    /// Detach `node` and free its whole subtree. Handles into it become stale.
    pub fn remove(&mut self, node: NodeHandle) -> Result<(), DocumentError> {
        self.live(node)?;
        if node.index() == self.root {
            return Err(DocumentError::RootRemoval);
        }
        let parent = self.entry(node.index()).and_then(|e| e.parent);
        let was_attached = self.is_attached_index(node.index());
        self.unlink(node.index());

        let mut stack = vec![node.index()];
        while let Some(idx) = stack.pop() {
            let slot = &mut self.slots[idx as usize];
            if let Some(entry) = slot.entry.take() {
                stack.extend(entry.children);
            }
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(idx);
        }

        if let (true, Some(parent)) = (was_attached, parent) {
            let parent_handle = self.handle(parent);
            let is_root = parent == self.root;
            self.mutations
                .record_child_list(parent_handle, is_root, Vec::new(), vec![node]);
        }
        Ok(())
    }

    /// Child handles in order. Empty for stale handles.
    pub fn children(&self, node: NodeHandle) -> Vec<NodeHandle> {
        self.get(node)
            .map(|e| e.children.iter().map(|&c| self.handle(c)).collect())
            .unwrap_or_default()
    }

    /// Descendants of `node` in document order, excluding `node`.
    pub fn descendants(&self, node: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let Some(entry) = self.get(node) else {
            return out;
        };
        let mut stack: Vec<u32> = entry.children.iter().rev().copied().collect();
        while let Some(idx) = stack.pop() {
            out.push(self.handle(idx));
            if let Some(e) = self.entry(idx) {
                stack.extend(e.children.iter().rev().copied());
            }
        }
        out
    }

    /// Live nodes in the arena, attached or not.
    pub fn node_count(&self) -> usize {
        self.slots.iter().filter(|s| s.entry.is_some()).count()
    }

    pub fn stop_observing(&mut self) {
        self.mutations.disconnect();
    }

    pub fn pending_mutations(&self) -> usize {
        self.mutations.pending()
    }

    fn allocate(&mut self, data: NodeData) -> NodeHandle {
        let entry = NodeEntry {
            data,
            parent: None,
            children: Vec::new(),
        };
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.entry = Some(entry);
            NodeHandle::new(idx, slot.generation)
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                entry: Some(entry),
            });
            NodeHandle::new(idx, 0)
        }
    }

    fn handle(&self, idx: u32) -> NodeHandle {
        NodeHandle::new(idx, self.slots[idx as usize].generation)
    }

    fn get(&self, node: NodeHandle) -> Option<&NodeEntry> {
        let slot = self.slots.get(node.index() as usize)?;
        if slot.generation != node.generation() {
            return None;
        }
        slot.entry.as_ref()
    }

    fn entry(&self, idx: u32) -> Option<&NodeEntry> {
        self.slots.get(idx as usize)?.entry.as_ref()
    }

    fn entry_mut(&mut self, idx: u32) -> Option<&mut NodeEntry> {
        self.slots.get_mut(idx as usize)?.entry.as_mut()
    }

    fn live(&self, node: NodeHandle) -> Result<(), DocumentError> {
        self.get(node).map(|_| ()).ok_or(DocumentError::StaleHandle {
            index: node.index(),
            generation: node.generation(),
        })
    }

    fn unlink(&mut self, idx: u32) {
        let Some(parent) = self.entry(idx).and_then(|e| e.parent) else {
            return;
        };
        if let Some(p) = self.entry_mut(parent) {
            p.children.retain(|&c| c != idx);
        }
        if let Some(e) = self.entry_mut(idx) {
            e.parent = None;
        }
    }

    fn is_inclusive_ancestor(&self, ancestor: u32, mut node: u32) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.entry(node).and_then(|e| e.parent) {
                Some(p) => node = p,
                None => return false,
            }
        }
    }

    fn is_attached_index(&self, idx: u32) -> bool {
        self.is_inclusive_ancestor(self.root, idx)
    }

    fn element_parts(&self, node: NodeHandle) -> Option<(&str, &[(String, String)])> {
        match &self.get(node)?.data {
            NodeData::Element {
                tag, attributes, ..
            } => Some((tag.as_str(), attributes.as_slice())),
            NodeData::Text(_) => None,
        }
    }

    fn write_attribute(
        &mut self,
        node: NodeHandle,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), DocumentError> {
        self.live(node)?;
        let name = name.to_ascii_lowercase();
        let Some(NodeEntry {
            data: NodeData::Element { attributes, .. },
            ..
        }) = self.entry_mut(node.index())
        else {
            return Err(DocumentError::NotAnElement {
                index: node.index(),
            });
        };

        let changed = match (attributes.iter().position(|(n, _)| *n == name), value) {
            (Some(pos), Some(v)) => {
                let changed = attributes[pos].1 != v;
                attributes[pos].1 = v.to_string();
                changed
            }
            (None, Some(v)) => {
                attributes.push((name.clone(), v.to_string()));
                true
            }
            (Some(pos), None) => {
                attributes.remove(pos);
                true
            }
            (None, None) => false,
        };

        if changed && self.is_attached_index(node.index()) {
            let is_root = node.index() == self.root;
            self.mutations.record_attribute(node, is_root, &name);
        }
        Ok(())
    }

    fn collect_text(&self, idx: u32, out: &mut String) {
        let Some(entry) = self.entry(idx) else {
            return;
        };
        match &entry.data {
            NodeData::Text(t) => out.push_str(t),
            NodeData::Element { .. } => {
                for &child in &entry.children {
                    self.collect_text(child, out);
                }
            }
        }
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl IHostDocument for MemoryDocument {
    fn root(&self) -> NodeHandle {
        self.handle(self.root)
    }

    fn contains(&self, node: NodeHandle) -> bool {
        self.get(node).is_some() && self.is_attached_index(node.index())
    }

    fn query_all(
        &self,
        scope: NodeHandle,
        selector: &str,
    ) -> Result<Vec<NodeHandle>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        let matches: Vec<NodeHandle> = self
            .descendants(scope)
            .into_iter()
            .filter(|&n| {
                self.element_parts(n)
                    .is_some_and(|(tag, attrs)| list.matches(tag, attrs))
            })
            .collect();
        trace!(%scope, selector, count = matches.len(), "query_all");
        Ok(matches)
    }

    fn tag_name(&self, node: NodeHandle) -> Option<String> {
        self.element_parts(node).map(|(tag, _)| tag.to_string())
    }

    fn attribute(&self, node: NodeHandle, name: &str) -> Option<String> {
        let (_, attributes) = self.element_parts(node)?;
        attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }

    fn text_content(&self, node: NodeHandle) -> String {
        let mut out = String::new();
        if self.get(node).is_some() {
            self.collect_text(node.index(), &mut out);
        }
        out
    }

    fn parent(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.get(node)?.parent.map(|p| self.handle(p))
    }

    fn set_attribute(
        &mut self,
        node: NodeHandle,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        self.write_attribute(node, name, Some(value))
    }

    fn remove_attribute(&mut self, node: NodeHandle, name: &str) -> Result<(), DocumentError> {
        self.write_attribute(node, name, None)
    }

    fn set_hidden(&mut self, node: NodeHandle, hidden: bool) -> Result<(), DocumentError> {
        self.live(node)?;
        let current_style = self.attribute(node, STYLE_ATTRIBUTE);
        let Some(NodeEntry {
            data: NodeData::Element { saved_style, .. },
            ..
        }) = self.entry_mut(node.index())
        else {
            return Err(DocumentError::NotAnElement {
                index: node.index(),
            });
        };

        match (hidden, saved_style.is_some()) {
            (true, false) => {
                *saved_style = Some(current_style);
                self.write_attribute(node, STYLE_ATTRIBUTE, Some(HIDDEN_STYLE))
            }
            (false, true) => {
                let previous = saved_style.take().flatten();
                self.write_attribute(node, STYLE_ATTRIBUTE, previous.as_deref())
            }
            _ => Ok(()),
        }
    }

    fn is_hidden(&self, node: NodeHandle) -> bool {
        self.attribute(node, STYLE_ATTRIBUTE).is_some_and(|style| {
            style
                .split(';')
                .any(|decl| decl.replace(char::is_whitespace, "") == "display:none")
        })
    }

    fn observe(&mut self, options: ObserverOptions) {
        self.mutations.observe(options);
    }

    fn take_mutations(&mut self) -> Vec<MutationRecord> {
        self.mutations.take()
    }
}
