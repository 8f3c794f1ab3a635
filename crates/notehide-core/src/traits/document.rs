use crate::errors::{DocumentError, SelectorError};
use crate::models::{MutationRecord, NodeHandle, ObserverOptions};

/// The host document as seen by the pipeline.
///
/// Queries use the compound attribute-selector syntax understood by the host;
/// a selector the host cannot parse yields [`SelectorError`]. Reads on a
/// handle that is no longer in the document return empty values.
pub trait IHostDocument {
    fn root(&self) -> NodeHandle;

    /// True while `node` is live and attached under the root.
    fn contains(&self, node: NodeHandle) -> bool;

    /// Elements under `scope` (excluding `scope`) matching `selector`, in document order.
    fn query_all(&self, scope: NodeHandle, selector: &str)
        -> Result<Vec<NodeHandle>, SelectorError>;

    fn query_first(
        &self,
        scope: NodeHandle,
        selector: &str,
    ) -> Result<Option<NodeHandle>, SelectorError> {
        Ok(self.query_all(scope, selector)?.into_iter().next())
    }

    /// Lowercase tag name, `None` for text nodes and stale handles.
    fn tag_name(&self, node: NodeHandle) -> Option<String>;

    fn attribute(&self, node: NodeHandle, name: &str) -> Option<String>;

    /// Concatenated descendant text.
    fn text_content(&self, node: NodeHandle) -> String;

    fn parent(&self, node: NodeHandle) -> Option<NodeHandle>;

    fn set_attribute(
        &mut self,
        node: NodeHandle,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError>;

    fn remove_attribute(&mut self, node: NodeHandle, name: &str) -> Result<(), DocumentError>;

    /// Suppress or restore rendering of `node`.
    fn set_hidden(&mut self, node: NodeHandle, hidden: bool) -> Result<(), DocumentError>;

    fn is_hidden(&self, node: NodeHandle) -> bool;

    /// Start recording structural mutations.
    fn observe(&mut self, options: ObserverOptions);

    /// Drain recorded mutations.
    fn take_mutations(&mut self) -> Vec<MutationRecord>;
}
