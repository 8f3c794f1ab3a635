//! Detector families. Each is an independent, pure predicate over one item.

mod accessible_name;
mod body_text;
mod generic_sweep;
mod outbound_link;
pub mod patterns;
mod proposed;
mod structural;

pub use accessible_name::AccessibleNameSignal;
pub use body_text::BodyTextSignal;
pub use generic_sweep::GenericSweepSignal;
pub use outbound_link::OutboundLinkSignal;
pub use proposed::ProposedNoteSignal;
pub use structural::StructuralAttributeSignal;

use notehide_core::models::{NodeHandle, SignalFamily, SignalMatch};
use notehide_core::traits::IHostDocument;
use tracing::trace;

/// One detector family.
pub trait SignalDetector: Send + Sync {
    fn family(&self) -> SignalFamily;

    /// Evaluate against the current content of `item`.
    fn detect(&self, doc: &dyn IHostDocument, item: NodeHandle) -> SignalMatch;
}

/// Run a query, treating a selector the host rejects as matching nothing.
pub(crate) fn query_lenient(
    doc: &dyn IHostDocument,
    scope: NodeHandle,
    selector: &str,
) -> Vec<NodeHandle> {
    match doc.query_all(scope, selector) {
        Ok(nodes) => nodes,
        Err(e) => {
            trace!(selector, error = %e, "selector rejected, treating as no match");
            Vec::new()
        }
    }
}

/// Collapse whitespace runs into single spaces and trim.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
