//! # notehide-detect
//!
//! Best-effort classification of feed items against a host markup surface
//! that is not contractually stable.
//!
//! Five confirmed-note detector families, evaluated in priority order:
//! structural attribute, accessible name, body text, outbound link, and a
//! double-verified generic attribute sweep. A separate rating-control
//! detector recognises proposed notes and runs first.
//!
//! Every detector degrades to "no match": a malformed query or an item with
//! missing regions never aborts classification.

pub mod account;
pub mod classifier;
pub mod signals;

pub use account::{handle_from_href, AccountResolver};
pub use classifier::Classifier;
pub use signals::{
    AccessibleNameSignal, BodyTextSignal, GenericSweepSignal, OutboundLinkSignal,
    ProposedNoteSignal, SignalDetector, StructuralAttributeSignal,
};
