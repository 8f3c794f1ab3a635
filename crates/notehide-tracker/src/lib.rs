//! # notehide-tracker
//!
//! Owns the per-item state map. Claims are atomic per item so overlapping
//! passes never process the same item twice; decisions are mirrored onto the
//! document as marker attributes plus visual suppression.

pub mod tracker;

pub use tracker::{Applied, StateTracker};
