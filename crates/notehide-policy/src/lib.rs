//! # notehide-policy
//!
//! Turns a classification, a resolved author, and the current settings into a
//! show/hide decision. Rules are evaluated in a fixed order and the first one
//! that applies settles the decision. Pure: no document access, no state.

pub mod engine;
pub mod rules;

pub use engine::PolicyEngine;
pub use rules::PolicyInput;
