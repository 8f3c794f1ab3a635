//! # notehide-core
//!
//! Foundation crate for the note-hiding pipeline.
//! Defines the data model, the host-facing traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::NotehideConfig;
pub use errors::{NotehideError, NotehideResult};
pub use models::{
    AccountId, Classification, ClassificationResult, Decision, DecisionRule, ItemState,
    NodeHandle, NoteTypeFilter, Settings, SettingsPatch, SignalFamily, SignalMatch,
};
