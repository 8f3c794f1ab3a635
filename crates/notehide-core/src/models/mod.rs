//! Data model shared by every pipeline stage.

pub mod account;
pub mod classification;
pub mod decision;
pub mod item_state;
pub mod mutation;
pub mod node;
pub mod settings;
pub mod signal;

pub use account::AccountId;
pub use classification::{Classification, ClassificationResult, NoteRating};
pub use decision::{Decision, DecisionRule};
pub use item_state::{ItemPhase, ItemState};
pub use mutation::{MutationKind, MutationRecord, ObserverOptions};
pub use node::NodeHandle;
pub use settings::{NoteTypeFilter, Settings, SettingsChange, SettingsPatch, StorageScope};
pub use signal::{SignalFamily, SignalMatch};
