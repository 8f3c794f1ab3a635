//! Contracts the pipeline consumes from its host.

mod clock;
mod document;
mod settings_store;

pub use clock::{IClock, SystemClock};
pub use document::IHostDocument;
pub use settings_store::{ISettingsStore, SettingsListener};
