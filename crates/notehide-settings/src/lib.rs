//! # notehide-settings
//!
//! A scoped key-value settings store honoring the
//! [`ISettingsStore`](notehide_core::traits::ISettingsStore) contract, and the
//! whitelist editing operations the options surface performs against it.

pub mod store;
pub mod whitelist;

pub use store::MemorySettingsStore;
pub use whitelist::{add_to_whitelist, normalize_handle, remove_from_whitelist};
