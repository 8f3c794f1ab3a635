use crate::errors::NotehideResult;
use crate::models::{Settings, SettingsChange, SettingsPatch};

/// Callback invoked on every store write.
pub type SettingsListener = Box<dyn Fn(&SettingsChange) + Send + Sync>;

/// Persisted key-value settings store. The pipeline only reads from it.
pub trait ISettingsStore: Send + Sync {
    /// Persisted values merged over `defaults` for missing keys.
    fn get(&self, defaults: &Settings) -> NotehideResult<Settings>;

    /// Write the keys present in `patch`.
    fn set(&self, patch: &SettingsPatch) -> NotehideResult<()>;

    /// Register a change listener.
    fn subscribe(&self, listener: SettingsListener);
}
