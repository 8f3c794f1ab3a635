//! MemorySettingsStore: per-scope JSON maps with change listeners.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use notehide_core::constants::keys;
use notehide_core::errors::{NotehideResult, SettingsError};
use notehide_core::models::{Settings, SettingsChange, SettingsPatch, StorageScope};
use notehide_core::traits::{ISettingsStore, SettingsListener};
use serde_json::{Map, Value};
use tracing::{debug, warn};

type ScopeMap = Map<String, Value>;

/// Settings store kept in memory, shaped like the browser's storage areas.
///
/// Values are stored as raw JSON so a key written with the wrong type is
/// representable; `get` falls back to the default for such keys.
pub struct MemorySettingsStore {
    scopes: RwLock<HashMap<StorageScope, ScopeMap>>,
    listeners: RwLock<Vec<SettingsListener>>,
    fail_next_get: AtomicBool,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self {
            scopes: RwLock::new(HashMap::new()),
            listeners: RwLock::new(Vec::new()),
            fail_next_get: AtomicBool::new(false),
        }
    }

    /// A store whose sync scope already holds `settings`.
    pub fn with_settings(settings: &Settings) -> NotehideResult<Self> {
        let store = Self::new();
        let Value::Object(map) = serde_json::to_value(settings)? else {
            return Err(SettingsError::WriteFailed {
                reason: "settings did not serialize to an object".to_string(),
            }
            .into());
        };
        store
            .lock_scopes()?
            .entry(StorageScope::Sync)
            .or_default()
            .extend(map);
        Ok(store)
    }

    /// Make the next `get` fail, as a storage backend outage would.
    pub fn fail_next_get(&self) {
        self.fail_next_get.store(true, Ordering::SeqCst);
    }

    /// Write a patch into an arbitrary scope and notify listeners.
    pub fn set_in_scope(&self, scope: StorageScope, patch: &SettingsPatch) -> NotehideResult<()> {
        let Value::Object(entries) = serde_json::to_value(patch)? else {
            return Err(SettingsError::WriteFailed {
                reason: "patch did not serialize to an object".to_string(),
            }
            .into());
        };
        self.write_entries(scope, entries)
    }

    /// Store a raw value under `key`, bypassing typing. Notifies listeners.
    pub fn set_raw(&self, scope: StorageScope, key: &str, value: Value) -> NotehideResult<()> {
        let mut entries = Map::new();
        entries.insert(key.to_string(), value);
        self.write_entries(scope, entries)
    }

    /// Raw stored value, if any.
    pub fn raw(&self, scope: StorageScope, key: &str) -> Option<Value> {
        let scopes = self.scopes.read().ok()?;
        scopes.get(&scope)?.get(key).cloned()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().map(|l| l.len()).unwrap_or(0)
    }

    fn lock_scopes(
        &self,
    ) -> NotehideResult<std::sync::RwLockWriteGuard<'_, HashMap<StorageScope, ScopeMap>>> {
        Ok(self.scopes.write().map_err(|_| SettingsError::WriteFailed {
            reason: "settings lock poisoned".to_string(),
        })?)
    }

    fn write_entries(&self, scope: StorageScope, entries: ScopeMap) -> NotehideResult<()> {
        let changed_keys: Vec<String> = {
            let mut scopes = self.lock_scopes()?;
            let stored = scopes.entry(scope).or_default();
            entries
                .into_iter()
                .filter_map(|(key, value)| {
                    let previous = stored.insert(key.clone(), value.clone());
                    (previous.as_ref() != Some(&value)).then_some(key)
                })
                .collect()
        };

        if changed_keys.is_empty() {
            return Ok(());
        }
        debug!(scope = scope.as_str(), keys = ?changed_keys, "settings changed");
        let change = SettingsChange {
            changed_keys,
            scope,
        };
        let listeners = self.listeners.read().map_err(|_| SettingsError::WriteFailed {
            reason: "listener lock poisoned".to_string(),
        })?;
        for listener in listeners.iter() {
            listener(&change);
        }
        Ok(())
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ISettingsStore for MemorySettingsStore {
    fn get(&self, defaults: &Settings) -> NotehideResult<Settings> {
        if self.fail_next_get.swap(false, Ordering::SeqCst) {
            return Err(SettingsError::LoadFailed {
                reason: "storage unavailable".to_string(),
            }
            .into());
        }

        let stored = {
            let scopes = self.scopes.read().map_err(|_| SettingsError::LoadFailed {
                reason: "settings lock poisoned".to_string(),
            })?;
            scopes.get(&StorageScope::Sync).cloned().unwrap_or_default()
        };

        let mut merged = serde_json::to_value(defaults)?;
        for key in keys::ALL {
            let Some(value) = stored.get(key) else {
                continue;
            };
            let mut candidate = merged.clone();
            if let Value::Object(fields) = &mut candidate {
                fields.insert(key.to_string(), value.clone());
            }
            if serde_json::from_value::<Settings>(candidate.clone()).is_ok() {
                merged = candidate;
            } else {
                warn!(key, %value, "ignoring ill-typed stored setting");
            }
        }
        Ok(serde_json::from_value(merged)?)
    }

    fn set(&self, patch: &SettingsPatch) -> NotehideResult<()> {
        self.set_in_scope(StorageScope::Sync, patch)
    }

    fn subscribe(&self, listener: SettingsListener) {
        match self.listeners.write() {
            Ok(mut listeners) => listeners.push(listener),
            Err(_) => warn!("listener lock poisoned, subscription dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_yields_defaults() {
        let store = MemorySettingsStore::new();
        assert_eq!(store.get(&Settings::default()).unwrap(), Settings::default());
    }

    #[test]
    fn fail_next_get_fails_once() {
        let store = MemorySettingsStore::new();
        store.fail_next_get();
        assert!(store.get(&Settings::default()).is_err());
        assert!(store.get(&Settings::default()).is_ok());
    }
}
