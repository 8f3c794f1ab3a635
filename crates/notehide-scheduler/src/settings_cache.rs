//! The settings cache is the pipeline's only shared mutable resource.

use std::sync::{Arc, RwLock};

use notehide_core::models::Settings;

/// One loaded settings value. Replaced wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSnapshot {
    /// Increments on every replacement, starting at 1.
    pub version: u64,
    pub settings: Settings,
}

/// Readers see either the previous or the next snapshot, never a mix.
/// Empty until the first successful load.
#[derive(Debug, Default)]
pub struct SettingsCache {
    current: RwLock<Option<Arc<SettingsSnapshot>>>,
}

impl SettingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, `None` while settings are pending.
    pub fn load(&self) -> Option<Arc<SettingsSnapshot>> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    pub fn is_loaded(&self) -> bool {
        self.load().is_some()
    }

    /// Swap in new settings. Returns the new version.
    pub fn replace(&self, settings: Settings) -> u64 {
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let version = guard.as_ref().map_or(1, |s| s.version + 1);
        *guard = Some(Arc::new(SettingsSnapshot { version, settings }));
        version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_until_first_replace() {
        let cache = SettingsCache::new();
        assert!(cache.load().is_none());
        assert_eq!(cache.replace(Settings::default()), 1);
        assert!(cache.is_loaded());
    }

    #[test]
    fn held_snapshot_survives_replacement() {
        let cache = SettingsCache::new();
        cache.replace(Settings::default());
        let old = cache.load().unwrap();
        let version = cache.replace(Settings {
            enabled: false,
            ..Settings::default()
        });
        assert_eq!(version, 2);
        assert!(old.settings.enabled);
        assert!(!cache.load().unwrap().settings.enabled);
    }
}
