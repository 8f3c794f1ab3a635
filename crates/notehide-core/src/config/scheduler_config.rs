use serde::{Deserialize, Serialize};

use super::defaults;

/// Timer windows driving when items are (re)classified. All values in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Quiet period that collapses a burst of mutations into one pass.
    pub debounce_ms: u64,
    /// Second pass after a mutation burst, for annotations that attach late.
    pub delayed_recheck_ms: u64,
    /// Extra sweeps after start, relative to the start time.
    pub initial_followups_ms: Vec<u64>,
    /// Period of the short recheck window timer.
    pub short_window_interval_ms: u64,
    /// A visible item must be at least this old to be rechecked.
    pub short_recheck_min_age_ms: u64,
    /// A visible item older than this is left to the long sweep.
    pub short_recheck_max_age_ms: u64,
    /// Extra passes the short window grants each item.
    pub max_short_rechecks: u32,
    /// Period of the forced-staleness safety-net sweep.
    pub long_period_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: defaults::DEFAULT_DEBOUNCE_MS,
            delayed_recheck_ms: defaults::DEFAULT_DELAYED_RECHECK_MS,
            initial_followups_ms: defaults::DEFAULT_INITIAL_FOLLOWUPS_MS.to_vec(),
            short_window_interval_ms: defaults::DEFAULT_SHORT_WINDOW_INTERVAL_MS,
            short_recheck_min_age_ms: defaults::DEFAULT_SHORT_RECHECK_MIN_AGE_MS,
            short_recheck_max_age_ms: defaults::DEFAULT_SHORT_RECHECK_MAX_AGE_MS,
            max_short_rechecks: defaults::DEFAULT_MAX_SHORT_RECHECKS,
            long_period_ms: defaults::DEFAULT_LONG_PERIOD_MS,
        }
    }
}
