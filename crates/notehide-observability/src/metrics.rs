//! Pipeline counters.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use notehide_core::errors::NotehideResult;
use notehide_core::models::{ClassificationResult, SignalFamily};
use serde::{Deserialize, Serialize};

/// Running totals since the pipeline started (or since the last reset).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineMetrics {
    /// Passes run, keyed by pass kind.
    pub passes: BTreeMap<String, u64>,
    /// Passes dropped because settings had not loaded yet.
    pub passes_deferred: u64,
    pub items_examined: u64,
    pub items_classified: u64,
    /// Items skipped because another pass had already claimed them.
    pub items_skipped: u64,
    pub notes_detected: BTreeMap<SignalFamily, u64>,
    pub hides: u64,
    pub unhides: u64,
    pub entries_pruned: u64,
    pub last_pass_at: Option<DateTime<Utc>>,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pass(&mut self, kind: &str, at: DateTime<Utc>) {
        *self.passes.entry(kind.to_string()).or_insert(0) += 1;
        self.last_pass_at = Some(at);
    }

    pub fn record_deferred(&mut self) {
        self.passes_deferred += 1;
    }

    pub fn record_examined(&mut self, count: usize) {
        self.items_examined += count as u64;
    }

    pub fn record_skipped(&mut self) {
        self.items_skipped += 1;
    }

    pub fn record_classification(&mut self, result: &ClassificationResult) {
        self.items_classified += 1;
        if let Some(family) = result.signal.filter(|_| result.is_note()) {
            *self.notes_detected.entry(family).or_insert(0) += 1;
        }
    }

    pub fn record_hide(&mut self) {
        self.hides += 1;
    }

    pub fn record_unhide(&mut self) {
        self.unhides += 1;
    }

    pub fn record_pruned(&mut self, count: usize) {
        self.entries_pruned += count as u64;
    }

    /// Passes of one kind.
    pub fn passes_of(&self, kind: &str) -> u64 {
        self.passes.get(kind).copied().unwrap_or(0)
    }

    pub fn total_notes(&self) -> u64 {
        self.notes_detected.values().sum()
    }

    /// JSON snapshot for diagnostics surfaces.
    pub fn to_json(&self) -> NotehideResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
