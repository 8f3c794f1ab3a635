//! Named one-shot timers keyed by purpose.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a timer exists. At most one deadline is pending per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Trailing edge of a mutation burst.
    Debounce,
    /// Second pass after a burst, for annotations that attach late.
    DelayedRecheck,
    /// The n-th follow-up sweep after start.
    InitialFollowUp(usize),
    /// Recurring short recheck window.
    ShortWindow,
    /// Recurring long sweep.
    LongPeriod,
}

#[derive(Debug, Default)]
pub struct TimerSet {
    deadlines: BTreeMap<TimerKind, DateTime<Utc>>,
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `kind` at `at`, replacing any pending deadline. Re-arming during a
    /// burst pushes the deadline out, so the burst collapses into one firing.
    pub fn arm(&mut self, kind: TimerKind, at: DateTime<Utc>) {
        self.deadlines.insert(kind, at);
    }

    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.deadlines.remove(&kind).is_some()
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<DateTime<Utc>> {
        self.deadlines.get(&kind).copied()
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.deadlines.contains_key(&kind)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.deadlines.values().min().copied()
    }

    /// Remove and return every timer due at `now`, earliest first.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<TimerKind> {
        let mut due: Vec<(DateTime<Utc>, TimerKind)> = self
            .deadlines
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(kind, at)| (*at, *kind))
            .collect();
        due.sort();
        for (_, kind) in &due {
            self.deadlines.remove(kind);
        }
        due.into_iter().map(|(_, kind)| kind).collect()
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
