//! Pass kinds and per-pass outcome.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which path selected a pass's candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    /// Unclaimed items. Claims each before processing.
    InitialSweep,
    /// Visible items inside the short recheck window.
    ShortRecheck,
    /// Every visible item, forced stale first.
    LongSweep,
    /// Items reset by a settings change. Claims like the initial sweep.
    Reconcile,
}

impl PassKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InitialSweep => "initial_sweep",
            Self::ShortRecheck => "short_recheck",
            Self::LongSweep => "long_sweep",
            Self::Reconcile => "reconcile",
        }
    }

    /// Whether items must be claimed before processing.
    pub fn claims(&self) -> bool {
        matches!(self, Self::InitialSweep | Self::Reconcile)
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    pub kind: PassKind,
    /// Candidates handed to the pass.
    pub examined: usize,
    pub classified: usize,
    pub hidden: usize,
    pub unhidden: usize,
    /// Already claimed, detached, or failed to apply.
    pub skipped: usize,
    /// True when settings were pending and nothing ran.
    pub deferred: bool,
}

impl PassReport {
    pub fn new(kind: PassKind, examined: usize) -> Self {
        Self {
            kind,
            examined,
            classified: 0,
            hidden: 0,
            unhidden: 0,
            skipped: 0,
            deferred: false,
        }
    }

    pub fn deferred(kind: PassKind, examined: usize) -> Self {
        Self {
            deferred: true,
            ..Self::new(kind, examined)
        }
    }

    /// True when the pass changed any item's visibility.
    pub fn changed_visibility(&self) -> bool {
        self.hidden > 0 || self.unhidden > 0
    }
}
