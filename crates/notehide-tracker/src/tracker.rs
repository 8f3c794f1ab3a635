//! StateTracker: concurrent per-item state via DashMap.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use notehide_core::config::MarkerConfig;
use notehide_core::errors::NotehideResult;
use notehide_core::models::{Decision, ItemState, NodeHandle};
use notehide_core::traits::IHostDocument;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

const MARKER_VALUE: &str = "true";

/// Visible effect of applying a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Applied {
    Hidden,
    Unhidden,
    Unchanged,
}

/// Per-item state keyed by node handle.
///
/// Entries for removed nodes are harmless (their handles never alias a live
/// node) and are dropped by [`StateTracker::prune`].
pub struct StateTracker {
    items: Arc<DashMap<NodeHandle, ItemState>>,
    markers: MarkerConfig,
}

impl StateTracker {
    pub fn new(markers: MarkerConfig) -> Self {
        Self {
            items: Arc::new(DashMap::new()),
            markers,
        }
    }

    /// Claim `item` for processing. Returns false when it is already claimed
    /// or no longer in the document.
    ///
    /// The check and the flag write happen under the entry lock, before any
    /// document side effect.
    pub fn try_claim(&self, doc: &mut dyn IHostDocument, item: NodeHandle) -> bool {
        if !doc.contains(item) {
            return false;
        }
        {
            let mut state = self.items.entry(item).or_default();
            if state.seen {
                return false;
            }
            state.seen = true;
        }
        if let Err(e) = doc.set_attribute(item, &self.markers.seen_attribute, MARKER_VALUE) {
            debug!(%item, error = %e, "could not mirror seen marker");
        }
        true
    }

    /// Apply `decision` and record the check time.
    ///
    /// Visibility is only touched when it changes. The document is written
    /// before the state is committed, so a failed write leaves the item as it
    /// was. `last_checked_at` never moves backwards.
    pub fn apply(
        &self,
        doc: &mut dyn IHostDocument,
        item: NodeHandle,
        decision: &Decision,
        now: DateTime<Utc>,
    ) -> NotehideResult<Applied> {
        let was_hidden = self.items.get(&item).is_some_and(|state| state.hidden);

        let applied = match (was_hidden, decision.hide) {
            (false, true) => {
                doc.set_attribute(item, &self.markers.hidden_attribute, MARKER_VALUE)?;
                doc.set_hidden(item, true)?;
                Applied::Hidden
            }
            (true, false) => {
                doc.remove_attribute(item, &self.markers.hidden_attribute)?;
                doc.set_hidden(item, false)?;
                Applied::Unhidden
            }
            _ => Applied::Unchanged,
        };

        {
            let mut state = self.items.entry(item).or_default();
            state.seen = true;
            state.hidden = decision.hide;
            state.last_checked_at = Some(match state.last_checked_at {
                Some(prev) if prev > now => prev,
                _ => now,
            });
        }
        trace!(%item, hide = decision.hide, rule = ?decision.rule, ?applied, "decision applied");
        Ok(applied)
    }

    /// Clear seen and timing so the item goes back through the initial sweep.
    /// The hidden marker survives unless `unhide` is set.
    pub fn reset(
        &self,
        doc: &mut dyn IHostDocument,
        item: NodeHandle,
        unhide: bool,
    ) -> NotehideResult<()> {
        let Some(hidden) = self.items.get(&item).map(|state| state.hidden) else {
            return Ok(());
        };
        let unhidden = unhide && hidden;

        doc.remove_attribute(item, &self.markers.seen_attribute)?;
        if unhidden {
            doc.remove_attribute(item, &self.markers.hidden_attribute)?;
            doc.set_hidden(item, false)?;
        }

        if let Some(mut state) = self.items.get_mut(&item) {
            state.seen = false;
            state.last_checked_at = None;
            state.recheck_count = 0;
            if unhidden {
                state.hidden = false;
            }
        }
        Ok(())
    }

    /// Forget the check time, making the item due for reclassification.
    pub fn mark_stale(&self, item: NodeHandle) {
        if let Some(mut state) = self.items.get_mut(&item) {
            state.last_checked_at = None;
            state.recheck_count = 0;
        }
    }

    /// Count one short-window recheck. Returns the new count.
    pub fn record_recheck(&self, item: NodeHandle) -> u32 {
        let mut state = self.items.entry(item).or_default();
        state.recheck_count = state.recheck_count.saturating_add(1);
        state.recheck_count
    }

    /// Snapshot of one item's state.
    pub fn state(&self, item: NodeHandle) -> Option<ItemState> {
        self.items.get(&item).map(|r| r.clone())
    }

    /// All tracked handles, in handle order.
    pub fn tracked(&self) -> Vec<NodeHandle> {
        let mut handles: Vec<_> = self.items.iter().map(|r| *r.key()).collect();
        handles.sort();
        handles
    }

    /// Tracked handles whose state satisfies `predicate`, in handle order.
    pub fn select(&self, predicate: impl Fn(&ItemState) -> bool) -> Vec<NodeHandle> {
        let mut handles: Vec<_> = self
            .items
            .iter()
            .filter(|r| predicate(r.value()))
            .map(|r| *r.key())
            .collect();
        handles.sort();
        handles
    }

    /// Drop entries for nodes no longer in the document. Returns how many.
    pub fn prune(&self, doc: &dyn IHostDocument) -> usize {
        let before = self.items.len();
        self.items.retain(|item, _| doc.contains(*item));
        let pruned = before.saturating_sub(self.items.len());
        if pruned > 0 {
            debug!(pruned, "pruned detached items");
        }
        pruned
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn markers(&self) -> &MarkerConfig {
        &self.markers
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new(MarkerConfig::default())
    }
}
