use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-item processing state. Created all-false the first time an item is observed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemState {
    /// Claimed by a pass. Set before any classification side effect.
    pub seen: bool,
    /// When the last decision was applied. `None` means stale.
    pub last_checked_at: Option<DateTime<Utc>>,
    pub hidden: bool,
    /// Short-window rechecks consumed since the last reset.
    pub recheck_count: u32,
}

/// Scheduler-level view of an item's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemPhase {
    Unseen,
    /// Claimed, decision not applied yet.
    Checked,
    Hidden,
    Visible,
}

impl ItemState {
    pub fn phase(&self) -> ItemPhase {
        if self.hidden {
            ItemPhase::Hidden
        } else if !self.seen {
            ItemPhase::Unseen
        } else if self.last_checked_at.is_none() {
            ItemPhase::Checked
        } else {
            ItemPhase::Visible
        }
    }

    /// Milliseconds since the last check, or `None` when stale.
    pub fn age_ms(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_checked_at
            .map(|at| (now - at).num_milliseconds().max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_unseen() {
        assert_eq!(ItemState::default().phase(), ItemPhase::Unseen);
    }

    #[test]
    fn hidden_wins_over_seen_flags() {
        let state = ItemState {
            seen: false,
            last_checked_at: None,
            hidden: true,
            recheck_count: 0,
        };
        assert_eq!(state.phase(), ItemPhase::Hidden);
    }

    #[test]
    fn claimed_without_timestamp_is_checked() {
        let state = ItemState {
            seen: true,
            ..Default::default()
        };
        assert_eq!(state.phase(), ItemPhase::Checked);
        let visible = ItemState {
            last_checked_at: Some(Utc::now()),
            ..state
        };
        assert_eq!(visible.phase(), ItemPhase::Visible);
    }
}
