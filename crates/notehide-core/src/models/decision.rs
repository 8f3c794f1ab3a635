use serde::{Deserialize, Serialize};

/// Which policy rule settled the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    /// The pipeline is globally disabled.
    Disabled,
    /// The item's account is whitelisted.
    Whitelisted,
    /// Proposed note while proposed notes are hidden.
    ProposedNote,
    /// Confirmed note.
    ConfirmedNote,
    /// Confirmed note whose rating is excluded by the note type filter.
    FilteredByRating,
    /// Nothing decisive matched.
    Fallthrough,
}

/// Final show/hide decision for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub hide: bool,
    pub rule: DecisionRule,
}

impl Decision {
    pub fn show(rule: DecisionRule) -> Self {
        Self { hide: false, rule }
    }

    pub fn hide(rule: DecisionRule) -> Self {
        Self { hide: true, rule }
    }
}
