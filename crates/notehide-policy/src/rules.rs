//! Policy rules in evaluation order.
//!
//! disabled → whitelisted → proposed note → filtered by rating → confirmed note.
//! Anything left over falls through to "show".

use notehide_core::models::{
    AccountId, Classification, ClassificationResult, DecisionRule, NoteRating, NoteTypeFilter,
    Settings,
};

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct PolicyInput<'a> {
    pub classification: &'a ClassificationResult,
    pub account: Option<&'a AccountId>,
    pub settings: &'a Settings,
}

/// Rules that can settle a decision, in priority order.
pub const ORDERED_RULES: [DecisionRule; 5] = [
    DecisionRule::Disabled,
    DecisionRule::Whitelisted,
    DecisionRule::ProposedNote,
    DecisionRule::FilteredByRating,
    DecisionRule::ConfirmedNote,
];

/// `Some(hide)` when `rule` settles the decision for `input`.
pub fn evaluate(rule: DecisionRule, input: &PolicyInput<'_>) -> Option<bool> {
    match rule {
        DecisionRule::Disabled => (!input.settings.enabled).then_some(false),
        DecisionRule::Whitelisted => input
            .account
            .is_some_and(|account| input.settings.is_whitelisted(account))
            .then_some(false),
        DecisionRule::ProposedNote => (input.classification.classification
            == Classification::Proposed
            && input.settings.hide_proposed_notes)
            .then_some(true),
        DecisionRule::FilteredByRating => (input.classification.classification
            == Classification::Confirmed
            && rating_excluded(input.settings.note_type_filter, input.classification.rating))
        .then_some(false),
        DecisionRule::ConfirmedNote => {
            (input.classification.classification == Classification::Confirmed).then_some(true)
        }
        DecisionRule::Fallthrough => Some(false),
    }
}

/// With the "helpful only" filter, notes rated anything but helpful stay visible.
/// An unknown rating never excludes.
pub fn rating_excluded(filter: NoteTypeFilter, rating: Option<NoteRating>) -> bool {
    filter == NoteTypeFilter::Helpful
        && matches!(
            rating,
            Some(NoteRating::NotHelpful | NoteRating::NeedsMoreRatings)
        )
}
