//! PolicyEngine: first applicable rule wins.

use notehide_core::models::{AccountId, ClassificationResult, Decision, DecisionRule, NodeHandle, Settings};
use tracing::trace;

use crate::rules::{self, PolicyInput};

/// Stateless decision engine.
pub struct PolicyEngine;

impl PolicyEngine {
    /// Decide whether `item` is hidden.
    ///
    /// `item` is only used for diagnostics; the decision is a pure function of
    /// the other arguments.
    pub fn decide(
        item: NodeHandle,
        classification: &ClassificationResult,
        account: Option<&AccountId>,
        settings: &Settings,
    ) -> Decision {
        let input = PolicyInput {
            classification,
            account,
            settings,
        };

        let decision = rules::ORDERED_RULES
            .iter()
            .find_map(|rule| rules::evaluate(*rule, &input).map(|hide| Decision { hide, rule: *rule }))
            .unwrap_or_else(|| Decision::show(DecisionRule::Fallthrough));

        trace!(
            %item,
            classification = ?classification.classification,
            account = account.map(AccountId::as_str),
            hide = decision.hide,
            rule = ?decision.rule,
            "policy decision"
        );
        decision
    }
}
