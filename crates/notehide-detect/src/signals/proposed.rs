use notehide_core::models::{NodeHandle, SignalFamily, SignalMatch};
use notehide_core::traits::IHostDocument;

use super::patterns::{HELPFUL_LABEL, NOT_HELPFUL_LABEL, RATING_CONTEXT};
use super::{collapse_whitespace, query_lenient, SignalDetector};

const RATING_CONTROL_SELECTOR: &str = r#"button, [role="button"], [role="radio"]"#;

/// Both controls must share an ancestor at most this many levels above each.
const MAX_ADJACENCY_DEPTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RatingLabel {
    Helpful,
    NotHelpful,
}

/// A note still under community rating.
///
/// Requires an adjacent "Helpful" / "Not helpful" control pair AND a
/// note/context/rating keyword in the item text. The same controls are reused
/// elsewhere on the host, so neither condition is sufficient alone.
pub struct ProposedNoteSignal;

impl ProposedNoteSignal {
    fn rating_label(label: &str) -> Option<RatingLabel> {
        if NOT_HELPFUL_LABEL.is_match(label) {
            Some(RatingLabel::NotHelpful)
        } else if HELPFUL_LABEL.is_match(label) {
            Some(RatingLabel::Helpful)
        } else {
            None
        }
    }

    fn control_label(doc: &dyn IHostDocument, control: NodeHandle) -> String {
        doc.attribute(control, "aria-label")
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| doc.text_content(control))
            .trim()
            .to_string()
    }

    /// Ancestors of `node` from its parent up to and including `item`.
    fn ancestors(doc: &dyn IHostDocument, node: NodeHandle, item: NodeHandle) -> Vec<NodeHandle> {
        let mut chain = Vec::new();
        let mut current = doc.parent(node);
        while let Some(parent) = current {
            chain.push(parent);
            if parent == item {
                break;
            }
            current = doc.parent(parent);
        }
        chain
    }

    fn adjacent(doc: &dyn IHostDocument, a: NodeHandle, b: NodeHandle, item: NodeHandle) -> bool {
        let a_chain = Self::ancestors(doc, a, item);
        let b_chain = Self::ancestors(doc, b, item);
        a_chain
            .iter()
            .take(MAX_ADJACENCY_DEPTH)
            .any(|anc| {
                b_chain
                    .iter()
                    .take(MAX_ADJACENCY_DEPTH)
                    .any(|other| other == anc)
            })
    }
}

impl SignalDetector for ProposedNoteSignal {
    fn family(&self) -> SignalFamily {
        SignalFamily::RatingControls
    }

    fn detect(&self, doc: &dyn IHostDocument, item: NodeHandle) -> SignalMatch {
        let mut helpful = Vec::new();
        let mut not_helpful = Vec::new();
        for control in query_lenient(doc, item, RATING_CONTROL_SELECTOR) {
            let label = collapse_whitespace(&Self::control_label(doc, control));
            match Self::rating_label(&label) {
                Some(RatingLabel::Helpful) => helpful.push((control, label)),
                Some(RatingLabel::NotHelpful) => not_helpful.push((control, label)),
                None => {}
            }
        }

        let pair = helpful.iter().find_map(|(h, h_label)| {
            not_helpful
                .iter()
                .find(|(n, _)| Self::adjacent(doc, *h, *n, item))
                .map(|(_, n_label)| format!("{h_label} | {n_label}"))
        });
        let Some(evidence) = pair else {
            return SignalMatch::miss();
        };

        if RATING_CONTEXT.is_match(&doc.text_content(item)) {
            SignalMatch::hit(evidence)
        } else {
            SignalMatch::miss()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_classified_unambiguously() {
        assert_eq!(
            ProposedNoteSignal::rating_label("Helpful"),
            Some(RatingLabel::Helpful)
        );
        assert_eq!(
            ProposedNoteSignal::rating_label("Not helpful"),
            Some(RatingLabel::NotHelpful)
        );
        assert_eq!(
            ProposedNoteSignal::rating_label("NOT   HELPFUL"),
            Some(RatingLabel::NotHelpful)
        );
        assert_eq!(ProposedNoteSignal::rating_label("Unhelpful"), None);
        assert_eq!(ProposedNoteSignal::rating_label("Like"), None);
    }
}
