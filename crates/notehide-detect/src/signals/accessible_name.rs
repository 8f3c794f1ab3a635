use notehide_core::models::{NodeHandle, SignalFamily, SignalMatch};
use notehide_core::traits::IHostDocument;

use super::patterns::{COMMUNITY_ORIGIN, NOTE_KEYWORD};
use super::{query_lenient, SignalDetector};

/// Icon and image roles first, then any labelled element.
const LABELLED_SELECTORS: &[&str] = &[
    "svg[aria-label]",
    r#"[role="img"][aria-label]"#,
    "[aria-label]",
];

/// Accessible-name text carrying both a note/context keyword and a
/// community-origin phrase. Either alone matches unrelated icons.
pub struct AccessibleNameSignal;

impl AccessibleNameSignal {
    pub fn label_names_community_note(label: &str) -> bool {
        NOTE_KEYWORD.is_match(label) && COMMUNITY_ORIGIN.is_match(label)
    }
}

impl SignalDetector for AccessibleNameSignal {
    fn family(&self) -> SignalFamily {
        SignalFamily::AccessibleName
    }

    fn detect(&self, doc: &dyn IHostDocument, item: NodeHandle) -> SignalMatch {
        for selector in LABELLED_SELECTORS {
            for node in query_lenient(doc, item, selector) {
                let label = doc.attribute(node, "aria-label").unwrap_or_default();
                if Self::label_names_community_note(&label) {
                    return SignalMatch::hit(label);
                }
            }
        }
        SignalMatch::miss()
    }
}
