use notehide_core::config::DetectionConfig;
use notehide_core::models::{NodeHandle, SignalFamily, SignalMatch};
use notehide_core::traits::IHostDocument;

use super::patterns::NOTE_KEYWORD_PAIR;
use super::{collapse_whitespace, query_lenient, SignalDetector};

/// Fallback sweep over every element carrying an identifier attribute.
///
/// Double verification: the identifier itself must mention note/community,
/// and identifier + text + accessible name together must hit a keyword pair.
pub struct GenericSweepSignal {
    identifier_attributes: Vec<String>,
}

impl GenericSweepSignal {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            identifier_attributes: config.identifier_attributes.clone(),
        }
    }

    fn verify(identifier: &str, text: &str, label: &str) -> bool {
        let lower = identifier.to_ascii_lowercase();
        if !(lower.contains("note") || lower.contains("community")) {
            return false;
        }
        let combined = collapse_whitespace(&format!("{identifier} {text} {label}"));
        NOTE_KEYWORD_PAIR.is_match(&combined)
    }
}

impl SignalDetector for GenericSweepSignal {
    fn family(&self) -> SignalFamily {
        SignalFamily::GenericSweep
    }

    fn detect(&self, doc: &dyn IHostDocument, item: NodeHandle) -> SignalMatch {
        for attribute in &self.identifier_attributes {
            for node in query_lenient(doc, item, &format!("[{attribute}]")) {
                let Some(identifier) = doc.attribute(node, attribute) else {
                    continue;
                };
                let text = doc.text_content(node);
                let label = doc.attribute(node, "aria-label").unwrap_or_default();
                if Self::verify(&identifier, &text, &label) {
                    return SignalMatch::hit(format!("{attribute}={identifier}"));
                }
            }
        }
        SignalMatch::miss()
    }
}
