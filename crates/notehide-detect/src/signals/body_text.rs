use notehide_core::models::{NodeHandle, SignalFamily, SignalMatch};
use notehide_core::traits::IHostDocument;

use super::patterns::BODY_TEXT_PATTERNS;
use super::{collapse_whitespace, SignalDetector};

/// Flattened item text against the phrases the host renders for notes.
pub struct BodyTextSignal;

impl BodyTextSignal {
    /// First matching phrase in `text`, if any.
    pub fn match_text(text: &str) -> Option<String> {
        let text = collapse_whitespace(text);
        BODY_TEXT_PATTERNS
            .iter()
            .find_map(|p| p.find(&text).map(|m| m.as_str().to_string()))
    }
}

impl SignalDetector for BodyTextSignal {
    fn family(&self) -> SignalFamily {
        SignalFamily::BodyText
    }

    fn detect(&self, doc: &dyn IHostDocument, item: NodeHandle) -> SignalMatch {
        match Self::match_text(&doc.text_content(item)) {
            Some(phrase) => SignalMatch::hit(phrase),
            None => SignalMatch::miss(),
        }
    }
}
