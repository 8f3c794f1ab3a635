use notehide_core::config::DetectionConfig;
use notehide_core::models::{NodeHandle, SignalFamily, SignalMatch};
use notehide_core::traits::IHostDocument;

use super::patterns::identifier_names_note_feature;
use super::{query_lenient, SignalDetector};

/// A descendant whose machine-readable identifier names the note feature.
///
/// Checks every configured identifier attribute, so a rename of the attribute
/// itself on the host is still caught.
pub struct StructuralAttributeSignal {
    identifier_attributes: Vec<String>,
}

impl StructuralAttributeSignal {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            identifier_attributes: config.identifier_attributes.clone(),
        }
    }
}

impl SignalDetector for StructuralAttributeSignal {
    fn family(&self) -> SignalFamily {
        SignalFamily::StructuralAttribute
    }

    fn detect(&self, doc: &dyn IHostDocument, item: NodeHandle) -> SignalMatch {
        for attribute in &self.identifier_attributes {
            for node in query_lenient(doc, item, &format!("[{attribute}]")) {
                let Some(value) = doc.attribute(node, attribute) else {
                    continue;
                };
                if identifier_names_note_feature(&value) {
                    return SignalMatch::hit(format!("{attribute}={value}"));
                }
            }
        }
        SignalMatch::miss()
    }
}
