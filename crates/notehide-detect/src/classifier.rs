//! Note classifier: runs the detector families in priority order.

use notehide_core::config::DetectionConfig;
use notehide_core::models::{ClassificationResult, NodeHandle, SignalFamily, SignalMatch};
use notehide_core::traits::IHostDocument;
use tracing::{debug, trace};

use crate::signals::{
    AccessibleNameSignal, BodyTextSignal, GenericSweepSignal, OutboundLinkSignal,
    ProposedNoteSignal, SignalDetector, StructuralAttributeSignal,
};

/// Classifies feed items as confirmed note, proposed note, or neither.
///
/// The proposed-note detector runs first: a rating prompt under a note that
/// also carries note identifiers must still be reported as proposed. After
/// that, the first confirmed family to match wins.
pub struct Classifier {
    proposed: Box<dyn SignalDetector>,
    confirmed: Vec<Box<dyn SignalDetector>>,
}

impl Classifier {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            proposed: Box::new(ProposedNoteSignal),
            confirmed: vec![
                Box::new(StructuralAttributeSignal::new(config)),
                Box::new(AccessibleNameSignal),
                Box::new(BodyTextSignal),
                Box::new(OutboundLinkSignal),
                Box::new(GenericSweepSignal::new(config)),
            ],
        }
    }

    /// Build from explicit detectors. `confirmed` is evaluated in the given order.
    pub fn with_detectors(
        proposed: Box<dyn SignalDetector>,
        confirmed: Vec<Box<dyn SignalDetector>>,
    ) -> Self {
        Self {
            proposed,
            confirmed,
        }
    }

    /// Classify one item against its current content.
    pub fn classify(&self, doc: &dyn IHostDocument, item: NodeHandle) -> ClassificationResult {
        if !doc.contains(item) {
            trace!(%item, "item detached, skipping classification");
            return ClassificationResult::none();
        }

        let proposed = self.proposed.detect(doc, item);
        if proposed.matched {
            debug!(%item, evidence = ?proposed.evidence, "proposed note detected");
            return ClassificationResult::proposed(proposed.evidence);
        }

        for detector in &self.confirmed {
            let signal = detector.detect(doc, item);
            if signal.matched {
                let family = detector.family();
                debug!(%item, family = %family, evidence = ?signal.evidence, "community note detected");
                return ClassificationResult::confirmed(family, signal.evidence);
            }
        }

        ClassificationResult::none()
    }

    /// Every detector's outcome, for diagnostics. Does not short-circuit.
    pub fn explain(
        &self,
        doc: &dyn IHostDocument,
        item: NodeHandle,
    ) -> Vec<(SignalFamily, SignalMatch)> {
        std::iter::once(&self.proposed)
            .chain(self.confirmed.iter())
            .map(|d| (d.family(), d.detect(doc, item)))
            .collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&DetectionConfig::default())
    }
}
