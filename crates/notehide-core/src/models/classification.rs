use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::signal::SignalFamily;

/// Verdict for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    None,
    Confirmed,
    Proposed,
}

/// Community rating outcome of a confirmed note, when the host exposes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NoteRating {
    Helpful,
    NotHelpful,
    NeedsMoreRatings,
}

/// Classifier output. Ephemeral: recomputed on every pass, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClassificationResult {
    pub classification: Classification,
    /// Family that produced the verdict.
    pub signal: Option<SignalFamily>,
    /// Matched attribute, label, text or href, for diagnostics.
    pub evidence: Option<String>,
    /// Always `None` until the host markup exposes a rating outcome.
    pub rating: Option<NoteRating>,
}

impl ClassificationResult {
    pub fn none() -> Self {
        Self {
            classification: Classification::None,
            signal: None,
            evidence: None,
            rating: None,
        }
    }

    pub fn confirmed(signal: SignalFamily, evidence: Option<String>) -> Self {
        Self {
            classification: Classification::Confirmed,
            signal: Some(signal),
            evidence,
            rating: None,
        }
    }

    pub fn proposed(evidence: Option<String>) -> Self {
        Self {
            classification: Classification::Proposed,
            signal: Some(SignalFamily::RatingControls),
            evidence,
            rating: None,
        }
    }

    pub fn with_rating(mut self, rating: NoteRating) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn is_note(&self) -> bool {
        self.classification != Classification::None
    }
}
