use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Detector families, in confirmed-note priority order, plus the rating-control
/// family used for proposed notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SignalFamily {
    StructuralAttribute,
    AccessibleName,
    BodyText,
    OutboundLink,
    GenericSweep,
    RatingControls,
}

impl SignalFamily {
    /// Confirmed-note families in evaluation order.
    pub const CONFIRMED_ORDER: [SignalFamily; 5] = [
        SignalFamily::StructuralAttribute,
        SignalFamily::AccessibleName,
        SignalFamily::BodyText,
        SignalFamily::OutboundLink,
        SignalFamily::GenericSweep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructuralAttribute => "structural_attribute",
            Self::AccessibleName => "accessible_name",
            Self::BodyText => "body_text",
            Self::OutboundLink => "outbound_link",
            Self::GenericSweep => "generic_sweep",
            Self::RatingControls => "rating_controls",
        }
    }
}

impl fmt::Display for SignalFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one detector against one item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalMatch {
    pub matched: bool,
    /// The attribute value, label, text or href that triggered the match.
    pub evidence: Option<String>,
}

impl SignalMatch {
    pub fn miss() -> Self {
        Self::default()
    }

    pub fn hit(evidence: impl Into<String>) -> Self {
        Self {
            matched: true,
            evidence: Some(evidence.into()),
        }
    }
}
