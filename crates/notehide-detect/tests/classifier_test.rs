use notehide_core::config::DetectionConfig;
use notehide_core::models::{Classification, NodeHandle, SignalFamily, SignalMatch};
use notehide_core::traits::IHostDocument;
use notehide_detect::{Classifier, SignalDetector};
use notehide_dom::{el, MemoryDocument, NodeSpec};

fn tweet() -> NodeSpec {
    el("article").attr("data-testid", "tweet")
}

fn classify_one(spec: NodeSpec) -> notehide_core::ClassificationResult {
    let (doc, items) = MemoryDocument::from_specs(&[spec]).unwrap();
    Classifier::default().classify(&doc, items[0])
}

// ── Literal detection fixtures ───────────────────────────────────────────

#[test]
fn readers_added_context_is_confirmed() {
    let result = classify_one(tweet().text("Readers added context"));
    assert_eq!(result.classification, Classification::Confirmed);
    assert_eq!(result.signal, Some(SignalFamily::BodyText));
    assert_eq!(result.evidence.as_deref(), Some("Readers added context"));
}

#[test]
fn repost_label_is_not_a_note() {
    let result = classify_one(
        tweet()
            .child(el("span").attr("data-testid", "socialContext").text("Alice reposted"))
            .child(el("div").attr("data-testid", "tweetText").text("a picture of my cat")),
    );
    assert_eq!(result.classification, Classification::None);
    assert_eq!(result.signal, None);
}

#[test]
fn helpful_controls_with_community_text_is_proposed() {
    let result = classify_one(
        tweet()
            .child(el("div").text("Is this community note accurate? "))
            .child(
                el("div")
                    .child(el("button").text("Helpful"))
                    .child(el("button").text("Not helpful")),
            ),
    );
    assert_eq!(result.classification, Classification::Proposed);
    assert_eq!(result.signal, Some(SignalFamily::RatingControls));
    assert_eq!(result.evidence.as_deref(), Some("Helpful | Not helpful"));
}

#[test]
fn plain_item_is_none() {
    let result = classify_one(
        tweet().child(
            el("div")
                .attr("data-testid", "tweetText")
                .text("Nothing to see here"),
        ),
    );
    assert_eq!(result.classification, Classification::None);
    assert!(result.signal.is_none());
    assert!(!result.is_note());
}

// ── Priority ─────────────────────────────────────────────────────────────

#[test]
fn proposed_wins_over_confirmed_signals() {
    let result = classify_one(
        tweet()
            .child(el("div").attr("data-testid", "birdwatch-pivot").text("Rate it "))
            .child(
                el("div")
                    .child(el("button").attr("aria-label", "Helpful"))
                    .child(el("button").attr("aria-label", "Not helpful")),
            ),
    );
    assert_eq!(result.classification, Classification::Proposed);
}

#[test]
fn structural_wins_over_body_text() {
    let result = classify_one(
        tweet()
            .child(el("div").attr("data-testid", "communityNote"))
            .text(" Readers added context"),
    );
    assert_eq!(result.signal, Some(SignalFamily::StructuralAttribute));
    assert_eq!(result.evidence.as_deref(), Some("data-testid=communityNote"));
}

#[test]
fn helpful_without_not_helpful_is_not_proposed() {
    let result = classify_one(
        tweet()
            .text("Rate this note ")
            .child(el("button").text("Helpful")),
    );
    assert_eq!(result.classification, Classification::None);
}

#[test]
fn unhelpful_label_is_not_a_helpful_control() {
    let result = classify_one(
        tweet()
            .text("Rate this community note ")
            .child(
                el("div")
                    .child(el("button").text("Unhelpful"))
                    .child(el("button").text("Not helpful")),
            ),
    );
    assert_ne!(result.classification, Classification::Proposed);
}

// ── Degradation ──────────────────────────────────────────────────────────

#[test]
fn malformed_configured_attribute_degrades_to_no_match() {
    let config = DetectionConfig {
        identifier_attributes: vec!["data testid".to_string(), "data-qa".to_string()],
        ..DetectionConfig::default()
    };
    let (doc, items) = MemoryDocument::from_specs(&[
        tweet().child(el("div").attr("data-qa", "community-notes")),
    ])
    .unwrap();
    let result = Classifier::new(&config).classify(&doc, items[0]);
    assert_eq!(result.classification, Classification::Confirmed);
    assert_eq!(result.evidence.as_deref(), Some("data-qa=community-notes"));
}

#[test]
fn empty_item_is_none() {
    assert_eq!(classify_one(tweet()).classification, Classification::None);
}

#[test]
fn detached_item_is_none() {
    let (mut doc, items) =
        MemoryDocument::from_specs(&[tweet().text("Readers added context")]).unwrap();
    doc.remove(items[0]).unwrap();
    let result = Classifier::default().classify(&doc, items[0]);
    assert_eq!(result.classification, Classification::None);
}

#[test]
fn reclassification_follows_late_content() {
    let (mut doc, items) = MemoryDocument::from_specs(&[tweet().text("Loading")]).unwrap();
    let classifier = Classifier::default();
    assert_eq!(
        classifier.classify(&doc, items[0]).classification,
        Classification::None
    );
    doc.append(items[0], &el("div").attr("data-testid", "birdwatch-pivot"))
        .unwrap();
    assert_eq!(
        classifier.classify(&doc, items[0]).classification,
        Classification::Confirmed
    );
}

// ── Custom detectors and explain ─────────────────────────────────────────

struct Always(SignalFamily);

impl SignalDetector for Always {
    fn family(&self) -> SignalFamily {
        self.0
    }

    fn detect(&self, _doc: &dyn IHostDocument, _item: NodeHandle) -> SignalMatch {
        SignalMatch::hit("always")
    }
}

struct Never(SignalFamily);

impl SignalDetector for Never {
    fn family(&self) -> SignalFamily {
        self.0
    }

    fn detect(&self, _doc: &dyn IHostDocument, _item: NodeHandle) -> SignalMatch {
        SignalMatch::miss()
    }
}

#[test]
fn with_detectors_respects_given_order() {
    let classifier = Classifier::with_detectors(
        Box::new(Never(SignalFamily::RatingControls)),
        vec![
            Box::new(Never(SignalFamily::StructuralAttribute)),
            Box::new(Always(SignalFamily::OutboundLink)),
            Box::new(Always(SignalFamily::BodyText)),
        ],
    );
    let (doc, items) = MemoryDocument::from_specs(&[tweet()]).unwrap();
    let result = classifier.classify(&doc, items[0]);
    assert_eq!(result.signal, Some(SignalFamily::OutboundLink));
}

#[test]
fn explain_reports_every_family() {
    let (doc, items) = MemoryDocument::from_specs(&[tweet()
        .child(el("div").attr("data-testid", "communityNote"))
        .text(" Readers added context")])
    .unwrap();
    let report = Classifier::default().explain(&doc, items[0]);
    let families: Vec<_> = report.iter().map(|(f, _)| *f).collect();
    assert_eq!(families[0], SignalFamily::RatingControls);
    assert_eq!(&families[1..], &SignalFamily::CONFIRMED_ORDER);

    let matched: Vec<_> = report
        .iter()
        .filter(|(_, m)| m.matched)
        .map(|(f, _)| *f)
        .collect();
    assert!(matched.contains(&SignalFamily::StructuralAttribute));
    assert!(matched.contains(&SignalFamily::BodyText));
    assert!(!matched.contains(&SignalFamily::RatingControls));
}
