use chrono::{Duration, Utc};
use notehide_core::models::{Decision, DecisionRule, ItemPhase, MutationKind, ObserverOptions};
use notehide_core::traits::IHostDocument;
use notehide_dom::{el, MemoryDocument};
use notehide_tracker::{Applied, StateTracker};
use proptest::prelude::*;

fn doc_with_items(n: usize) -> (MemoryDocument, Vec<notehide_core::NodeHandle>) {
    let specs: Vec<_> = (0..n)
        .map(|i| {
            el("article")
                .attr("data-testid", "tweet")
                .text(&format!("post {i}"))
        })
        .collect();
    MemoryDocument::from_specs(&specs).unwrap()
}

fn hide() -> Decision {
    Decision::hide(DecisionRule::ConfirmedNote)
}

fn show() -> Decision {
    Decision::show(DecisionRule::Fallthrough)
}

// ── Claims ───────────────────────────────────────────────────────────────

#[test]
fn claim_is_granted_once() {
    let (mut doc, items) = doc_with_items(1);
    let tracker = StateTracker::default();
    assert!(tracker.try_claim(&mut doc, items[0]));
    assert!(!tracker.try_claim(&mut doc, items[0]));
    assert_eq!(
        doc.attribute(items[0], "data-note-checked").as_deref(),
        Some("true")
    );
    assert_eq!(tracker.state(items[0]).unwrap().phase(), ItemPhase::Checked);
}

#[test]
fn detached_item_cannot_be_claimed() {
    let (mut doc, items) = doc_with_items(1);
    doc.remove(items[0]).unwrap();
    let tracker = StateTracker::default();
    assert!(!tracker.try_claim(&mut doc, items[0]));
    assert!(tracker.is_empty());
}

#[test]
fn concurrent_claims_grant_exactly_one() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    let (doc, items) = doc_with_items(1);
    let doc = Arc::new(Mutex::new(doc));
    let tracker = Arc::new(StateTracker::default());
    let granted = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let doc = Arc::clone(&doc);
            let tracker = Arc::clone(&tracker);
            let granted = Arc::clone(&granted);
            let item = items[0];
            std::thread::spawn(move || {
                let mut doc = doc.lock().unwrap();
                if tracker.try_claim(&mut *doc, item) {
                    granted.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(granted.load(Ordering::SeqCst), 1);
}

// ── Apply ────────────────────────────────────────────────────────────────

#[test]
fn apply_hide_sets_marker_and_suppresses() {
    let (mut doc, items) = doc_with_items(1);
    let tracker = StateTracker::default();
    tracker.try_claim(&mut doc, items[0]);
    let applied = tracker.apply(&mut doc, items[0], &hide(), Utc::now()).unwrap();
    assert_eq!(applied, Applied::Hidden);
    assert!(doc.is_hidden(items[0]));
    assert_eq!(
        doc.attribute(items[0], "data-community-note-hidden").as_deref(),
        Some("true")
    );
    assert_eq!(tracker.state(items[0]).unwrap().phase(), ItemPhase::Hidden);
}

#[test]
fn apply_is_idempotent() {
    let (mut doc, items) = doc_with_items(1);
    let tracker = StateTracker::default();
    let now = Utc::now();
    tracker.apply(&mut doc, items[0], &hide(), now).unwrap();
    let again = tracker.apply(&mut doc, items[0], &hide(), now).unwrap();
    assert_eq!(again, Applied::Unchanged);
    assert!(doc.is_hidden(items[0]));

    let shown = tracker.apply(&mut doc, items[0], &show(), now).unwrap();
    assert_eq!(shown, Applied::Unhidden);
    assert!(!doc.is_hidden(items[0]));
    assert!(doc.attribute(items[0], "data-community-note-hidden").is_none());
    assert_eq!(
        tracker.apply(&mut doc, items[0], &show(), now).unwrap(),
        Applied::Unchanged
    );
}

#[test]
fn last_checked_never_moves_backwards() {
    let (mut doc, items) = doc_with_items(1);
    let tracker = StateTracker::default();
    let later = Utc::now();
    let earlier = later - Duration::seconds(5);
    tracker.apply(&mut doc, items[0], &show(), later).unwrap();
    tracker.apply(&mut doc, items[0], &show(), earlier).unwrap();
    assert_eq!(tracker.state(items[0]).unwrap().last_checked_at, Some(later));
}

#[test]
fn failed_write_leaves_state_untouched() {
    let (mut doc, items) = doc_with_items(1);
    let tracker = StateTracker::default();
    assert!(tracker.try_claim(&mut doc, items[0]));
    doc.remove(items[0]).unwrap();

    assert!(tracker.apply(&mut doc, items[0], &hide(), Utc::now()).is_err());
    let state = tracker.state(items[0]).unwrap();
    assert!(!state.hidden);
    assert_eq!(state.last_checked_at, None);
    assert_eq!(state.phase(), ItemPhase::Checked);
}

#[test]
fn marker_writes_do_not_notify_the_observer() {
    let (mut doc, items) = doc_with_items(1);
    doc.observe(ObserverOptions::default());
    let tracker = StateTracker::default();
    tracker.try_claim(&mut doc, items[0]);
    tracker.apply(&mut doc, items[0], &hide(), Utc::now()).unwrap();
    let records = doc.take_mutations();
    assert!(
        records
            .iter()
            .all(|r| !matches!(r.kind, MutationKind::Attribute { .. })),
        "unexpected records: {records:?}"
    );
}

// ── Reset, staleness, pruning ────────────────────────────────────────────

#[test]
fn reset_keeps_hidden_unless_asked() {
    let (mut doc, items) = doc_with_items(1);
    let tracker = StateTracker::default();
    tracker.try_claim(&mut doc, items[0]);
    tracker.apply(&mut doc, items[0], &hide(), Utc::now()).unwrap();

    tracker.reset(&mut doc, items[0], false).unwrap();
    let state = tracker.state(items[0]).unwrap();
    assert!(!state.seen);
    assert!(state.last_checked_at.is_none());
    assert!(state.hidden);
    assert!(doc.is_hidden(items[0]));
    assert!(doc.attribute(items[0], "data-note-checked").is_none());

    tracker.reset(&mut doc, items[0], true).unwrap();
    assert!(!tracker.state(items[0]).unwrap().hidden);
    assert!(!doc.is_hidden(items[0]));
    assert!(tracker.try_claim(&mut doc, items[0]));
}

#[test]
fn mark_stale_clears_timing_and_rechecks() {
    let (mut doc, items) = doc_with_items(1);
    let tracker = StateTracker::default();
    tracker.apply(&mut doc, items[0], &show(), Utc::now()).unwrap();
    assert_eq!(tracker.record_recheck(items[0]), 1);
    tracker.mark_stale(items[0]);
    let state = tracker.state(items[0]).unwrap();
    assert!(state.last_checked_at.is_none());
    assert_eq!(state.recheck_count, 0);
    assert!(state.seen);
}

#[test]
fn select_filters_by_state() {
    let (mut doc, items) = doc_with_items(3);
    let tracker = StateTracker::default();
    let now = Utc::now();
    tracker.apply(&mut doc, items[0], &hide(), now).unwrap();
    tracker.apply(&mut doc, items[1], &show(), now).unwrap();
    tracker.try_claim(&mut doc, items[2]);
    assert_eq!(tracker.select(|s| s.hidden), vec![items[0]]);
    assert_eq!(
        tracker.select(|s| s.seen && !s.hidden),
        vec![items[1], items[2]]
    );
    assert_eq!(tracker.tracked(), items);
}

#[test]
fn prune_drops_detached_items() {
    let (mut doc, items) = doc_with_items(3);
    let tracker = StateTracker::default();
    for item in &items {
        tracker.try_claim(&mut doc, *item);
    }
    doc.remove(items[1]).unwrap();
    assert_eq!(tracker.prune(&doc), 1);
    assert_eq!(tracker.tracked(), vec![items[0], items[2]]);
    assert_eq!(tracker.prune(&doc), 0);
}

proptest! {
    #[test]
    fn visibility_follows_the_last_decision(decisions in prop::collection::vec(any::<bool>(), 1..20)) {
        let (mut doc, items) = doc_with_items(1);
        let tracker = StateTracker::default();
        let t0 = Utc::now();
        let mut hidden = false;
        for (i, hide_it) in decisions.iter().copied().enumerate() {
            let decision = if hide_it { hide() } else { show() };
            let at = t0 + Duration::milliseconds(i as i64);
            let applied = tracker.apply(&mut doc, items[0], &decision, at).unwrap();
            prop_assert_eq!(applied != Applied::Unchanged, hide_it != hidden);
            hidden = hide_it;
        }
        prop_assert_eq!(doc.is_hidden(items[0]), hidden);
        prop_assert_eq!(tracker.state(items[0]).unwrap().hidden, hidden);
    }
}
