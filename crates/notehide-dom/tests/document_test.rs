use notehide_core::errors::SelectorError;
use notehide_core::models::{MutationKind, ObserverOptions};
use notehide_core::traits::IHostDocument;
use notehide_dom::{el, MemoryDocument};

fn tweet(body: &str) -> notehide_dom::NodeSpec {
    el("article")
        .attr("data-testid", "tweet")
        .child(el("div").attr("data-testid", "tweetText").text(body))
}

// ── Queries ──────────────────────────────────────────────────────────────

#[test]
fn query_all_returns_descendants_in_document_order() {
    let (doc, items) = MemoryDocument::from_specs(&[tweet("one"), tweet("two")]).unwrap();
    let found = doc
        .query_all(doc.root(), r#"article[data-testid="tweet"]"#)
        .unwrap();
    assert_eq!(found, items);
}

#[test]
fn query_all_excludes_scope_itself() {
    let (doc, items) = MemoryDocument::from_specs(&[tweet("one")]).unwrap();
    let found = doc.query_all(items[0], "article").unwrap();
    assert!(found.is_empty());
    let inner = doc.query_all(items[0], "[data-testid]").unwrap();
    assert_eq!(inner.len(), 1);
}

#[test]
fn malformed_selector_is_an_error_not_a_panic() {
    let (doc, _) = MemoryDocument::from_specs(&[tweet("one")]).unwrap();
    let err = doc.query_all(doc.root(), "article >> div").unwrap_err();
    assert!(matches!(err, SelectorError::Unsupported { .. }));
}

#[test]
fn text_content_concatenates_descendant_text() {
    let spec = el("article")
        .text("Readers added ")
        .child(el("span").text("context"));
    let (doc, items) = MemoryDocument::from_specs(&[spec]).unwrap();
    assert_eq!(doc.text_content(items[0]), "Readers added context");
}

#[test]
fn attribute_lookup_is_case_insensitive_on_name() {
    let (doc, items) =
        MemoryDocument::from_specs(&[el("div").attr("Aria-Label", "Community note")]).unwrap();
    assert_eq!(
        doc.attribute(items[0], "aria-label").as_deref(),
        Some("Community note")
    );
}

// ── Liveness ─────────────────────────────────────────────────────────────

#[test]
fn removing_a_subtree_stales_every_handle_in_it() {
    let (mut doc, items) = MemoryDocument::from_specs(&[tweet("one")]).unwrap();
    let inner = doc.query_first(items[0], "div").unwrap().unwrap();
    doc.remove(items[0]).unwrap();
    assert!(!doc.contains(items[0]));
    assert!(!doc.contains(inner));
    assert_eq!(doc.text_content(inner), "");
    assert!(doc.set_attribute(inner, "x", "y").is_err());
}

#[test]
fn detached_nodes_are_not_contained() {
    let mut doc = MemoryDocument::new();
    let orphan = doc.create_element("article");
    assert!(!doc.contains(orphan));
    assert!(doc.contains(doc.root()));
}

// ── Mutation observer ────────────────────────────────────────────────────

#[test]
fn nothing_is_recorded_before_observe() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    doc.append(root, &tweet("one")).unwrap();
    assert!(doc.take_mutations().is_empty());
}

#[test]
fn child_list_changes_are_recorded_once_per_insertion() {
    let mut doc = MemoryDocument::new();
    doc.observe(ObserverOptions::default());
    let root = doc.root();
    let item = doc.append(root, &tweet("one")).unwrap();

    let records = doc.take_mutations();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].target, root);
    assert!(records[0].adds_nodes());
    assert!(matches!(&records[0].kind, MutationKind::ChildList { added, .. } if added == &vec![item]));
    assert!(doc.take_mutations().is_empty(), "take drains the queue");
}

#[test]
fn attribute_changes_respect_allow_list() {
    let (mut doc, items) = MemoryDocument::from_specs(&[tweet("one")]).unwrap();
    doc.observe(ObserverOptions::default());

    doc.set_attribute(items[0], "data-note-checked", "true").unwrap();
    doc.set_hidden(items[0], true).unwrap();
    assert!(doc.take_mutations().is_empty(), "markers and style are not observed");

    doc.set_attribute(items[0], "aria-label", "Community note").unwrap();
    let records = doc.take_mutations();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].kind,
        MutationKind::Attribute {
            name: "aria-label".into()
        }
    );
}

#[test]
fn unchanged_attribute_writes_are_not_recorded() {
    let (mut doc, items) = MemoryDocument::from_specs(&[tweet("one")]).unwrap();
    doc.observe(ObserverOptions::default());
    doc.set_attribute(items[0], "data-testid", "tweet").unwrap();
    assert!(doc.take_mutations().is_empty());
}

#[test]
fn non_subtree_observer_only_sees_root_children() {
    let (mut doc, items) = MemoryDocument::from_specs(&[tweet("one")]).unwrap();
    doc.observe(ObserverOptions {
        subtree: false,
        ..ObserverOptions::default()
    });
    doc.append(items[0], &el("div").attr("data-testid", "birdwatch-pivot"))
        .unwrap();
    assert!(doc.take_mutations().is_empty());
    let root = doc.root();
    doc.append(root, &tweet("two")).unwrap();
    assert_eq!(doc.take_mutations().len(), 1);
}

#[test]
fn removal_is_recorded_on_the_parent() {
    let (mut doc, items) = MemoryDocument::from_specs(&[tweet("one")]).unwrap();
    doc.observe(ObserverOptions::default());
    doc.remove(items[0]).unwrap();
    let records = doc.take_mutations();
    assert_eq!(records.len(), 1);
    assert!(matches!(&records[0].kind, MutationKind::ChildList { removed, .. } if removed == &vec![items[0]]));
}
