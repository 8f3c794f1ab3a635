//! Fixture loader for feed documents used across the workspace's tests and benches.
//!
//! Fixtures are JSON files under `documents/`. Each one holds a list of feed
//! items in [`NodeSpec`] form together with the verdict expected for each.

use std::path::PathBuf;

use notehide_core::models::{Classification, NodeHandle, SignalFamily};
use notehide_dom::{MemoryDocument, NodeSpec};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the fixtures crate.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    // From a sibling crate, walk up until the fixtures crate is in view.
    while !path.join("test-fixtures").join("documents").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures/documents from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// One feed item and what the pipeline should make of it.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureItem {
    pub name: String,
    pub spec: NodeSpec,
    pub expected: Classification,
    #[serde(default)]
    pub signal: Option<SignalFamily>,
    /// Expected resolved author, lowercase. Absent means unresolvable.
    #[serde(default)]
    pub account: Option<String>,
}

/// A document fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentFixture {
    pub description: String,
    pub items: Vec<FixtureItem>,
}

impl DocumentFixture {
    /// Materialize every item under the body of a fresh document.
    ///
    /// # Panics
    /// Panics if a spec cannot be built.
    pub fn build(&self) -> (MemoryDocument, Vec<NodeHandle>) {
        let specs: Vec<NodeSpec> = self.items.iter().map(|i| i.spec.clone()).collect();
        MemoryDocument::from_specs(&specs)
            .unwrap_or_else(|e| panic!("Failed to build fixture document: {}", e))
    }
}

/// Load a fixture from `documents/<name>.json`.
pub fn load_document(name: &str) -> DocumentFixture {
    load_fixture(&format!("documents/{name}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().join("documents").exists());
    }

    #[test]
    fn all_document_fixtures_parse_and_build() {
        let files = list_fixtures("documents");
        assert!(files.len() >= 3, "expected document fixtures, found {}", files.len());
        for file in &files {
            let stem = file.file_stem().and_then(|s| s.to_str()).unwrap();
            let fixture = load_document(stem);
            let (_, handles) = fixture.build();
            assert_eq!(handles.len(), fixture.items.len(), "{}", stem);
        }
    }

    #[test]
    fn item_names_are_unique_per_fixture() {
        for file in list_fixtures("documents") {
            let stem = file.file_stem().and_then(|s| s.to_str()).unwrap();
            let fixture = load_document(stem);
            let mut names: Vec<_> = fixture.items.iter().map(|i| i.name.as_str()).collect();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), fixture.items.len(), "duplicate names in {}", stem);
        }
    }
}
