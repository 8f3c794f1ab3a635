//! Account resolution from an item's author region.

use std::collections::BTreeSet;

use notehide_core::config::DetectionConfig;
use notehide_core::constants::{HOST_BASE_URL, HOST_DOMAINS, RESERVED_ROUTES};
use notehide_core::models::{AccountId, NodeHandle};
use notehide_core::traits::IHostDocument;
use once_cell::sync::Lazy;
use tracing::trace;
use url::Url;

use crate::signals::query_lenient;

static BASE_URL: Lazy<Option<Url>> = Lazy::new(|| Url::parse(HOST_BASE_URL).ok());

/// Extract a handle from a profile link (`/jack`, `https://x.com/jack`).
///
/// Only single-segment paths on a host domain qualify; reserved routes and
/// status links are rejected.
pub fn handle_from_href(href: &str) -> Option<AccountId> {
    let base = BASE_URL.as_ref()?;
    let url = base.join(href.trim()).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    if !HOST_DOMAINS.contains(&host.as_str()) {
        return None;
    }

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let first = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    let lower = first.to_ascii_lowercase();
    if RESERVED_ROUTES.contains(&lower.as_str()) {
        return None;
    }
    AccountId::parse(first)
}

/// Resolves the author of an item.
///
/// Only the first author region is consulted; an embedded item carries its
/// own region further down. When that region names more than one distinct
/// handle the item is treated as having no account.
pub struct AccountResolver {
    author_region_selector: String,
}

impl AccountResolver {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            author_region_selector: config.author_region_selector.clone(),
        }
    }

    pub fn resolve(&self, doc: &dyn IHostDocument, item: NodeHandle) -> Option<AccountId> {
        let regions = query_lenient(doc, item, &self.author_region_selector);
        let mut handles = BTreeSet::new();
        for region in regions.iter().take(1) {
            for anchor in query_lenient(doc, *region, "a[href]") {
                if let Some(handle) = doc.attribute(anchor, "href").and_then(|h| handle_from_href(&h)) {
                    handles.insert(handle);
                }
            }
        }

        match handles.len() {
            1 => handles.into_iter().next(),
            0 => self.first_profile_link(doc, item),
            n => {
                trace!(%item, candidates = n, "ambiguous author region");
                None
            }
        }
    }

    fn first_profile_link(&self, doc: &dyn IHostDocument, item: NodeHandle) -> Option<AccountId> {
        query_lenient(doc, item, "a[href]")
            .into_iter()
            .find_map(|anchor| doc.attribute(anchor, "href").and_then(|h| handle_from_href(&h)))
    }
}

impl Default for AccountResolver {
    fn default() -> Self {
        Self::new(&DetectionConfig::default())
    }
}
