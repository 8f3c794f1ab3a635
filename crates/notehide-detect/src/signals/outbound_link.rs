use notehide_core::constants::HOST_BASE_URL;
use notehide_core::models::{NodeHandle, SignalFamily, SignalMatch};
use notehide_core::traits::IHostDocument;
use url::Url;

use super::patterns::NOTE_PATH_SEGMENTS;
use super::{query_lenient, SignalDetector};

/// An anchor whose target path has a note-feature segment.
pub struct OutboundLinkSignal;

impl OutboundLinkSignal {
    /// Whether `href`, resolved against the host, points into the note feature.
    /// Unparsable hrefs are non-matches.
    pub fn href_targets_notes(href: &str) -> bool {
        let Ok(base) = Url::parse(HOST_BASE_URL) else {
            return false;
        };
        let Ok(url) = base.join(href) else {
            return false;
        };
        url.path_segments().is_some_and(|mut segments| {
            segments.any(|s| {
                NOTE_PATH_SEGMENTS
                    .iter()
                    .any(|n| n.eq_ignore_ascii_case(s))
            })
        })
    }
}

impl SignalDetector for OutboundLinkSignal {
    fn family(&self) -> SignalFamily {
        SignalFamily::OutboundLink
    }

    fn detect(&self, doc: &dyn IHostDocument, item: NodeHandle) -> SignalMatch {
        query_lenient(doc, item, "a[href]")
            .into_iter()
            .filter_map(|a| doc.attribute(a, "href"))
            .find(|href| Self::href_targets_notes(href))
            .map(SignalMatch::hit)
            .unwrap_or_else(SignalMatch::miss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_and_absolute_note_links() {
        assert!(OutboundLinkSignal::href_targets_notes("/i/communitynotes/t/123"));
        assert!(OutboundLinkSignal::href_targets_notes(
            "https://x.com/i/birdwatch/n/1790000000000000000"
        ));
        assert!(OutboundLinkSignal::href_targets_notes("/i/CommunityNotes"));
    }

    #[test]
    fn segment_match_is_exact() {
        assert!(!OutboundLinkSignal::href_targets_notes("/jack/status/1"));
        assert!(!OutboundLinkSignal::href_targets_notes("/search?q=communitynotes"));
        assert!(!OutboundLinkSignal::href_targets_notes("/notes_from_jack"));
    }

    #[test]
    fn unparsable_hrefs_do_not_match() {
        assert!(!OutboundLinkSignal::href_targets_notes("http://[::1"));
    }
}
