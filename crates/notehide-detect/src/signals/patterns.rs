//! Keyword and phrase patterns the host is known to render for notes.
//!
//! A bare "note" substring or the short "added context" phrase on its own
//! never matches. Loosening either widens matches onto unrelated markup.

use once_cell::sync::Lazy;
use regex::Regex;

/// Identifier tokens that name the note feature.
pub const NOTE_IDENTIFIER_TOKENS: &[&str] = &[
    "note",
    "notes",
    "communitynote",
    "communitynotes",
    "birdwatch",
];

/// `context` only names the note feature next to one of these. On its own it
/// also labels reposts and pinned items (`socialContext`).
pub const CONTEXT_COMPANION_TOKENS: &[&str] = &["community", "reader", "readers"];

/// Link path segments of the note feature.
pub const NOTE_PATH_SEGMENTS: &[&str] = &[
    "communitynotes",
    "community-notes",
    "community-note",
    "birdwatch",
];

/// Phrases rendered in the body of an item carrying a note.
pub static BODY_TEXT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\breaders\s+added\s+context\b",
        r"(?i)\bcontext\s+they\s+thought\s+people\s+might\s+want\s+to\s+know\b",
        r"(?i)\bcommunity\s+notes?\b",
        r"(?i)\bcommunitynotes?\b",
        r"(?i)\bnote\s+by\s+the\s+community\b",
        r"(?i)\bcommunity\s+context\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static body text pattern"))
    .collect()
});

/// Note or context keyword.
pub static NOTE_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(notes?|context)\b").expect("static keyword pattern"));

/// Community-origin phrase.
pub static COMMUNITY_ORIGIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(community|readers?)\b|\badded\s+context\b").expect("static origin pattern")
});

/// Keyword pair required by the generic attribute sweep.
pub static NOTE_KEYWORD_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)community.*note|note.*community|readers.*context|added.*context")
        .expect("static keyword pair pattern")
});

/// Keywords around a proposed note's rating controls.
pub static RATING_CONTEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(notes?|context|community|rate|rated|rating|ratings)\b")
        .expect("static rating context pattern")
});

pub static HELPFUL_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bhelpful\b").expect("static helpful pattern"));

pub static NOT_HELPFUL_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bnot\s+helpful\b").expect("static not-helpful pattern"));

/// Split an identifier into lowercase words at separators and camelCase boundaries.
pub fn identifier_tokens(identifier: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in identifier.chars() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_ascii_uppercase() && prev_lower && !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        current.push(c.to_ascii_lowercase());
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Word-boundary-safe check that an identifier names the note feature.
pub fn identifier_names_note_feature(identifier: &str) -> bool {
    let tokens = identifier_tokens(identifier);
    let has = |set: &[&str]| tokens.iter().any(|t| set.contains(&t.as_str()));
    has(NOTE_IDENTIFIER_TOKENS)
        || (tokens.iter().any(|t| t == "context") && has(CONTEXT_COMPANION_TOKENS))
}
