/// Pipeline version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum length of an account handle on the host platform.
pub const MAX_HANDLE_LEN: usize = 15;

/// Base URL used to resolve relative link targets.
pub const HOST_BASE_URL: &str = "https://x.com/";

/// Hosts whose profile links encode account handles.
pub const HOST_DOMAINS: &[&str] = &[
    "x.com",
    "www.x.com",
    "mobile.x.com",
    "twitter.com",
    "www.twitter.com",
    "mobile.twitter.com",
];

/// Storage scope the pipeline reacts to.
pub const SYNC_SCOPE: &str = "sync";

/// Settings keys as persisted by the store.
pub mod keys {
    pub const ENABLED: &str = "enabled";
    pub const HIDE_PROPOSED_NOTES: &str = "hideProposedNotes";
    pub const NOTE_TYPE_FILTER: &str = "noteTypeFilter";
    pub const WHITELISTED_ACCOUNTS: &str = "whitelistedAccounts";

    pub const ALL: [&str; 4] = [
        ENABLED,
        HIDE_PROPOSED_NOTES,
        NOTE_TYPE_FILTER,
        WHITELISTED_ACCOUNTS,
    ];
}

/// First path segments that are host routes, never account handles.
pub const RESERVED_ROUTES: &[&str] = &[
    "i",
    "home",
    "explore",
    "search",
    "settings",
    "notifications",
    "messages",
    "hashtag",
    "compose",
    "intent",
    "share",
    "login",
    "logout",
    "signup",
    "tos",
    "privacy",
    "jobs",
    "lists",
    "communities",
];

/// Attributes the structural mutation observer is allowed to report.
pub const OBSERVED_ATTRIBUTES: &[&str] = &["data-testid", "aria-label", "class"];
