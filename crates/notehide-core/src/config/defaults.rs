//! Default values for every config key.

// Scheduler
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;
pub const DEFAULT_DELAYED_RECHECK_MS: u64 = 1_500;
pub const DEFAULT_INITIAL_FOLLOWUPS_MS: [u64; 2] = [500, 1_500];
pub const DEFAULT_SHORT_WINDOW_INTERVAL_MS: u64 = 2_000;
pub const DEFAULT_SHORT_RECHECK_MIN_AGE_MS: u64 = 1_000;
pub const DEFAULT_SHORT_RECHECK_MAX_AGE_MS: u64 = 10_000;
pub const DEFAULT_MAX_SHORT_RECHECKS: u32 = 1;
pub const DEFAULT_LONG_PERIOD_MS: u64 = 30_000;

// Detection
pub const DEFAULT_ITEM_SELECTOR: &str = r#"article[data-testid="tweet"]"#;
pub const DEFAULT_IDENTIFIER_ATTRIBUTES: [&str; 3] = ["data-testid", "data-test-id", "data-qa"];
pub const DEFAULT_AUTHOR_REGION_SELECTOR: &str = r#"[data-testid="User-Name"]"#;

// Markers
pub const DEFAULT_SEEN_ATTRIBUTE: &str = "data-note-checked";
pub const DEFAULT_HIDDEN_ATTRIBUTE: &str = "data-community-note-hidden";

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
