//! Span definitions per pipeline operation: pass, classification, reconciliation.

/// Create a pass span.
#[macro_export]
macro_rules! pass_span {
    ($kind:expr, $candidates:expr) => {
        tracing::debug_span!("notehide.pass", kind = %$kind, candidates = $candidates)
    };
}

/// Create a classification span for one item.
#[macro_export]
macro_rules! classify_span {
    ($item:expr) => {
        tracing::trace_span!("notehide.classify", item = %$item)
    };
}

/// Create a settings reconciliation span.
#[macro_export]
macro_rules! reconcile_span {
    ($version:expr, $tracked:expr) => {
        tracing::info_span!("notehide.reconcile", version = $version, tracked = $tracked)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PASS: &str = "notehide.pass";
    pub const CLASSIFY: &str = "notehide.classify";
    pub const RECONCILE: &str = "notehide.reconcile";
}
