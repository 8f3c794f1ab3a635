//! # notehide-observability
//!
//! Structured logging setup, span macros for the pipeline's passes, and the
//! counters the scheduler records while it runs.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::PipelineMetrics;
pub use tracing_setup::init_tracing;
