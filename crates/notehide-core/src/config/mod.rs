//! Pipeline configuration, loadable from TOML with per-key defaults.

pub mod defaults;
mod detection_config;
mod marker_config;
mod observability_config;
mod scheduler_config;

pub use detection_config::DetectionConfig;
pub use marker_config::MarkerConfig;
pub use observability_config::ObservabilityConfig;
pub use scheduler_config::SchedulerConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, NotehideResult};

/// Top-level configuration. Every section and key is optional in TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotehideConfig {
    pub scheduler: SchedulerConfig,
    pub detection: DetectionConfig,
    pub markers: MarkerConfig,
    pub observability: ObservabilityConfig,
}

impl NotehideConfig {
    /// Parse a TOML document, filling every missing key with its default.
    pub fn from_toml(source: &str) -> NotehideResult<Self> {
        let config: Self = toml::from_str(source).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations the scheduler cannot honor.
    pub fn validate(&self) -> NotehideResult<()> {
        let s = &self.scheduler;
        if s.short_recheck_min_age_ms > s.short_recheck_max_age_ms {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "short_recheck_min_age_ms ({}) exceeds short_recheck_max_age_ms ({})",
                    s.short_recheck_min_age_ms, s.short_recheck_max_age_ms
                ),
            }
            .into());
        }
        if s.short_window_interval_ms == 0 || s.long_period_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "timer periods must be non-zero".to_string(),
            }
            .into());
        }
        if self.detection.item_selector.trim().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "detection.item_selector must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
