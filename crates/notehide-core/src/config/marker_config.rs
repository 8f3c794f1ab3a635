use serde::{Deserialize, Serialize};

use super::defaults;

/// Data attributes the state tracker mirrors onto items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub seen_attribute: String,
    pub hidden_attribute: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            seen_attribute: defaults::DEFAULT_SEEN_ATTRIBUTE.to_string(),
            hidden_attribute: defaults::DEFAULT_HIDDEN_ATTRIBUTE.to_string(),
        }
    }
}
