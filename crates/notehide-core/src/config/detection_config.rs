use serde::{Deserialize, Serialize};

use super::defaults;

/// Where items and their regions live in the host markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Selector matching one feed item.
    pub item_selector: String,
    /// Machine-readable identifier attributes, in lookup order.
    pub identifier_attributes: Vec<String>,
    /// Selector for the author region used by account resolution.
    pub author_region_selector: String,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            item_selector: defaults::DEFAULT_ITEM_SELECTOR.to_string(),
            identifier_attributes: defaults::DEFAULT_IDENTIFIER_ATTRIBUTES
                .iter()
                .map(|a| a.to_string())
                .collect(),
            author_region_selector: defaults::DEFAULT_AUTHOR_REGION_SELECTOR.to_string(),
        }
    }
}
