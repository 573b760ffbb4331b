//! Listing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::MarketError;

/// Tunables for the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Items revealed initially and per "load more".
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Quiet period before a suggestion computation runs.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum number of suggestions shown.
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

fn default_page_size() -> usize {
    12
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_suggestion_limit() -> usize {
    3
}

impl ListingConfig {
    /// Debounce interval as a `Duration`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), MarketError> {
        if self.page_size == 0 {
            return Err(MarketError::InvalidConfig(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.suggestion_limit == 0 {
            return Err(MarketError::InvalidConfig(
                "suggestion_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}
