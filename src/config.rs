use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::tools::acquire::AcquisitionConfig;
use crate::tools::standings::StandingsSelectors;

/// Handy wrapper when you want to print or pass "config" as a single object.
///
/// Missing fields fall back to their defaults, so a config file only needs
/// the values it overrides:
///
/// ```
/// use league_scrape::ScrapeConfig;
///
/// let config = ScrapeConfig::from_json(r#"{"acquisition": {"headless": false}}"#).unwrap();
/// assert!(!config.acquisition.headless);
/// assert_eq!(config.selectors.wins_column_index, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrapeConfig {
    pub acquisition: AcquisitionConfig,
    pub selectors: StandingsSelectors,
}

impl ScrapeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_acquisition(mut self, acquisition: AcquisitionConfig) -> Self {
        self.acquisition = acquisition;
        self
    }

    pub fn with_selectors(mut self, selectors: StandingsSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
