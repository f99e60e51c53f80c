use std::time::Duration;

use serde::{Deserialize, Serialize};

use b3_screener_market_data::DEFAULT_BLOCK_THRESHOLD;

use crate::errors::ConfigError;
use crate::scoring::{ScoringTable, DEFAULT_ALERT_THRESHOLD};

/// Default number of primary fetches in flight at once.
pub const DEFAULT_PRIMARY_CONCURRENCY: usize = 4;

/// Run configuration.
///
/// Deserializes from camelCase JSON; every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreenerConfig {
    /// Minimum seconds between secondary requests (default: 3)
    pub secondary_rate_limit_seconds: f64,

    /// Score at or above which a record raises an alert (default: 80)
    pub alert_threshold: u8,

    /// Weighted rule table (default: P/L, P/VP, DY, ROE, net debt/EBITDA)
    pub scoring_table: ScoringTable,

    /// Consecutive secondary blocks that disable the source (default: 3)
    pub block_threshold: u32,

    /// Primary fetches in flight at once (default: 4)
    pub primary_concurrency: usize,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            secondary_rate_limit_seconds: 3.0,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            scoring_table: ScoringTable::default(),
            block_threshold: DEFAULT_BLOCK_THRESHOLD,
            primary_concurrency: DEFAULT_PRIMARY_CONCURRENCY,
        }
    }
}

impl ScreenerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring_table.validate()?;
        if self.alert_threshold > 100 {
            return Err(ConfigError::AlertThreshold(self.alert_threshold));
        }
        self.secondary_interval()?;
        if self.block_threshold == 0 {
            return Err(ConfigError::ZeroValue("blockThreshold"));
        }
        if self.primary_concurrency == 0 {
            return Err(ConfigError::ZeroValue("primaryConcurrency"));
        }
        Ok(())
    }

    /// The secondary cooldown as a `Duration`.
    pub fn secondary_interval(&self) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f64(self.secondary_rate_limit_seconds)
            .map_err(|_| ConfigError::RateLimit)
    }
}
