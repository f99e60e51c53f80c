//! Core error types for the screener.
//!
//! Per-ticker failures are not errors of the run: they are recorded as
//! exclusions on the ranked result. The types here cover what stops a
//! ticker from being merged, what stops a run from starting or finishing,
//! and what a publisher may report.

use thiserror::Error;

use b3_screener_market_data::SourceError;

/// Type alias for Result using the run-level error type.
pub type Result<T> = std::result::Result<T, ScreenerError>;

/// Errors that end a screening run.
#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The primary source could not be reached for any ticker.
    #[error("Primary source unreachable for all {attempted} tickers (last error: {last_error})")]
    CollectionFailed {
        attempted: usize,
        last_error: String,
    },
}

/// Errors raised while building a canonical record.
#[derive(Error, Debug)]
pub enum MergeError {
    /// The primary source does not list the ticker, so no record can exist.
    #[error("Unknown ticker: {0}")]
    UnknownTicker(String),

    /// The primary fetch failed for another reason.
    #[error("Primary data unavailable: {0}")]
    PrimaryUnavailable(#[source] SourceError),
}

/// Configuration validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Scoring table has no rules")]
    EmptyTable,

    #[error("Metric {0} appears more than once in the scoring table")]
    DuplicateMetric(String),

    #[error("Scoring weights sum to {0}, expected 100")]
    WeightSum(u32),

    #[error("Rule for {metric} is invalid: {reason}")]
    InvalidRule { metric: String, reason: String },

    #[error("Alert threshold {0} is above 100")]
    AlertThreshold(u8),

    #[error("Secondary rate limit must be a finite, non-negative number of seconds")]
    RateLimit,

    #[error("{0} must be at least 1")]
    ZeroValue(&'static str),
}

/// Errors reported by a result publisher.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_failed_display() {
        let error = ScreenerError::CollectionFailed {
            attempted: 3,
            last_error: "Source unavailable: BRAPI - HTTP error: 502 Bad Gateway".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Primary source unreachable for all 3 tickers (last error: Source unavailable: BRAPI - HTTP error: 502 Bad Gateway)"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let error: ScreenerError = ConfigError::WeightSum(90).into();
        assert_eq!(
            error.to_string(),
            "Invalid configuration: Scoring weights sum to 90, expected 100"
        );
    }

    #[test]
    fn test_unknown_ticker_display() {
        let error = MergeError::UnknownTicker("XPTO3".to_string());
        assert_eq!(error.to_string(), "Unknown ticker: XPTO3");
    }
}
