//! Error types and failure classification for the source clients.
//!
//! This module provides:
//! - [`SourceError`]: The error enum for every source fetch
//! - [`FailureClass`]: Classification used by the pipeline to isolate failures

mod class;

pub use class::FailureClass;

use thiserror::Error;

/// Errors that can occur while fetching from a data source.
///
/// Each variant maps to a [`FailureClass`] via [`class`](Self::class).
#[derive(Error, Debug)]
pub enum SourceError {
    /// The ticker failed validation before any request was made.
    #[error("Invalid ticker '{ticker}': {reason}")]
    InvalidTicker {
        /// The raw symbol as supplied
        ticker: String,
        /// Why it was rejected
        reason: String,
    },

    /// The provider has no listing for the ticker.
    #[error("Ticker not found: {ticker} ({provider})")]
    NotFound {
        /// The provider that was asked
        provider: String,
        /// The normalized ticker
        ticker: String,
    },

    /// The provider throttled the request.
    #[error("Blocked: {provider}")]
    Blocked {
        /// The provider that blocked the request
        provider: String,
    },

    /// The provider could not be reached or returned an error status.
    #[error("Source unavailable: {provider} - {message}")]
    SourceUnavailable {
        /// The provider that failed
        provider: String,
        /// Details of the failure
        message: String,
    },

    /// The provider answered but the payload could not be decoded.
    #[error("Malformed data from {provider}: {message}")]
    MalformedData {
        /// The provider that returned the payload
        provider: String,
        /// What could not be decoded
        message: String,
    },

    /// The source was disabled earlier in the run and was not called.
    #[error("Source disabled for this run: {provider}")]
    Disabled {
        /// The disabled provider
        provider: String,
    },

    /// A transport error from the HTTP client.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl SourceError {
    /// Returns the failure classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use b3_screener_market_data::errors::{FailureClass, SourceError};
    ///
    /// let error = SourceError::Blocked { provider: "FUNDAMENTUS".to_string() };
    /// assert_eq!(error.class(), FailureClass::Throttled);
    ///
    /// let error = SourceError::NotFound {
    ///     provider: "BRAPI".to_string(),
    ///     ticker: "XPTO3".to_string(),
    /// };
    /// assert_eq!(error.class(), FailureClass::Absent);
    /// ```
    pub fn class(&self) -> FailureClass {
        match self {
            Self::InvalidTicker { .. } => FailureClass::Rejected,
            Self::NotFound { .. } => FailureClass::Absent,
            Self::Blocked { .. } => FailureClass::Throttled,
            Self::SourceUnavailable { .. } | Self::MalformedData { .. } | Self::Network(_) => {
                FailureClass::Unavailable
            }
            Self::Disabled { .. } => FailureClass::Skipped,
        }
    }

    pub(crate) fn unavailable(provider: &str, message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn malformed(provider: &str, message: impl Into<String>) -> Self {
        Self::MalformedData {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}
