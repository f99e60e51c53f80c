//! Source client trait definitions.
//!
//! The pipeline talks to providers only through these two traits, so tests
//! and alternative providers can be swapped in without touching the
//! reconciliation logic.

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::models::{RawPrimaryFields, RawSecondaryFields, Ticker};

/// Provider of price and valuation fields.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use b3_screener_market_data::provider::PrimarySource;
///
/// struct FixedPrices;
///
/// #[async_trait]
/// impl PrimarySource for FixedPrices {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn fetch_primary(&self, ticker: &Ticker) -> Result<RawPrimaryFields, SourceError> {
///         let mut fields = RawPrimaryFields::new(ticker.clone());
///         fields.price = Some(10.0);
///         Ok(fields)
///     }
/// }
/// ```
#[async_trait]
pub trait PrimarySource: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch valuation fields for one ticker.
    ///
    /// One network read per call. Returns [`SourceError::NotFound`] when the
    /// ticker is not listed, [`SourceError::SourceUnavailable`] or
    /// [`SourceError::MalformedData`] when the provider cannot be used.
    async fn fetch_primary(&self, ticker: &Ticker) -> Result<RawPrimaryFields, SourceError>;
}

/// Provider of profitability and leverage fields.
///
/// Implementations must not sleep or rate limit themselves; the caller
/// dispatches every request through a
/// [`SecondaryScheduler`](crate::scheduler::SecondaryScheduler).
#[async_trait]
pub trait SecondarySource: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch profitability fields for one ticker.
    ///
    /// [`SourceError::Blocked`] is an expected outcome when the provider
    /// throttles us.
    async fn fetch_secondary(&self, ticker: &Ticker) -> Result<RawSecondaryFields, SourceError>;
}
