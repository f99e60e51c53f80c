//! brapi quote API response models.
//!
//! Only the fields the screener consumes are modeled. Unknown fields are
//! ignored; a field with the wrong JSON type fails the whole decode.

use serde::Deserialize;

/// Top-level body of `GET /quote/{ticker}`.
#[derive(Debug, Deserialize)]
pub struct BrapiQuoteResponse {
    pub results: Vec<BrapiQuoteResult>,
}

/// One entry of `results`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrapiQuoteResult {
    pub symbol: Option<String>,
    pub regular_market_price: Option<f64>,
    pub price_earnings: Option<f64>,
    pub default_key_statistics: Option<BrapiKeyStatistics>,
}

/// `defaultKeyStatistics` module.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrapiKeyStatistics {
    pub price_to_book: Option<f64>,
    /// Trailing dividend yield, in percent.
    pub dividend_yield: Option<f64>,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct BrapiErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}
