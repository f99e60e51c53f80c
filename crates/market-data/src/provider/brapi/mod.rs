//! brapi provider implementation (primary source).
//!
//! Fetches price and valuation ratios for B3 tickers from the brapi quote API.
//!
//! # API Endpoint
//!
//! - Quote with key statistics:
//!   `{base_url}/quote/{ticker}?modules=defaultKeyStatistics&fundamental=true`
//!
//! The token, when configured, is sent as a Bearer header.

mod models;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};

use crate::errors::SourceError;
use crate::models::{RawPrimaryFields, Ticker};
use crate::provider::http::{build_client, normalize_base_url};
use crate::provider::PrimarySource;

use models::{BrapiErrorResponse, BrapiQuoteResponse};

pub const DEFAULT_BASE_URL: &str = "https://brapi.dev/api";
const PROVIDER_ID: &str = "BRAPI";

/// brapi provider for price, P/L, P/VP and dividend yield.
///
/// # Example
///
/// ```ignore
/// let provider = BrapiProvider::new(DEFAULT_BASE_URL, Some("token".to_string()));
/// let fields = provider.fetch_primary(&Ticker::parse("PETR4")?).await?;
/// ```
pub struct BrapiProvider {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl BrapiProvider {
    /// Create a provider against `base_url` with an optional API token.
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: build_client(PROVIDER_ID),
            base_url: normalize_base_url(base_url),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    fn quote_url(&self, ticker: &Ticker) -> String {
        format!(
            "{}/quote/{}?modules=defaultKeyStatistics&fundamental=true",
            self.base_url, ticker
        )
    }

    /// Fetch the raw body, mapping transport and status failures.
    async fn fetch(&self, ticker: &Ticker) -> Result<String, SourceError> {
        let mut request = self.client.get(self.quote_url(ticker));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SourceError::unavailable(PROVIDER_ID, e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<BrapiErrorResponse>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_default();
            debug!("{}: {} not found ({})", PROVIDER_ID, ticker, message);
            return Err(SourceError::NotFound {
                provider: PROVIDER_ID.to_string(),
                ticker: ticker.to_string(),
            });
        }

        if !status.is_success() {
            return Err(SourceError::unavailable(
                PROVIDER_ID,
                format!("HTTP error: {}", status),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::unavailable(PROVIDER_ID, e.to_string()))
    }
}

/// Decode a quote body into typed fields.
///
/// Fails closed: a body that does not match the expected shape, or that
/// carries a non-finite number, is [`SourceError::MalformedData`].
pub(crate) fn decode_quote(ticker: &Ticker, body: &str) -> Result<RawPrimaryFields, SourceError> {
    let response: BrapiQuoteResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::malformed(PROVIDER_ID, format!("Failed to parse response: {}", e)))?;

    let result = match response.results.into_iter().next() {
        Some(result) => result,
        None => {
            return Err(SourceError::NotFound {
                provider: PROVIDER_ID.to_string(),
                ticker: ticker.to_string(),
            })
        }
    };

    if let Some(symbol) = &result.symbol {
        if !symbol.eq_ignore_ascii_case(ticker.as_str()) {
            return Err(SourceError::malformed(
                PROVIDER_ID,
                format!("Asked for {} but got {}", ticker, symbol),
            ));
        }
    }

    let (price_to_book, dividend_yield) = match &result.default_key_statistics {
        Some(stats) => (stats.price_to_book, stats.dividend_yield),
        None => (None, None),
    };

    let mut fields = RawPrimaryFields::new(ticker.clone());
    fields.price = finite("regularMarketPrice", result.regular_market_price)?;
    fields.price_to_earnings = finite("priceEarnings", result.price_earnings)?;
    fields.price_to_book = finite("priceToBook", price_to_book)?;
    fields.dividend_yield = finite("dividendYield", dividend_yield)?;

    Ok(fields)
}

fn finite(name: &str, value: Option<f64>) -> Result<Option<f64>, SourceError> {
    match value {
        Some(v) if !v.is_finite() => Err(SourceError::malformed(
            PROVIDER_ID,
            format!("Non-finite value for {}", name),
        )),
        other => Ok(other),
    }
}

#[async_trait]
impl PrimarySource for BrapiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_primary(&self, ticker: &Ticker) -> Result<RawPrimaryFields, SourceError> {
        let body = self.fetch(ticker).await?;
        let fields = decode_quote(ticker, &body)?;
        debug!(
            "{}: {} price={:?} P/L={:?} P/VP={:?} DY={:?}",
            PROVIDER_ID,
            ticker,
            fields.price,
            fields.price_to_earnings,
            fields.price_to_book,
            fields.dividend_yield
        );
        Ok(fields)
    }
}
