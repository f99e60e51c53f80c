use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::SourceError;

/// Longest symbol accepted (units like `TAEE11` are six characters, some
/// fractional or BDR codes are longer).
const MAX_TICKER_LEN: usize = 12;

/// A validated, uppercase B3 ticker symbol.
///
/// Construct with [`Ticker::parse`]; the inner string is always non-empty,
/// trimmed and ASCII-uppercase.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Validate and normalize a raw symbol.
    ///
    /// ```
    /// use b3_screener_market_data::Ticker;
    ///
    /// let ticker = Ticker::parse(" petr4 ").unwrap();
    /// assert_eq!(ticker.as_str(), "PETR4");
    /// assert!(Ticker::parse("   ").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, SourceError> {
        let symbol = raw.trim().to_ascii_uppercase();

        if symbol.is_empty() {
            return Err(SourceError::InvalidTicker {
                ticker: raw.to_string(),
                reason: "empty symbol".to_string(),
            });
        }
        if symbol.len() > MAX_TICKER_LEN {
            return Err(SourceError::InvalidTicker {
                ticker: raw.to_string(),
                reason: format!("longer than {} characters", MAX_TICKER_LEN),
            });
        }
        if !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SourceError::InvalidTicker {
                ticker: raw.to_string(),
                reason: "only letters and digits are allowed".to_string(),
            });
        }

        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Ticker {
    type Error = SourceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
