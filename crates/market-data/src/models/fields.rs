use serde::{Deserialize, Serialize};

use super::ticker::Ticker;

/// Valuation fields reported by the primary provider.
///
/// Every field is independently optional: a provider `null` stays `None`
/// and is never coerced to zero. Percentages are expressed in percent
/// (`6.5` means 6.5%).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawPrimaryFields {
    pub ticker: Ticker,
    /// Last traded price in BRL.
    pub price: Option<f64>,
    /// P/L: price over earnings per share.
    pub price_to_earnings: Option<f64>,
    /// P/VP: price over book value per share.
    pub price_to_book: Option<f64>,
    /// Trailing twelve month dividend yield, in percent.
    pub dividend_yield: Option<f64>,
}

impl RawPrimaryFields {
    pub fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            price: None,
            price_to_earnings: None,
            price_to_book: None,
            dividend_yield: None,
        }
    }
}

/// Profitability and leverage fields reported by the secondary provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawSecondaryFields {
    pub ticker: Ticker,
    /// Return on equity, in percent.
    pub return_on_equity: Option<f64>,
    /// Return on invested capital, in percent.
    pub return_on_invested_capital: Option<f64>,
    /// Net debt divided by EBITDA. Negative values mean net cash.
    pub net_debt_to_ebitda: Option<f64>,
    /// Gross debt over shareholders' equity. Informational, not scored.
    pub gross_debt_to_equity: Option<f64>,
    /// Revenue growth over the last five years, in percent. Informational.
    pub revenue_growth_5y: Option<f64>,
    /// Average daily traded volume over two months, in BRL. Informational.
    pub avg_daily_volume_2m: Option<f64>,
}

impl RawSecondaryFields {
    pub fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            return_on_equity: None,
            return_on_invested_capital: None,
            net_debt_to_ebitda: None,
            gross_debt_to_equity: None,
            revenue_growth_5y: None,
            avg_daily_volume_2m: None,
        }
    }
}
