use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{Classification, ScoredRecord, GOOD_SCORE};

/// A ticker that produced no scored record, with the reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedTicker {
    pub ticker: String,
    pub reason: String,
}

impl ExcludedTicker {
    pub fn new(ticker: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            reason: reason.into(),
        }
    }
}

/// The outcome of one screening run.
///
/// `records` is ordered by descending score, ties by ascending ticker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub records: Vec<ScoredRecord>,
    pub excluded: Vec<ExcludedTicker>,
    /// The secondary source was switched off after repeated blocks.
    pub secondary_disabled: bool,
    pub alert_threshold: u8,
    pub generated_at: DateTime<Utc>,
}

impl RankedResult {
    /// Records flagged as alerts, in ranking order.
    pub fn alerts(&self) -> impl Iterator<Item = &ScoredRecord> {
        self.records.iter().filter(|r| r.alert)
    }

    pub fn top(&self, n: usize) -> &[ScoredRecord] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            analyzed: self.records.len(),
            approved: self
                .records
                .iter()
                .filter(|r| r.score >= GOOD_SCORE)
                .count(),
            alerts: self.alerts().count(),
            excluded: self.excluded.len(),
        }
    }

    /// Flat rows for publishers, in ranking order.
    pub fn rows(&self) -> Vec<ResultRow> {
        self.records.iter().map(ResultRow::from).collect()
    }
}

/// Run totals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub analyzed: usize,
    /// Records scoring at least `GOOD_SCORE`.
    pub approved: usize,
    pub alerts: usize,
    pub excluded: usize,
}

/// One line of published output. Missing values are `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub ticker: String,
    pub score: u8,
    pub classification: Classification,
    pub price: Option<f64>,
    pub price_to_earnings: Option<f64>,
    pub price_to_book: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub return_on_invested_capital: Option<f64>,
    pub net_debt_to_ebitda: Option<f64>,
    pub gross_debt_to_equity: Option<f64>,
    pub highlight: bool,
}

impl From<&ScoredRecord> for ResultRow {
    fn from(scored: &ScoredRecord) -> Self {
        let r = &scored.record;
        Self {
            ticker: r.ticker.to_string(),
            score: scored.score,
            classification: scored.classification,
            price: r.price.value(),
            price_to_earnings: r.price_to_earnings.value(),
            price_to_book: r.price_to_book.value(),
            dividend_yield: r.dividend_yield.value(),
            return_on_equity: r.return_on_equity.value(),
            return_on_invested_capital: r.return_on_invested_capital.value(),
            net_debt_to_ebitda: r.net_debt_to_ebitda.value(),
            gross_debt_to_equity: r.gross_debt_to_equity.value(),
            highlight: scored.alert,
        }
    }
}
