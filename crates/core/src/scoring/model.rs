use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::reconcile::{CanonicalRecord, FieldValue};

/// Score at or above which a record is classified as excellent.
pub const EXCELLENT_SCORE: u8 = 80;
/// Score at or above which a record is classified as good.
pub const GOOD_SCORE: u8 = 60;
/// Score at or above which a record is classified as acceptable.
pub const ACCEPTABLE_SCORE: u8 = 40;

/// A scorable metric of the canonical record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    PriceToEarnings,
    PriceToBook,
    DividendYield,
    ReturnOnEquity,
    ReturnOnInvestedCapital,
    NetDebtToEbitda,
}

impl Metric {
    /// Short label as used on the B3 market (`P/L`, `P/VP`, ...).
    pub fn label(&self) -> &'static str {
        match self {
            Self::PriceToEarnings => "P/L",
            Self::PriceToBook => "P/VP",
            Self::DividendYield => "DY",
            Self::ReturnOnEquity => "ROE",
            Self::ReturnOnInvestedCapital => "ROIC",
            Self::NetDebtToEbitda => "DL/EBITDA",
        }
    }

    /// The record field this metric reads.
    pub fn read(&self, record: &CanonicalRecord) -> FieldValue {
        match self {
            Self::PriceToEarnings => record.price_to_earnings,
            Self::PriceToBook => record.price_to_book,
            Self::DividendYield => record.dividend_yield,
            Self::ReturnOnEquity => record.return_on_equity,
            Self::ReturnOnInvestedCapital => record.return_on_invested_capital,
            Self::NetDebtToEbitda => record.net_debt_to_ebitda,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the scoring table.
///
/// Full `weight` is earned when the value is at `ideal` or better, nothing
/// at `zero_credit` or worse, and a linear share in between. The direction
/// follows from the two boundaries: a `zero_credit` above `ideal` means
/// lower values are better.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRule {
    pub metric: Metric,
    pub ideal: f64,
    pub zero_credit: f64,
    pub weight: u8,
    /// Values at or below zero earn nothing (negative earnings or equity).
    #[serde(default)]
    pub positive_only: bool,
}

impl ScoringRule {
    pub fn new(metric: Metric, ideal: f64, zero_credit: f64, weight: u8) -> Self {
        Self {
            metric,
            ideal,
            zero_credit,
            weight,
            positive_only: false,
        }
    }

    pub fn positive_only(mut self) -> Self {
        self.positive_only = true;
        self
    }

    pub fn lower_is_better(&self) -> bool {
        self.zero_credit > self.ideal
    }

    /// Unrounded points earned by `value`, in `[0, weight]`.
    ///
    /// A missing value earns nothing.
    pub fn credit(&self, value: Option<f64>) -> f64 {
        let Some(v) = value else {
            return 0.0;
        };
        if !v.is_finite() || (self.positive_only && v <= 0.0) {
            return 0.0;
        }

        let fraction = if self.lower_is_better() {
            if v <= self.ideal {
                1.0
            } else if v >= self.zero_credit {
                0.0
            } else {
                (self.zero_credit - v) / (self.zero_credit - self.ideal)
            }
        } else if v >= self.ideal {
            1.0
        } else if v <= self.zero_credit {
            0.0
        } else {
            (v - self.zero_credit) / (self.ideal - self.zero_credit)
        };

        f64::from(self.weight) * fraction
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidRule {
            metric: self.metric.to_string(),
            reason: reason.to_string(),
        };

        if !self.ideal.is_finite() || !self.zero_credit.is_finite() {
            return Err(invalid("thresholds must be finite"));
        }
        if self.ideal == self.zero_credit {
            return Err(invalid("ideal and zero-credit thresholds must differ"));
        }
        Ok(())
    }
}

/// The weighted rule table. Weights sum to 100.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringTable {
    rules: Vec<ScoringRule>,
}

impl ScoringTable {
    /// Build a table, checking it before use.
    pub fn new(rules: Vec<ScoringRule>) -> Result<Self, ConfigError> {
        let table = Self { rules };
        table.validate()?;
        Ok(table)
    }

    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }

    /// Check rule count, metric uniqueness, thresholds and the weight sum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.is_empty() {
            return Err(ConfigError::EmptyTable);
        }

        let mut seen = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            if seen.contains(&rule.metric) {
                return Err(ConfigError::DuplicateMetric(rule.metric.to_string()));
            }
            seen.push(rule.metric);
            rule.validate()?;
        }

        let total: u32 = self.rules.iter().map(|r| u32::from(r.weight)).sum();
        if total != 100 {
            return Err(ConfigError::WeightSum(total));
        }
        Ok(())
    }
}

impl Default for ScoringTable {
    /// P/L 20, P/VP 20, DY 25, ROE 25, net debt/EBITDA 10.
    fn default() -> Self {
        Self {
            rules: vec![
                ScoringRule::new(Metric::PriceToEarnings, 15.0, 30.0, 20).positive_only(),
                ScoringRule::new(Metric::PriceToBook, 1.5, 3.0, 20).positive_only(),
                ScoringRule::new(Metric::DividendYield, 4.0, 0.0, 25),
                ScoringRule::new(Metric::ReturnOnEquity, 12.0, 0.0, 25),
                ScoringRule::new(Metric::NetDebtToEbitda, 3.0, 6.0, 10),
            ],
        }
    }
}

/// Points earned on one criterion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScore {
    pub metric: Metric,
    pub weight: u8,
    pub points: u8,
}

/// Score band used for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Speculative,
    Acceptable,
    Good,
    Excellent,
}

impl Classification {
    pub fn from_score(score: u8) -> Self {
        if score >= EXCELLENT_SCORE {
            Self::Excellent
        } else if score >= GOOD_SCORE {
            Self::Good
        } else if score >= ACCEPTABLE_SCORE {
            Self::Acceptable
        } else {
            Self::Speculative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Acceptable => "ACCEPTABLE",
            Self::Speculative => "SPECULATIVE",
        }
    }
}

/// A canonical record with its score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: CanonicalRecord,
    /// Total in `[0, 100]`; always the sum of `sub_scores`.
    pub score: u8,
    pub sub_scores: Vec<SubScore>,
    pub alert: bool,
    pub classification: Classification,
}

impl ScoredRecord {
    pub fn ticker(&self) -> &b3_screener_market_data::Ticker {
        &self.record.ticker
    }
}
