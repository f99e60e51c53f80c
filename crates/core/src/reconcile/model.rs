use serde::{Deserialize, Serialize};

use b3_screener_market_data::{FailureClass, SourceError, SourceRole, Ticker};

/// A metric value tagged with where it came from.
///
/// `Missing` means no source produced a value. It is distinct from
/// `Sourced { value: 0.0, .. }`: zero is a legitimate reading for several
/// metrics (a company with no net debt, for instance).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provenance", rename_all = "snake_case")]
pub enum FieldValue {
    Sourced { value: f64, source: SourceRole },
    Missing,
}

impl FieldValue {
    /// Tag an optional provider value. Non-finite numbers are not values.
    pub fn from_source(value: Option<f64>, source: SourceRole) -> Self {
        match value {
            Some(v) if v.is_finite() => Self::Sourced { value: v, source },
            _ => Self::Missing,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Sourced { value, .. } => Some(*value),
            Self::Missing => None,
        }
    }

    pub fn source(&self) -> Option<SourceRole> {
        match self {
            Self::Sourced { source, .. } => Some(*source),
            Self::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// What happened to the secondary fetch for a ticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryStatus {
    /// The secondary source answered with fields.
    Fetched,
    /// The secondary source throttled this request.
    Blocked,
    /// The secondary source does not know the ticker.
    NotFound,
    /// The secondary source failed or returned undecodable data.
    Unavailable,
    /// The secondary source was disabled earlier in the run.
    Disabled,
}

impl SecondaryStatus {
    pub fn from_error(error: &SourceError) -> Self {
        match error.class() {
            FailureClass::Throttled => Self::Blocked,
            FailureClass::Absent => Self::NotFound,
            FailureClass::Skipped => Self::Disabled,
            FailureClass::Unavailable | FailureClass::Rejected => Self::Unavailable,
        }
    }
}

/// The reconciled, provenance-tagged fact set for one ticker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub ticker: Ticker,

    // Primary source
    pub price: FieldValue,
    pub price_to_earnings: FieldValue,
    pub price_to_book: FieldValue,
    pub dividend_yield: FieldValue,

    // Secondary source
    pub return_on_equity: FieldValue,
    pub return_on_invested_capital: FieldValue,
    pub net_debt_to_ebitda: FieldValue,
    pub gross_debt_to_equity: FieldValue,
    pub revenue_growth_5y: FieldValue,
    pub avg_daily_volume_2m: FieldValue,

    pub secondary_status: SecondaryStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_sourced() {
        let field = FieldValue::from_source(Some(0.0), SourceRole::Secondary);
        assert_eq!(field.value(), Some(0.0));
        assert_eq!(field.source(), Some(SourceRole::Secondary));
        assert!(!field.is_missing());
    }

    #[test]
    fn test_none_and_nan_are_missing() {
        assert!(FieldValue::from_source(None, SourceRole::Primary).is_missing());
        assert!(FieldValue::from_source(Some(f64::NAN), SourceRole::Primary).is_missing());
        assert!(FieldValue::from_source(Some(f64::INFINITY), SourceRole::Primary).is_missing());
    }

    #[test]
    fn test_field_value_serialization() {
        let sourced = FieldValue::from_source(Some(12.5), SourceRole::Secondary);
        assert_eq!(
            serde_json::to_string(&sourced).unwrap(),
            r#"{"provenance":"sourced","value":12.5,"source":"secondary"}"#
        );
        assert_eq!(
            serde_json::to_string(&FieldValue::Missing).unwrap(),
            r#"{"provenance":"missing"}"#
        );
    }

    #[test]
    fn test_secondary_status_from_error() {
        let blocked = SourceError::Blocked {
            provider: "FUNDAMENTUS".to_string(),
        };
        assert_eq!(SecondaryStatus::from_error(&blocked), SecondaryStatus::Blocked);

        let disabled = SourceError::Disabled {
            provider: "FUNDAMENTUS".to_string(),
        };
        assert_eq!(SecondaryStatus::from_error(&disabled), SecondaryStatus::Disabled);

        let not_found = SourceError::NotFound {
            provider: "FUNDAMENTUS".to_string(),
            ticker: "XPTO3".to_string(),
        };
        assert_eq!(SecondaryStatus::from_error(&not_found), SecondaryStatus::NotFound);
    }
}
