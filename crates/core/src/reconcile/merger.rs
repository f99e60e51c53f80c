//! Field-level merge of primary and secondary source data.

use log::{debug, warn};

use b3_screener_market_data::{RawPrimaryFields, RawSecondaryFields, SourceError, SourceRole};

use super::model::{CanonicalRecord, FieldValue, SecondaryStatus};
use crate::errors::MergeError;

/// Map a failed primary fetch to the reason the ticker cannot be merged.
pub fn reject_primary(error: SourceError) -> MergeError {
    match error {
        SourceError::NotFound { ticker, .. } => MergeError::UnknownTicker(ticker),
        other => MergeError::PrimaryUnavailable(other),
    }
}

/// Build the canonical record for one ticker.
///
/// Precedence is fixed per field: price, P/L, P/VP and DY only ever come
/// from the primary source; ROE, ROIC and the debt ratios only ever come
/// from the secondary source. A failed secondary fetch, or a secondary
/// payload for another ticker, leaves its fields `Missing` and records why
/// in `secondary_status`. Only a failed primary fetch fails the merge.
pub fn merge(
    primary: Result<RawPrimaryFields, SourceError>,
    secondary: Result<RawSecondaryFields, SourceError>,
) -> Result<CanonicalRecord, MergeError> {
    let primary = primary.map_err(reject_primary)?;

    let (secondary, secondary_status) = match secondary {
        Ok(fields) if fields.ticker != primary.ticker => {
            warn!(
                "{}: discarding secondary data addressed to {}",
                primary.ticker, fields.ticker
            );
            (None, SecondaryStatus::Unavailable)
        }
        Ok(fields) => (Some(fields), SecondaryStatus::Fetched),
        Err(e) => {
            debug!("{}: merging without secondary data ({})", primary.ticker, e);
            (None, SecondaryStatus::from_error(&e))
        }
    };

    let from_primary = |value: Option<f64>| FieldValue::from_source(value, SourceRole::Primary);
    let from_secondary = |pick: fn(&RawSecondaryFields) -> Option<f64>| {
        FieldValue::from_source(secondary.as_ref().and_then(pick), SourceRole::Secondary)
    };

    Ok(CanonicalRecord {
        price: from_primary(primary.price),
        price_to_earnings: from_primary(primary.price_to_earnings),
        price_to_book: from_primary(primary.price_to_book),
        dividend_yield: from_primary(primary.dividend_yield),
        return_on_equity: from_secondary(|s| s.return_on_equity),
        return_on_invested_capital: from_secondary(|s| s.return_on_invested_capital),
        net_debt_to_ebitda: from_secondary(|s| s.net_debt_to_ebitda),
        gross_debt_to_equity: from_secondary(|s| s.gross_debt_to_equity),
        revenue_growth_5y: from_secondary(|s| s.revenue_growth_5y),
        avg_daily_volume_2m: from_secondary(|s| s.avg_daily_volume_2m),
        secondary_status,
        ticker: primary.ticker,
    })
}
