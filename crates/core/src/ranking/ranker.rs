use chrono::Utc;

use super::model::{ExcludedTicker, RankedResult};
use crate::scoring::{ScoredRecord, ScoringEngine};

/// Order scored records by descending score, ties by ascending ticker.
///
/// `engine` is the one that scored `records`; the result reports its alert
/// threshold. The order is total because tickers are unique within a run.
pub fn rank(
    mut records: Vec<ScoredRecord>,
    excluded: Vec<ExcludedTicker>,
    secondary_disabled: bool,
    engine: &ScoringEngine,
) -> RankedResult {
    records.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.ticker().as_str().cmp(b.ticker().as_str()))
    });

    RankedResult {
        records,
        excluded,
        secondary_disabled,
        alert_threshold: engine.alert_threshold(),
        generated_at: Utc::now(),
    }
}
