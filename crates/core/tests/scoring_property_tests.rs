//! Property-based tests for scoring and ranking.
//!
//! These tests check the invariants that must hold for any canonical
//! record, using the `proptest` crate for random test case generation.

use b3_screener_core::ranking::rank;
use b3_screener_core::reconcile::merge;
use b3_screener_core::scoring::{Classification, ScoredRecord, ScoringEngine};
use b3_screener_core::CanonicalRecord;
use b3_screener_market_data::{RawPrimaryFields, RawSecondaryFields, SourceError, Ticker};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

/// A metric value that may be missing, including negatives and outliers.
fn arb_metric() -> impl Strategy<Value = Option<f64>> {
    proptest::option::of(prop_oneof![
        -50.0f64..0.0,
        0.0f64..40.0,
        40.0f64..1000.0,
        Just(0.0),
    ])
}

/// A B3-shaped ticker symbol.
fn arb_symbol() -> impl Strategy<Value = String> {
    "[A-Z]{4}(3|4|11)"
}

/// Generates a canonical record with random field availability.
fn arb_record() -> impl Strategy<Value = CanonicalRecord> {
    (
        arb_symbol(),
        arb_metric(),
        arb_metric(),
        arb_metric(),
        arb_metric(),
        arb_metric(),
        arb_metric(),
        any::<bool>(),
    )
        .prop_map(|(symbol, pl, pvp, dy, roe, roic, debt, blocked)| {
            let ticker = Ticker::parse(&symbol).unwrap();
            let mut primary = RawPrimaryFields::new(ticker.clone());
            primary.price = Some(10.0);
            primary.price_to_earnings = pl;
            primary.price_to_book = pvp;
            primary.dividend_yield = dy;

            let secondary = if blocked {
                Err(SourceError::Blocked {
                    provider: "FUNDAMENTUS".to_string(),
                })
            } else {
                let mut fields = RawSecondaryFields::new(ticker);
                fields.return_on_equity = roe;
                fields.return_on_invested_capital = roic;
                fields.net_debt_to_ebitda = debt;
                Ok(fields)
            };

            merge(Ok(primary), secondary).unwrap()
        })
}

fn arb_scored_records(max: usize) -> impl Strategy<Value = Vec<ScoredRecord>> {
    proptest::collection::vec(arb_record(), 0..=max).prop_map(|records| {
        let engine = ScoringEngine::default();
        // One record per ticker, as within a run.
        let mut seen = std::collections::HashSet::new();
        records
            .into_iter()
            .filter(|r| seen.insert(r.ticker.clone()))
            .map(|r| engine.score(r))
            .collect()
    })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Scoring the same record twice gives identical results.
    #[test]
    fn prop_score_is_deterministic(record in arb_record()) {
        let engine = ScoringEngine::default();
        prop_assert_eq!(engine.score(record.clone()), engine.score(record));
    }

    /// The total lies in [0, 100] and equals the sum of the sub-scores.
    #[test]
    fn prop_sub_scores_sum_to_total(record in arb_record()) {
        let scored = ScoringEngine::default().score(record);
        let sum: u32 = scored.sub_scores.iter().map(|s| u32::from(s.points)).sum();

        prop_assert!(scored.score <= 100);
        prop_assert_eq!(sum, u32::from(scored.score));
        for sub in &scored.sub_scores {
            prop_assert!(sub.points <= sub.weight);
        }
    }

    /// A missing metric never earns points.
    #[test]
    fn prop_missing_metric_earns_nothing(record in arb_record()) {
        let scored = ScoringEngine::default().score(record);
        for sub in &scored.sub_scores {
            if sub.metric.read(&scored.record).is_missing() {
                prop_assert_eq!(sub.points, 0);
            }
        }
    }

    /// Alert and classification follow the total.
    #[test]
    fn prop_alert_matches_threshold(record in arb_record()) {
        let scored = ScoringEngine::default().score(record);
        prop_assert_eq!(scored.alert, scored.score >= 80);
        prop_assert_eq!(scored.classification, Classification::from_score(scored.score));
    }

    /// Ranking is sorted by score, then ticker, and alerts are a
    /// subsequence of it.
    #[test]
    fn prop_ranking_order(records in arb_scored_records(20)) {
        let count = records.len();
        let result = rank(records, vec![], false, &ScoringEngine::default());
        prop_assert_eq!(result.records.len(), count);

        for pair in result.records.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.score > b.score
                    || (a.score == b.score && a.ticker().as_str() < b.ticker().as_str())
            );
        }

        let expected: Vec<&str> = result
            .records
            .iter()
            .filter(|r| r.alert)
            .map(|r| r.ticker().as_str())
            .collect();
        let alerts: Vec<&str> = result.alerts().map(|r| r.ticker().as_str()).collect();
        prop_assert_eq!(alerts, expected);
    }
}
