//! B3 Screener Core - Reconciliation, scoring and ranking.
//!
//! This crate turns the raw per-source fields produced by
//! `b3-screener-market-data` into a ranked list of scored stocks.
//! It performs no I/O of its own beyond calling the source traits it is
//! given, and leaves publishing to [`ResultPublisher`] implementations.
//!
//! - **Reconcile** (`reconcile/`) - Provenance-tagged canonical records
//! - **Scoring** (`scoring/`) - Rule table and the pure scoring engine
//! - **Ranking** (`ranking/`) - Ordering, alerts, summary and result rows
//! - **Screener** (`screener/`) - Run configuration and the pipeline

pub mod errors;
pub mod ranking;
pub mod reconcile;
pub mod scoring;
pub mod screener;

pub use errors::{ConfigError, MergeError, PublishError, Result, ScreenerError};
pub use ranking::{rank, ExcludedTicker, RankedResult, ResultRow, RunSummary};
pub use reconcile::{merge, CanonicalRecord, FieldValue, SecondaryStatus};
pub use scoring::{
    Classification, Metric, ScoredRecord, ScoringEngine, ScoringRule, ScoringTable, SubScore,
};
pub use screener::{run_screener, ResultPublisher, Screener, ScreenerConfig};
