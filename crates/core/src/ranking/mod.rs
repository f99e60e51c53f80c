//! Ranking of scored records and the alert selection.

pub mod model;
pub mod ranker;

pub use model::{ExcludedTicker, RankedResult, ResultRow, RunSummary};
pub use ranker::rank;
