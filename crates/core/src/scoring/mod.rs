//! Weighted fundamental scoring.
//!
//! Each rule of the [`ScoringTable`] awards up to its weight for one
//! metric, linearly between a zero-credit boundary and an ideal value.
//! Missing metrics earn nothing. Weights sum to 100, so the total is a
//! score in `[0, 100]`.

pub mod engine;
pub mod model;

pub use engine::{ScoringEngine, DEFAULT_ALERT_THRESHOLD};
pub use model::{
    Classification, Metric, ScoredRecord, ScoringRule, ScoringTable, SubScore,
    ACCEPTABLE_SCORE, EXCELLENT_SCORE, GOOD_SCORE,
};
