//! Screening runs.
//!
//! ```text
//! tickers ─► PrimarySource (buffered fan-out)
//!               │
//!               ▼
//!          SecondaryScheduler ─► SecondarySource (cooldown, block guard)
//!               │
//!               ▼
//!      merge ─► ScoringEngine ─► rank ─► RankedResult ─► ResultPublisher
//! ```

pub mod config;
pub mod service;
pub mod traits;

pub use config::{ScreenerConfig, DEFAULT_PRIMARY_CONCURRENCY};
pub use service::{run_screener, Screener};
pub use traits::ResultPublisher;
