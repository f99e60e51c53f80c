//! B3 Screener Market Data Crate
//!
//! This crate provides the source clients for the B3 fundamentalist
//! screener.
//!
//! # Overview
//!
//! - A primary source for price and valuation ratios (brapi)
//! - A secondary source for profitability and leverage ratios (Fundamentus)
//! - A run-scoped scheduler that rate limits the secondary source and
//!   disables it after repeated throttling
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |      Ticker      |  (validated, uppercase)
//! +------------------+
//!          |
//!          +-----------------------------+
//!          v                             v
//! +------------------+         +--------------------+
//! |  PrimarySource   |         | SecondaryScheduler |  (cooldown + block guard)
//! +------------------+         +--------------------+
//!          |                             |
//!          v                             v
//! +------------------+         +--------------------+
//! | RawPrimaryFields |         |  SecondarySource   |
//! +------------------+         +--------------------+
//!                                        |
//!                                        v
//!                              +--------------------+
//!                              | RawSecondaryFields |
//!                              +--------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Ticker`] - Validated B3 symbol
//! - [`RawPrimaryFields`] - Price, P/L, P/VP, DY
//! - [`RawSecondaryFields`] - ROE, ROIC, net debt/EBITDA and informational ratios
//! - [`SourceError`] - Failure taxonomy, classified by [`FailureClass`]

pub mod errors;
pub mod models;
pub mod provider;
pub mod scheduler;

pub use errors::{FailureClass, SourceError};
pub use models::{RawPrimaryFields, RawSecondaryFields, SourceRole, Ticker};

pub use provider::brapi::BrapiProvider;
pub use provider::fundamentus::FundamentusProvider;
pub use provider::{PrimarySource, SecondarySource};

pub use scheduler::{
    BlockGuard, GuardState, SecondaryScheduler, DEFAULT_BLOCK_THRESHOLD,
    DEFAULT_SECONDARY_INTERVAL,
};
