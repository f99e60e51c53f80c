//! Source data models
//!
//! This module contains the raw per-ticker data types produced by the
//! source clients:
//! - `types` - Which side of the reconciliation a value came from (SourceRole)
//! - `ticker` - Validated B3 ticker symbol (Ticker)
//! - `fields` - Raw provider payloads (RawPrimaryFields, RawSecondaryFields)

mod fields;
mod ticker;
mod types;

pub use fields::{RawPrimaryFields, RawSecondaryFields};
pub use ticker::Ticker;
pub use types::SourceRole;
