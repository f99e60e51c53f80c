//! Source client abstractions and implementations.
//!
//! This module contains:
//! - The `PrimarySource` and `SecondarySource` traits
//! - The brapi JSON provider (primary: price and valuation)
//! - The Fundamentus HTML provider (secondary: profitability and leverage)
//!
//! Providers return typed raw fields and fail closed: anything they cannot
//! decode becomes `SourceError::MalformedData` instead of a default value.

mod http;
mod traits;

pub mod brapi;
pub mod fundamentus;

pub use traits::{PrimarySource, SecondarySource};
