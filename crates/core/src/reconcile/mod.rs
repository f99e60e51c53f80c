//! Reconciliation of primary and secondary source data.
//!
//! - **Models** (`model.rs`) - `CanonicalRecord`, `FieldValue` provenance, `SecondaryStatus`
//! - **Merger** (`merger.rs`) - The field precedence policy

pub mod merger;
pub mod model;

pub use merger::{merge, reject_primary};
pub use model::{CanonicalRecord, FieldValue, SecondaryStatus};
