//! Secondary-source scheduling.
//!
//! This module provides the run-scoped pieces that protect the secondary
//! provider:
//! - Cooldown between dispatches (`SecondaryScheduler`)
//! - Run-wide disable after consecutive blocks (`BlockGuard`)

mod block_guard;
mod secondary;

pub use block_guard::{BlockGuard, GuardState, DEFAULT_BLOCK_THRESHOLD};
pub use secondary::{SecondaryScheduler, DEFAULT_SECONDARY_INTERVAL};
