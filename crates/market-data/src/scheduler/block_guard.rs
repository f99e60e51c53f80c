//! Run-scoped guard that disables a throttling source.
//!
//! A simplified circuit breaker with two states and no recovery:
//!
//! - **Armed**: requests are allowed; consecutive `Blocked` outcomes are counted.
//! - **Tripped**: the threshold was reached; the source stays disabled until
//!   the guard is dropped at the end of the run.
//!
//! Any outcome other than `Blocked` resets the consecutive count.

use std::sync::{Mutex, MutexGuard};

use log::{debug, warn};

/// Default number of consecutive blocks before the source is disabled.
pub const DEFAULT_BLOCK_THRESHOLD: u32 = 3;

/// Guard state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GuardState {
    /// Requests are allowed.
    Armed,
    /// The source is disabled for the rest of the run.
    Tripped,
}

impl std::fmt::Display for GuardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Armed => write!(f, "Armed"),
            Self::Tripped => write!(f, "Tripped"),
        }
    }
}

#[derive(Debug)]
struct Counters {
    state: GuardState,
    consecutive_blocks: u32,
    total_blocks: u32,
}

/// Counts consecutive `Blocked` outcomes for one source within one run.
pub struct BlockGuard {
    counters: Mutex<Counters>,
    threshold: u32,
}

impl BlockGuard {
    /// Create a guard that trips after `threshold` consecutive blocks.
    /// A threshold of zero is treated as one.
    pub fn new(threshold: u32) -> Self {
        Self {
            counters: Mutex::new(Counters {
                state: GuardState::Armed,
                consecutive_blocks: 0,
                total_blocks: 0,
            }),
            threshold: threshold.max(1),
        }
    }

    /// Lock the counters, recovering from poison if necessary.
    fn lock_counters(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(|poisoned| {
            warn!("Block guard mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Whether requests may still be sent.
    pub fn is_allowed(&self) -> bool {
        self.lock_counters().state == GuardState::Armed
    }

    /// Record a `Blocked` outcome.
    ///
    /// Returns true when this call tripped the guard.
    pub fn record_blocked(&self, provider: &str) -> bool {
        let mut counters = self.lock_counters();
        counters.total_blocks += 1;

        if counters.state == GuardState::Tripped {
            return false;
        }

        counters.consecutive_blocks += 1;
        if counters.consecutive_blocks >= self.threshold {
            warn!(
                "Block guard: disabling '{}' for the rest of the run after {} consecutive blocks",
                provider, counters.consecutive_blocks
            );
            counters.state = GuardState::Tripped;
            true
        } else {
            debug!(
                "Block guard: '{}' blocked ({}/{})",
                provider, counters.consecutive_blocks, self.threshold
            );
            false
        }
    }

    /// Record any outcome that is not `Blocked`.
    pub fn record_unblocked(&self) {
        let mut counters = self.lock_counters();
        if counters.state == GuardState::Armed {
            counters.consecutive_blocks = 0;
        }
    }

    pub fn state(&self) -> GuardState {
        self.lock_counters().state
    }

    pub fn consecutive_blocks(&self) -> u32 {
        self.lock_counters().consecutive_blocks
    }

    /// Blocks seen during the run, including any after tripping.
    pub fn total_blocks(&self) -> u32 {
        self.lock_counters().total_blocks
    }
}

impl Default for BlockGuard {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_guard_is_armed() {
        let guard = BlockGuard::default();
        assert_eq!(guard.state(), GuardState::Armed);
        assert!(guard.is_allowed());
        assert_eq!(guard.consecutive_blocks(), 0);
    }

    #[test]
    fn test_trips_after_three_consecutive_blocks() {
        let guard = BlockGuard::default();

        assert!(!guard.record_blocked("FUNDAMENTUS"));
        assert!(!guard.record_blocked("FUNDAMENTUS"));
        assert!(guard.is_allowed());

        assert!(guard.record_blocked("FUNDAMENTUS"));
        assert_eq!(guard.state(), GuardState::Tripped);
        assert!(!guard.is_allowed());
    }

    #[test]
    fn test_unblocked_outcome_resets_count() {
        let guard = BlockGuard::default();

        guard.record_blocked("FUNDAMENTUS");
        guard.record_blocked("FUNDAMENTUS");
        guard.record_unblocked();
        assert_eq!(guard.consecutive_blocks(), 0);

        guard.record_blocked("FUNDAMENTUS");
        guard.record_blocked("FUNDAMENTUS");
        assert!(guard.is_allowed());
        assert_eq!(guard.total_blocks(), 4);
    }

    #[test]
    fn test_tripped_guard_never_recovers() {
        let guard = BlockGuard::new(1);

        assert!(guard.record_blocked("FUNDAMENTUS"));
        guard.record_unblocked();
        assert!(!guard.is_allowed());
        assert!(!guard.record_blocked("FUNDAMENTUS"));
    }

    #[test]
    fn test_zero_threshold_acts_as_one() {
        let guard = BlockGuard::new(0);
        assert!(guard.record_blocked("FUNDAMENTUS"));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(GuardState::Armed.to_string(), "Armed");
        assert_eq!(GuardState::Tripped.to_string(), "Tripped");
    }
}
