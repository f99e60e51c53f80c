//! Cooldown scheduler for secondary-source requests.
//!
//! Every secondary fetch in a run goes through one [`SecondaryScheduler`].
//! It owns the single "last dispatch" instant and the run's [`BlockGuard`],
//! and is shared by reference with whatever issues secondary fetches.

use std::time::Duration;

use log::{debug, info};
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

use super::block_guard::{BlockGuard, DEFAULT_BLOCK_THRESHOLD};
use crate::errors::{FailureClass, SourceError};
use crate::models::{RawSecondaryFields, Ticker};
use crate::provider::SecondarySource;

/// Default minimum delay between two secondary dispatches.
pub const DEFAULT_SECONDARY_INTERVAL: Duration = Duration::from_secs(3);

/// Serializes secondary requests with a fixed cooldown.
///
/// The dispatch lock is held while waiting out the cooldown, so concurrent
/// callers queue behind each other and no two requests can pass the check
/// together. The lock is released before the request itself runs.
pub struct SecondaryScheduler {
    min_interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
    guard: BlockGuard,
}

impl SecondaryScheduler {
    pub fn new(min_interval: Duration, block_threshold: u32) -> Self {
        Self {
            min_interval,
            last_dispatch: Mutex::new(None),
            guard: BlockGuard::new(block_threshold),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Whether the secondary source was disabled by consecutive blocks.
    pub fn is_disabled(&self) -> bool {
        !self.guard.is_allowed()
    }

    pub fn block_guard(&self) -> &BlockGuard {
        &self.guard
    }

    /// Wait for the next dispatch slot and claim it.
    ///
    /// Returns false without claiming a slot when the source has been
    /// disabled, including while this caller was queued.
    async fn claim_slot(&self) -> bool {
        let mut last_dispatch = self.last_dispatch.lock().await;

        if !self.guard.is_allowed() {
            return false;
        }

        if let Some(last) = *last_dispatch {
            let ready_at = last + self.min_interval;
            if ready_at > Instant::now() {
                debug!(
                    "Secondary scheduler: waiting {:?} before next dispatch",
                    ready_at - Instant::now()
                );
                sleep_until(ready_at).await;
            }
        }

        if !self.guard.is_allowed() {
            return false;
        }

        *last_dispatch = Some(Instant::now());
        true
    }

    /// Fetch secondary fields for `ticker` through the cooldown.
    ///
    /// Returns [`SourceError::Disabled`] without touching the network once
    /// the block guard has tripped.
    pub async fn fetch(
        &self,
        source: &dyn SecondarySource,
        ticker: &Ticker,
    ) -> Result<RawSecondaryFields, SourceError> {
        if !self.claim_slot().await {
            return Err(SourceError::Disabled {
                provider: source.id().to_string(),
            });
        }

        let result = source.fetch_secondary(ticker).await;

        match &result {
            Err(e) if e.class() == FailureClass::Throttled => {
                if self.guard.record_blocked(source.id()) {
                    info!(
                        "Secondary source '{}' disabled after {} at {}",
                        source.id(),
                        e,
                        ticker
                    );
                }
            }
            _ => self.guard.record_unblocked(),
        }

        result
    }
}

impl Default for SecondaryScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_SECONDARY_INTERVAL, DEFAULT_BLOCK_THRESHOLD)
    }
}
