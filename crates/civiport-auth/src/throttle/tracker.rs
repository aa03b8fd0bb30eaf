//! Counter-based attempt tracker with a fixed-duration block.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::warn;

use civiport_core::result::AppResult;
use civiport_core::traits::counter::CounterStore;

/// Whether a key is currently blocked, and for how much longer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStatus {
    /// True while a block deadline is in the future.
    pub blocked: bool,
    /// Whole minutes until the block ends (rounded up), 0 when not blocked.
    pub remaining_minutes: i64,
}

/// Result of recording one failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureOutcome {
    /// True when this failure crossed the threshold and triggered a block.
    pub blocked: bool,
    /// Attempts left before a block, 0 when blocked.
    pub remaining_attempts: u32,
    /// Configured block duration in minutes.
    pub lockout_minutes: u64,
}

/// Tracks consecutive failures per key and blocks the key for a fixed
/// window once the threshold is crossed. Any success resets the count.
///
/// The password tracker and the second-factor tracker are two instances of
/// this type with distinct key prefixes, thresholds, and windows, so
/// exhausting one budget never consumes the other.
#[derive(Debug, Clone)]
pub struct AttemptTracker {
    /// Shared counter store. In-memory for a single instance; a
    /// distributed store preserves correctness across instances.
    store: Arc<dyn CounterStore>,
    /// Key namespace, e.g. `"login"` or `"2fa"`.
    prefix: &'static str,
    /// Failures allowed before a block.
    max_attempts: u32,
    /// Block duration in minutes.
    lockout_minutes: u64,
}

impl AttemptTracker {
    /// Creates a tracker over the given store and policy.
    pub fn new(
        store: Arc<dyn CounterStore>,
        prefix: &'static str,
        max_attempts: u32,
        lockout_minutes: u64,
    ) -> Self {
        Self {
            store,
            prefix,
            max_attempts,
            lockout_minutes,
        }
    }

    fn key(&self, account_key: &str) -> String {
        format!("{}:{}", self.prefix, account_key)
    }

    /// Failure counters fade once no new failure arrives for the length of
    /// a full lockout window.
    fn counter_ttl(&self) -> Duration {
        Duration::from_secs(self.lockout_minutes * 60)
    }

    /// Check whether the key is currently blocked.
    pub async fn check_blocked(&self, account_key: &str) -> AppResult<BlockStatus> {
        let key = self.key(account_key);
        match self.store.deadline(&key).await? {
            Some(until) => Ok(BlockStatus {
                blocked: true,
                remaining_minutes: remaining_minutes(until, Utc::now()),
            }),
            None => Ok(BlockStatus {
                blocked: false,
                remaining_minutes: 0,
            }),
        }
    }

    /// Record one failure. Crossing the threshold blocks the key for the
    /// configured window and clears the counter, so the count restarts
    /// from zero once the window ends.
    pub async fn record_failure(&self, account_key: &str) -> AppResult<FailureOutcome> {
        let key = self.key(account_key);
        let count = self.store.increment(&key, self.counter_ttl()).await?;

        if count >= u64::from(self.max_attempts) {
            let until = Utc::now() + chrono::Duration::minutes(self.lockout_minutes as i64);
            // Reset first: reset() also clears any stale deadline.
            self.store.reset(&key).await?;
            self.store.set_deadline(&key, until).await?;

            warn!(
                tracker = self.prefix,
                key = account_key,
                lockout_minutes = self.lockout_minutes,
                "Failure threshold crossed, key blocked"
            );

            return Ok(FailureOutcome {
                blocked: true,
                remaining_attempts: 0,
                lockout_minutes: self.lockout_minutes,
            });
        }

        Ok(FailureOutcome {
            blocked: false,
            remaining_attempts: self.max_attempts - count as u32,
            lockout_minutes: self.lockout_minutes,
        })
    }

    /// Reset the key after a success: counter and any block are cleared.
    pub async fn reset(&self, account_key: &str) -> AppResult<()> {
        self.store.reset(&self.key(account_key)).await
    }
}

/// Whole minutes until `until`, rounded up, never negative.
fn remaining_minutes(until: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (until - now).num_seconds().max(0);
    (seconds as u64).div_ceil(60) as i64
}
