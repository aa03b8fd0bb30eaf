//! Counter store trait backing the failure trackers and the upload rate limiter.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;

/// Trait for keyed failure/usage counters with TTL and block deadlines.
///
/// Backs the login lockout tracker, the second-factor attempt tracker, and
/// the upload rate limiter. The single-process implementation lives in
/// `civiport-cache`; a distributed-cache-backed implementation can replace
/// it without touching the callers, which is why increments are specified
/// here as one atomic operation rather than read-then-write.
#[async_trait]
pub trait CounterStore: Send + Sync + std::fmt::Debug + 'static {
    /// Increment the counter for `key` by 1 as a single atomic operation
    /// and return the new value. Creates the counter at 1 if absent.
    /// The entry expires `ttl` after the most recent increment.
    async fn increment(&self, key: &str, ttl: Duration) -> AppResult<u64>;

    /// Get the current counter value. Returns 0 if the key does not exist
    /// or has expired.
    async fn get(&self, key: &str) -> AppResult<u64>;

    /// Remove the counter and any block deadline for `key`.
    async fn reset(&self, key: &str) -> AppResult<()>;

    /// Record a block deadline for `key`. The deadline outlives the counter
    /// entry and is consulted before any further attempt is allowed.
    async fn set_deadline(&self, key: &str, until: DateTime<Utc>) -> AppResult<()>;

    /// Get the block deadline for `key`, if one is set and still in the
    /// future. Expired deadlines are treated as absent.
    async fn deadline(&self, key: &str) -> AppResult<Option<DateTime<Utc>>>;

    /// Drop expired counters and deadlines. Runs off the request path.
    async fn purge_expired(&self) -> AppResult<u64>;
}
