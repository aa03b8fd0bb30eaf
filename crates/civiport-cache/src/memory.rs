//! In-memory counter store built on dashmap.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use civiport_core::result::AppResult;
use civiport_core::traits::counter::CounterStore;

/// A keyed counter with an expiry attached to the most recent increment.
#[derive(Debug, Clone, Copy)]
struct CounterEntry {
    count: u64,
    expires_at: DateTime<Utc>,
}

/// In-memory counter store keyed by account/user identifier.
///
/// Increments go through the dashmap entry API, which holds the shard lock
/// for the whole read-modify-write, so concurrent failures against the
/// same key never under-count.
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    /// key → counter with TTL.
    counters: DashMap<String, CounterEntry>,
    /// key → block deadline.
    deadlines: DashMap<String, DateTime<Utc>>,
}

impl MemoryCounterStore {
    /// Create an empty counter store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn increment(&self, key: &str, ttl: Duration) -> AppResult<u64> {
        let now = Utc::now();
        let ttl = chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::hours(1));

        let mut entry = self.counters.entry(key.to_string()).or_insert(CounterEntry {
            count: 0,
            expires_at: now,
        });

        // Expired entries restart from zero.
        if entry.expires_at <= now {
            entry.count = 0;
        }
        entry.count += 1;
        entry.expires_at = now + ttl;

        Ok(entry.count)
    }

    async fn get(&self, key: &str) -> AppResult<u64> {
        let now = Utc::now();
        Ok(self
            .counters
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.count)
            .unwrap_or(0))
    }

    async fn reset(&self, key: &str) -> AppResult<()> {
        self.counters.remove(key);
        self.deadlines.remove(key);
        Ok(())
    }

    async fn set_deadline(&self, key: &str, until: DateTime<Utc>) -> AppResult<()> {
        self.deadlines.insert(key.to_string(), until);
        Ok(())
    }

    async fn deadline(&self, key: &str) -> AppResult<Option<DateTime<Utc>>> {
        let now = Utc::now();
        Ok(self
            .deadlines
            .get(key)
            .map(|until| *until)
            .filter(|until| *until > now))
    }

    async fn purge_expired(&self) -> AppResult<u64> {
        let now = Utc::now();
        // Counted inside the retain closures: a length snapshot taken before
        // the retains goes stale the moment a concurrent increment inserts a
        // new key.
        let removed = AtomicU64::new(0);

        self.counters.retain(|_, entry| {
            let keep = entry.expires_at > now;
            if !keep {
                removed.fetch_add(1, Ordering::Relaxed);
            }
            keep
        });
        self.deadlines.retain(|_, until| {
            let keep = *until > now;
            if !keep {
                removed.fetch_add(1, Ordering::Relaxed);
            }
            keep
        });

        let removed = removed.into_inner();
        if removed > 0 {
            debug!(removed, "Purged expired counter entries");
        }
        Ok(removed)
    }
}
