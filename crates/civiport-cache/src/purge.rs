//! Periodic purge of expired counter entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info};

use civiport_core::traits::counter::CounterStore;

/// Spawn a background task that purges expired entries from the store at a
/// fixed interval. Purging never blocks request handling; it only touches
/// entries whose TTL or deadline has already passed.
pub fn spawn_purge(store: Arc<dyn CounterStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick fires immediately; skip it so startup stays quiet.
        ticker.tick().await;
        info!(interval_seconds = every.as_secs(), "Counter purge task started");

        loop {
            ticker.tick().await;
            if let Err(e) = store.purge_expired().await {
                error!(error = %e, "Counter purge cycle failed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCounterStore;

    #[tokio::test]
    async fn test_purge_task_drops_expired_entries() {
        let store = Arc::new(MemoryCounterStore::new());
        // Zero TTL: expired as soon as the next purge cycle runs.
        store.increment("stale", Duration::ZERO).await.unwrap();
        store.increment("fresh", Duration::from_secs(600)).await.unwrap();

        let handle = spawn_purge(
            Arc::clone(&store) as Arc<dyn CounterStore>,
            Duration::from_millis(10),
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert_eq!(store.get("stale").await.unwrap(), 0);
        assert_eq!(store.get("fresh").await.unwrap(), 1);
    }
}
