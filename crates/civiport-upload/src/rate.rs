//! Per-user upload rate ceiling.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;
use uuid::Uuid;

use civiport_core::result::AppResult;
use civiport_core::traits::counter::CounterStore;

/// Counter window. The ceiling is expressed per minute.
const WINDOW: Duration = Duration::from_secs(60);

/// Counts uploads per user over a one-minute window. Independent of the
/// login trackers: the counter key carries its own namespace.
#[derive(Clone)]
pub struct UploadRateLimiter {
    /// Shared counter store.
    store: Arc<dyn CounterStore>,
    /// Maximum uploads per user per window.
    per_minute: u32,
}

impl std::fmt::Debug for UploadRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadRateLimiter")
            .field("per_minute", &self.per_minute)
            .finish()
    }
}

impl UploadRateLimiter {
    /// Creates a limiter over the given store.
    pub fn new(store: Arc<dyn CounterStore>, per_minute: u32) -> Self {
        Self { store, per_minute }
    }

    /// Counts one upload attempt. Returns `false` when the attempt pushed
    /// the user over the ceiling.
    pub async fn try_acquire(&self, user_id: Uuid) -> AppResult<bool> {
        let key = format!("upload:{user_id}");
        let count = self.store.increment(&key, WINDOW).await?;

        if count > u64::from(self.per_minute) {
            warn!(user_id = %user_id, count, "Upload rate ceiling exceeded");
            return Ok(false);
        }
        Ok(true)
    }
}
