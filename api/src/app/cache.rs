//! Time-based cache
//!
//! Holds a single value until its time-to-live runs out. Expiry is checked
//! on read against an injected clock; nothing is evicted in the background.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::Clock;

struct Entry<T> {
    value: T,
    stored_at: DateTime<Utc>,
}

/// Single-slot cache with a fixed time-to-live
pub struct TtlCache<T: Clone> {
    clock: Arc<dyn Clock>,
    ttl: Duration,
    entry: RwLock<Option<Entry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    /// A zero `ttl` disables caching: every read misses.
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            clock,
            ttl,
            entry: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached value, if one is stored and still fresh
    pub async fn get(&self) -> Option<T> {
        let now = self.clock.now();
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|e| now < e.stored_at + self.ttl)
            .map(|e| e.value.clone())
    }

    /// Store `value`, stamped with the current time
    pub async fn put(&self, value: T) {
        let stored_at = self.clock.now();
        *self.entry.write().await = Some(Entry { value, stored_at });
    }

    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ManualClock;

    fn cache_with_clock(ttl_secs: i64) -> (TtlCache<u32>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = TtlCache::new(clock.clone(), Duration::seconds(ttl_secs));
        (cache, clock)
    }

    #[tokio::test]
    async fn empty_cache_misses() {
        let (cache, _) = cache_with_clock(60);
        assert_eq!(cache.get().await, None);
    }

    #[tokio::test]
    async fn fresh_value_hits() {
        let (cache, clock) = cache_with_clock(60);
        cache.put(7).await;

        clock.advance(Duration::seconds(59));

        assert_eq!(cache.get().await, Some(7));
    }

    #[tokio::test]
    async fn value_expires_at_ttl() {
        let (cache, clock) = cache_with_clock(60);
        cache.put(7).await;

        clock.advance(Duration::seconds(60));

        assert_eq!(cache.get().await, None);
    }

    #[tokio::test]
    async fn put_restamps_value() {
        let (cache, clock) = cache_with_clock(60);
        cache.put(1).await;
        clock.advance(Duration::seconds(50));
        cache.put(2).await;
        clock.advance(Duration::seconds(50));

        assert_eq!(cache.get().await, Some(2));
    }

    #[tokio::test]
    async fn zero_ttl_never_hits() {
        let (cache, _) = cache_with_clock(0);
        cache.put(7).await;

        assert_eq!(cache.get().await, None);
    }

    #[tokio::test]
    async fn invalidate_clears_value() {
        let (cache, _) = cache_with_clock(60);
        cache.put(7).await;

        cache.invalidate().await;

        assert_eq!(cache.get().await, None);
    }
}
