use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::error::Result;

/// In-process TTL cache for fetched insights and comparison results.
///
/// `remember` does not collapse concurrent callers racing on the same key:
/// each invokes its own factory and the last writer wins. Accepted at the
/// expected request rate; entries expire individually and are purged lazily
/// on access.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    default_ttl: Duration,
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub async fn set(&self, key: &str, value: V, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Returns the live cached value, or runs `factory`, stores its result
    /// under `key` with the default TTL, and returns it.
    pub async fn remember<F, Fut>(&self, key: &str, factory: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(value) = self.get(key).await {
            tracing::debug!("Cache hit: {}", key);
            return Ok(value);
        }

        tracing::debug!("Cache miss: {}", key);
        let value = factory().await?;
        self.set(key, value.clone(), None).await;
        Ok(value)
    }

    /// Evicts one entry, or every entry when `key` is `None`.
    pub async fn clear(&self, key: Option<&str>) {
        let mut entries = self.entries.lock().await;
        match key {
            Some(key) => {
                entries.remove(key);
            }
            None => entries.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn remember_invokes_factory_once_within_ttl() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        let calls = AtomicU32::new(0);

        let first = cache
            .remember("octocat", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(42)
            })
            .await
            .unwrap();
        let second = cache
            .remember("octocat", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(99)
            })
            .await
            .unwrap();

        assert_eq!(first, 42);
        assert_eq!(second, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn remember_reinvokes_factory_after_expiry() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_millis(20));
        let calls = AtomicU32::new(0);

        for _ in 0..2 {
            cache
                .remember("octocat", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(1)
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(40)).await;

        cache
            .remember("octocat", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(2)
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn expired_entries_are_purged_on_get() {
        let cache: TtlCache<&str> = TtlCache::new(Duration::from_secs(60));
        cache
            .set("stale", "old", Some(Duration::from_millis(10)))
            .await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("stale").await, None);
        assert_eq!(cache.entries.lock().await.len(), 0);
    }

    #[tokio::test]
    async fn clear_evicts_one_or_all() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        cache.set("a", 1, None).await;
        cache.set("b", 2, None).await;

        cache.clear(Some("a")).await;
        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await, Some(2));

        cache.clear(None).await;
        assert_eq!(cache.get("b").await, None);
    }

    #[tokio::test]
    async fn per_entry_ttl_overrides_default() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_millis(10));
        cache.set("long", 7, Some(Duration::from_secs(60))).await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("long").await, Some(7));
    }
}
