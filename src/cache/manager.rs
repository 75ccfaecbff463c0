// Cache manager - prompt fingerprinting, lookup and write-through
// Author: kelexine (https://github.com/kelexine)

use crate::cache::models::{CacheEntry, CacheStats};
use crate::config::{span_from_secs, CacheConfig};
use crate::error::Result;
use crate::store::Store;
use crate::utils::clock::Clock;
use chrono::Duration;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// SHA-256 of the raw prompt, hex encoded. Identical prompts always share a key.
pub fn fingerprint(prompt: &str) -> String {
    hex::encode(Sha256::digest(prompt.as_bytes()))
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
}

/// Prompt → answer cache with a fixed time-to-live.
///
/// Expiry is lazy: `get` ignores entries older than the TTL, and every `put`
/// sweeps them out of the store.
pub struct ResponseCache {
    store: Arc<dyn Store<CacheEntry>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    counters: Counters,
}

impl ResponseCache {
    pub fn new(
        config: &CacheConfig,
        store: Arc<dyn Store<CacheEntry>>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        Ok(Self {
            store,
            clock,
            ttl: span_from_secs("cache.ttl_seconds", config.ttl_seconds)?,
            counters: Counters::default(),
        })
    }

    /// Cached answer for `key`, if one was stored less than a TTL ago.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        let hit = self
            .store
            .get(key)
            .filter(|entry| now - entry.created_at < self.ttl)
            .map(|entry| entry.text);

        if hit.is_some() {
            debug!("Cache hit: {}", key.get(..16).unwrap_or(key));
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            crate::metrics::record_cache_hit();
        } else {
            debug!("Cache miss: {}", key.get(..16).unwrap_or(key));
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
            crate::metrics::record_cache_miss();
        }
        hit
    }

    /// Store `text` under `key` stamped with the current time, then evict
    /// every expired entry.
    pub fn put(&self, key: &str, text: String) {
        let now = self.clock.now();
        self.store.put(
            key,
            CacheEntry {
                text,
                created_at: now,
            },
        );

        let ttl = self.ttl;
        self.store.prune(&|entry: &CacheEntry| now - entry.created_at < ttl);

        self.counters.writes.fetch_add(1, Ordering::Relaxed);
        crate::metrics::record_cache_write();
        crate::metrics::update_cache_entries(self.store.len());
    }

    /// Number of stored entries, expired ones included until the next sweep.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            writes: self.counters.writes.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::utils::clock::ManualClock;

    fn cache_with_clock() -> (ResponseCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let cache = ResponseCache::new(
            &CacheConfig::default(),
            Arc::new(MemoryStore::<CacheEntry>::new()),
            clock.clone(),
        )
        .unwrap();
        (cache, clock)
    }

    #[test]
    fn test_fingerprint_is_sha256_hex() {
        assert_eq!(
            fingerprint("hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_ne!(fingerprint("hello"), fingerprint("hello "));
    }

    #[test]
    fn test_hit_within_ttl() {
        let (cache, clock) = cache_with_clock();
        let key = fingerprint("hello");
        cache.put(&key, "hi there".to_string());

        clock.advance(Duration::seconds(3599));
        assert_eq!(cache.get(&key).as_deref(), Some("hi there"));
    }

    #[test]
    fn test_miss_at_ttl() {
        let (cache, clock) = cache_with_clock();
        let key = fingerprint("hello");
        cache.put(&key, "hi there".to_string());

        clock.advance(Duration::seconds(3600));
        assert_eq!(cache.get(&key), None);
    }

    #[test]
    fn test_put_evicts_expired_entries() {
        let (cache, clock) = cache_with_clock();
        cache.put(&fingerprint("old"), "stale".to_string());

        clock.advance(Duration::seconds(3600));
        cache.put(&fingerprint("new"), "fresh".to_string());

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&fingerprint("new")).as_deref(), Some("fresh"));
    }

    #[test]
    fn test_put_overwrites_and_restamps() {
        let (cache, clock) = cache_with_clock();
        let key = fingerprint("hello");
        cache.put(&key, "first".to_string());

        clock.advance(Duration::seconds(3000));
        cache.put(&key, "second".to_string());

        clock.advance(Duration::seconds(3000));
        assert_eq!(cache.get(&key).as_deref(), Some("second"));
    }

    #[test]
    fn test_unrepresentable_ttl_is_rejected() {
        let config = CacheConfig {
            ttl_seconds: u64::MAX,
            ..CacheConfig::default()
        };
        let result = ResponseCache::new(
            &config,
            Arc::new(MemoryStore::<CacheEntry>::new()),
            Arc::new(ManualClock::default()),
        );
        assert!(matches!(result, Err(crate::error::ProxyError::Config(_))));
    }

    #[test]
    fn test_stats_track_operations() {
        let (cache, _clock) = cache_with_clock();
        let key = fingerprint("hello");

        assert!(cache.get(&key).is_none());
        cache.put(&key, "hi".to_string());
        assert!(cache.get(&key).is_some());

        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                writes: 1
            }
        );
    }
}
