// Response cache tests - public API only
// Author: kelexine (https://github.com/kelexine)

use chrono::Duration;
use prompt_proxy::cache::{fingerprint, CacheEntry, CacheStats, ResponseCache};
use prompt_proxy::config::{CacheConfig, StoreBackend};
use prompt_proxy::store::{self, FileStore, MemoryStore};
use prompt_proxy::utils::clock::ManualClock;
use proptest::prelude::*;
use std::sync::Arc;

proptest! {
    #[test]
    fn fingerprint_is_stable(prompt in "\\PC*") {
        let first = fingerprint(&prompt);
        prop_assert_eq!(&first, &fingerprint(&prompt));
        prop_assert_eq!(first.len(), 64);
        prop_assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn distinct_prompts_get_distinct_fingerprints(a in "\\PC{1,40}", b in "\\PC{1,40}") {
        prop_assume!(a != b);
        prop_assert_ne!(fingerprint(&a), fingerprint(&b));
    }
}

#[test]
fn test_cache_stats_initialization() {
    let cache = ResponseCache::new(
        &CacheConfig::default(),
        Arc::new(MemoryStore::<CacheEntry>::new()),
        Arc::new(ManualClock::default()),
    )
    .unwrap();
    assert_eq!(cache.stats(), CacheStats::default());
    assert!(cache.is_empty());
}

#[test]
fn test_custom_ttl() {
    let clock = Arc::new(ManualClock::default());
    let config = CacheConfig {
        ttl_seconds: 60,
        ..CacheConfig::default()
    };
    let cache = ResponseCache::new(
        &config,
        Arc::new(MemoryStore::<CacheEntry>::new()),
        clock.clone(),
    )
    .unwrap();

    let key = fingerprint("what is the spread?");
    cache.put(&key, "three points".to_string());

    clock.advance(Duration::seconds(59));
    assert_eq!(cache.get(&key).as_deref(), Some("three points"));

    clock.advance(Duration::seconds(1));
    assert_eq!(cache.get(&key), None);
}

#[test]
fn test_file_backed_cache_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("response_cache.json");
    let clock = Arc::new(ManualClock::default());
    let key = fingerprint("hello");

    {
        let cache = ResponseCache::new(
            &CacheConfig::default(),
            Arc::new(FileStore::<CacheEntry>::new(&path)),
            clock.clone(),
        )
        .unwrap();
        cache.put(&key, "hi there".to_string());
    }

    let reopened = ResponseCache::new(
        &CacheConfig::default(),
        Arc::new(FileStore::<CacheEntry>::new(&path)),
        clock.clone(),
    )
    .unwrap();
    assert_eq!(reopened.get(&key).as_deref(), Some("hi there"));

    clock.advance(Duration::seconds(3600));
    assert_eq!(reopened.get(&key), None);
}

#[test]
fn test_open_selects_backend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.json");

    let file_store = store::open::<CacheEntry>(StoreBackend::File, path.to_str().unwrap());
    let cache = ResponseCache::new(
        &CacheConfig::default(),
        file_store,
        Arc::new(ManualClock::default()),
    )
    .unwrap();
    cache.put(&fingerprint("x"), "y".to_string());
    assert!(path.exists());

    let memory_store = store::open::<CacheEntry>(StoreBackend::Memory, path.to_str().unwrap());
    assert!(memory_store.is_empty());
}
