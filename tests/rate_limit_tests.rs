// Rate limiter tests - fixed window semantics and race freedom
// Author: kelexine (https://github.com/kelexine)

use chrono::Duration;
use prompt_proxy::config::RateLimitConfig;
use prompt_proxy::rate_limit::{Admission, RateLimiter, RateRecord};
use prompt_proxy::store::{FileStore, MemoryStore};
use prompt_proxy::utils::clock::ManualClock;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

fn memory_limiter(clock: Arc<ManualClock>) -> RateLimiter {
    RateLimiter::new(
        &RateLimitConfig::default(),
        Arc::new(MemoryStore::<RateRecord>::new()),
        clock,
    )
    .unwrap()
}

#[test]
fn test_default_ceiling_is_ten_per_hour() {
    let limiter = memory_limiter(Arc::new(ManualClock::default()));

    let allowed = (0..11)
        .filter(|_| limiter.admit("203.0.113.7") == Admission::Allowed)
        .count();
    assert_eq!(allowed, 10);
}

#[test]
fn test_window_reset_after_expiry() {
    let clock = Arc::new(ManualClock::default());
    let limiter = memory_limiter(clock.clone());

    for _ in 0..10 {
        assert!(limiter.admit("client").is_allowed());
    }
    assert_eq!(limiter.admit("client"), Admission::Denied);

    clock.advance(Duration::seconds(3601));
    // Fresh window: the full allowance is available again
    for _ in 0..10 {
        assert!(limiter.admit("client").is_allowed());
    }
    assert_eq!(limiter.admit("client"), Admission::Denied);
}

#[test]
fn test_boundary_burst_is_allowed() {
    // Fixed windows permit up to twice the ceiling around a boundary
    let clock = Arc::new(ManualClock::default());
    let limiter = memory_limiter(clock.clone());

    clock.advance(Duration::seconds(3599));
    let mut allowed = 0;
    for _ in 0..10 {
        allowed += limiter.admit("burst").is_allowed() as u32;
    }
    clock.advance(Duration::seconds(3601));
    for _ in 0..10 {
        allowed += limiter.admit("burst").is_allowed() as u32;
    }
    assert_eq!(allowed, 20);
}

#[test]
fn test_concurrent_admission_never_exceeds_ceiling() {
    let limiter = Arc::new(memory_limiter(Arc::new(ManualClock::default())));
    let allowed = AtomicU32::new(0);

    std::thread::scope(|scope| {
        for _ in 0..16 {
            scope.spawn(|| {
                for _ in 0..8 {
                    if limiter.admit("shared").is_allowed() {
                        allowed.fetch_add(1, Ordering::SeqCst);
                    }
                }
            });
        }
    });

    assert_eq!(allowed.load(Ordering::SeqCst), 10);
}

#[test]
fn test_file_backed_limiter_persists_counts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rate_limits.json");
    let clock = Arc::new(ManualClock::default());
    let config = RateLimitConfig {
        max_requests: 2,
        ..RateLimitConfig::default()
    };

    let first = RateLimiter::new(
        &config,
        Arc::new(FileStore::<RateRecord>::new(&path)),
        clock.clone(),
    )
    .unwrap();
    assert!(first.admit("client").is_allowed());

    // Another process sharing the file sees the same count
    let second = RateLimiter::new(
        &config,
        Arc::new(FileStore::<RateRecord>::new(&path)),
        clock.clone(),
    )
    .unwrap();
    assert!(second.admit("client").is_allowed());
    assert_eq!(second.admit("client"), Admission::Denied);
    assert_eq!(first.admit("client"), Admission::Denied);
}

#[test]
fn test_unwritable_store_fails_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("rate_limits.json");
    let config = RateLimitConfig {
        max_requests: 1,
        ..RateLimitConfig::default()
    };
    let limiter = RateLimiter::new(
        &config,
        Arc::new(FileStore::<RateRecord>::new(&path)),
        Arc::new(ManualClock::default()),
    )
    .unwrap();

    // Nothing persists, so every request looks like the first one
    for _ in 0..3 {
        assert!(limiter.admit("client").is_allowed());
    }
}
