// Fixed-window rate limiter
// Author: kelexine (https://github.com/kelexine)

use super::models::RateRecord;
use crate::config::{span_from_secs, RateLimitConfig};
use crate::error::Result;
use crate::store::Store;
use crate::utils::clock::Clock;
use chrono::Duration;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Denied,
}

impl Admission {
    pub fn is_allowed(self) -> bool {
        self == Admission::Allowed
    }
}

pub struct RateLimiter {
    store: Arc<dyn Store<RateRecord>>,
    clock: Arc<dyn Clock>,
    max_requests: u32,
    window: Duration,
    /// Serializes read-compare-increment-write so parallel requests from one
    /// client cannot both take the last slot.
    admit_lock: Mutex<()>,
}

impl RateLimiter {
    pub fn new(
        config: &RateLimitConfig,
        store: Arc<dyn Store<RateRecord>>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        Ok(Self {
            store,
            clock,
            max_requests: config.max_requests,
            window: span_from_secs("rate_limit.window_seconds", config.window_seconds)?,
            admit_lock: Mutex::new(()),
        })
    }

    /// Count one upstream call against `client`, or refuse it.
    ///
    /// A denial leaves the stored record untouched. Every admitted call also
    /// evicts records whose window has lapsed.
    pub fn admit(&self, client: &str) -> Admission {
        let _guard = self.admit_lock.lock();
        let now = self.clock.now();
        let window = self.window;

        let mut record = self
            .store
            .get(client)
            .filter(|record| now - record.window_start <= window)
            .unwrap_or_else(|| RateRecord::fresh(now));

        if record.count >= self.max_requests {
            warn!(client, count = record.count, "Rate limit exceeded");
            crate::metrics::record_rate_limit(Admission::Denied);
            return Admission::Denied;
        }

        record.count += 1;
        self.store.put(client, record);
        self.store
            .prune(&|record: &RateRecord| now - record.window_start <= window);

        debug!(client, count = record.count, "Request admitted");
        crate::metrics::record_rate_limit(Admission::Allowed);
        Admission::Allowed
    }

    /// Number of clients with a stored record.
    pub fn tracked_clients(&self) -> usize {
        self.store.len()
    }
}
