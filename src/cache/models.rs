//! Cache record and statistics models.

// Author: kelexine (https://github.com/kelexine)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated answer stored under its prompt fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The upstream answer returned to the client.
    pub text: String,
    /// When the answer was stored; age is measured from here.
    pub created_at: DateTime<Utc>,
}

/// Statistics for cache operations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that found nothing live.
    pub misses: u64,
    /// Answers stored after an upstream call.
    pub writes: u64,
}
