// Rate limit record
// Author: kelexine (https://github.com/kelexine)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Requests admitted for one client in its current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    pub count: u32,
    pub window_start: DateTime<Utc>,
}

impl RateRecord {
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            count: 0,
            window_start: now,
        }
    }
}
