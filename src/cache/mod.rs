// Response cache module
// Author: kelexine (https://github.com/kelexine)

pub mod manager;
pub mod models;

pub use manager::{fingerprint, ResponseCache};
pub use models::{CacheEntry, CacheStats};
