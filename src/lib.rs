// prompt-proxy - Rate-limited, caching HTTP front-end for the Anthropic Messages API
// Author: kelexine (https://github.com/kelexine)

pub mod anthropic;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod keys;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod server;
pub mod store;
pub mod utils;
