//! Upstream credential resolution.
//!
//! The key is resolved once at startup, from the environment (hosted
//! deployments) or from `config.toml` (local runs). A missing key is not an
//! error: the server starts with AI disabled and `/api/analyze` answers 503.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::AnthropicConfig;
use std::fmt;
use zeroize::Zeroizing;

/// Value shipped in the sample config; treated as unset.
pub const PLACEHOLDER_KEY: &str = "YOUR_ANTHROPIC_API_KEY_HERE";

/// An Anthropic API key. Wiped from memory on drop and never printed.
#[derive(Clone)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    /// Raw key, for the `x-api-key` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Resolve the key from the environment variable named in `config`, falling
/// back to the configured value.
pub fn resolve(config: &AnthropicConfig) -> Option<ApiKey> {
    let from_env = std::env::var(&config.api_key_env).ok();
    resolve_from(from_env.as_deref(), config.api_key.as_deref())
}

/// The first usable candidate wins; blank values and the placeholder are skipped.
pub fn resolve_from(from_env: Option<&str>, from_config: Option<&str>) -> Option<ApiKey> {
    [from_env, from_config]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty() && *key != PLACEHOLDER_KEY)
        .map(|key| ApiKey(Zeroizing::new(key.to_string())))
}
