// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{ProxyError, Result};
use config::{Config, Environment, File};
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Convert a `*_seconds` setting to a time span.
///
/// Values beyond what `chrono` can represent are rejected instead of
/// overflowing.
pub fn span_from_secs(field: &str, seconds: u64) -> Result<chrono::Duration> {
    i64::try_from(seconds)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .ok_or_else(|| ProxyError::Config(format!("{} is out of range: {}", field, seconds)))
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest, prefix `PROMPT_PROXY_`, `__` between sections)
    /// 2. Config file (`path`, or `./config.toml` if present)
    /// 3. Defaults (lowest)
    ///
    /// CLI overrides are applied by the caller on the returned value.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            // PROMPT_PROXY_RATE_LIMIT__MAX_REQUESTS=20
            .add_source(
                Environment::with_prefix("PROMPT_PROXY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ProxyError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ProxyError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert!(config.server.cors);
        assert_eq!(config.anthropic.default_max_tokens, 300);
        assert_eq!(config.anthropic.api_version, "2023-06-01");
        assert_eq!(config.cache.ttl_seconds, 3600);
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window_seconds, 3600);
        assert_eq!(config.rate_limit.client_header, "x-forwarded-for");
        assert_eq!(config.cache.backend, StoreBackend::Memory);
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[anthropic]
api_key = "sk-ant-test"

[rate_limit]
max_requests = 3
backend = "file"
file_path = "/tmp/limits-test.json"
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.anthropic.api_key.as_deref(), Some("sk-ant-test"));
        assert_eq!(config.rate_limit.max_requests, 3);
        assert_eq!(config.rate_limit.backend, StoreBackend::File);
        assert_eq!(config.rate_limit.file_path, "/tmp/limits-test.json");
        // Untouched sections keep their defaults
        assert_eq!(config.rate_limit.window_seconds, 3600);
        assert_eq!(config.cache.ttl_seconds, 3600);
    }

    #[test]
    fn test_span_from_secs_bounds() {
        assert_eq!(
            span_from_secs("cache.ttl_seconds", 3600).unwrap(),
            chrono::Duration::hours(1)
        );
        assert!(matches!(
            span_from_secs("cache.ttl_seconds", u64::MAX),
            Err(ProxyError::Config(msg)) if msg.contains("cache.ttl_seconds")
        ));
        // Fits in i64 but not in chrono's millisecond range
        assert!(span_from_secs("rate_limit.window_seconds", i64::MAX as u64).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/prompt-proxy.toml")));
        assert!(matches!(result, Err(ProxyError::Config(_))));
    }
}
