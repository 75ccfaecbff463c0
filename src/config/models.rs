//! Configuration data structures for prompt-proxy.
//!
//! This module defines the schema for the application settings: the HTTP
//! listener, the upstream Anthropic connection, the response cache and the
//! per-client rate limiter.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Anthropic API settings, including the credential.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Response cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Per-client admission settings.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Performance and resource management settings.
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Answer `OPTIONS` with 204 and add permissive CORS headers to every response.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub cors: bool,

    /// Directory of static files served for non-API paths. Unset disables file serving.
    #[serde(default)]
    pub static_dir: Option<String>,

    /// File under `static_dir` served for `/`.
    /// Default: `index.html`
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Maximum accepted request body in bytes.
    /// Default: `65536`
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Settings for the upstream Anthropic Messages API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicConfig {
    /// API key read from the config file. The placeholder from the sample
    /// config counts as unset.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Environment variable consulted before `api_key`.
    /// Default: `ANTHROPIC_API_KEY`
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Base URL of the API; `/v1/messages` is appended.
    /// Default: `https://api.anthropic.com`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Value of the `anthropic-version` header.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Whole-request timeout in seconds.
    /// Default: `60`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// `max_tokens` used when the client omits it.
    /// Default: `300`
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,
}

/// Where a store keeps its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory; lost on restart.
    Memory,
    /// A JSON file shared by every process that can see it.
    File,
}

/// Settings for the prompt response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds a cached answer stays servable.
    /// Default: `3600`
    #[serde(default = "default_window")]
    pub ttl_seconds: u64,

    #[serde(default = "default_backend")]
    pub backend: StoreBackend,

    /// Used when `backend = "file"`.
    #[serde(default = "default_cache_path")]
    pub file_path: String,
}

/// Settings for the fixed-window rate limiter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Upstream calls admitted per client per window.
    /// Default: `10`
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds.
    /// Default: `3600`
    #[serde(default = "default_window")]
    pub window_seconds: u64,

    /// Header carrying the client address. Only its first comma-separated
    /// entry is used, and clients can forge it.
    /// Default: `x-forwarded-for`
    #[serde(default = "default_client_header")]
    pub client_header: String,

    #[serde(default = "default_backend")]
    pub backend: StoreBackend,

    /// Used when `backend = "file"`.
    #[serde(default = "default_rate_limit_path")]
    pub file_path: String,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Settings for tuning application performance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Maximum number of idle upstream connections kept in the pool.
    /// Default: `16`
    #[serde(default = "default_pool_size")]
    pub connection_pool_size: usize,

    /// Whether to gzip HTTP responses for clients that accept it.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enable_compression: bool,
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: true,
            static_dir: None,
            index_file: default_index_file(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_api_key_env(),
            api_base_url: default_api_base_url(),
            model: default_model(),
            api_version: default_api_version(),
            timeout_seconds: default_timeout(),
            default_max_tokens: default_max_tokens(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_window(),
            backend: default_backend(),
            file_path: default_cache_path(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_seconds: default_window(),
            client_header: default_client_header(),
            backend: default_backend(),
            file_path: default_rate_limit_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            connection_pool_size: default_pool_size(),
            enable_compression: true,
        }
    }
}

// Helper functions for serde defaults and shared constants
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_index_file() -> String {
    "index.html".to_string()
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

fn default_api_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_model() -> String {
    "claude-opus-4-6".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_max_tokens() -> u32 {
    300
}

fn default_window() -> u64 {
    3600 // 1 hour
}

fn default_backend() -> StoreBackend {
    StoreBackend::Memory
}

fn default_cache_path() -> String {
    "/tmp/response_cache.json".to_string()
}

fn default_max_requests() -> u32 {
    10
}

fn default_client_header() -> String {
    "x-forwarded-for".to_string()
}

fn default_rate_limit_path() -> String {
    "/tmp/rate_limits.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_pool_size() -> usize {
    16
}
