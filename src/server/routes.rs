// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{analyze_handler, metrics_handler, status_handler};
use super::middleware::{cors, request_id_layers, track_metrics};
use crate::anthropic::AnthropicClient;
use crate::cache::ResponseCache;
use crate::config::{AppConfig, StoreBackend};
use crate::error::{ProxyError, Result};
use crate::keys::ApiKey;
use crate::rate_limit::RateLimiter;
use crate::store;
use crate::utils::clock::Clock;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` runs the server with AI disabled.
    pub api_key: Option<ApiKey>,
    pub cache: Arc<ResponseCache>,
    pub rate_limiter: Arc<RateLimiter>,
    pub anthropic: Arc<AnthropicClient>,
    /// Set when either store does file I/O.
    blocking_stores: bool,
}

impl AppState {
    /// Wire the cache, limiter and upstream client from config.
    pub fn new(config: AppConfig, api_key: Option<ApiKey>, clock: Arc<dyn Clock>) -> Result<Self> {
        let cache = ResponseCache::new(
            &config.cache,
            store::open(config.cache.backend, &config.cache.file_path),
            clock.clone(),
        )?;
        let rate_limiter = RateLimiter::new(
            &config.rate_limit,
            store::open(config.rate_limit.backend, &config.rate_limit.file_path),
            clock,
        )?;
        let anthropic = AnthropicClient::new(&config.anthropic, &config.performance)?;
        let blocking_stores = config.cache.backend == StoreBackend::File
            || config.rate_limit.backend == StoreBackend::File;

        Ok(Self {
            config: Arc::new(config),
            api_key,
            cache: Arc::new(cache),
            rate_limiter: Arc::new(rate_limiter),
            anthropic: Arc::new(anthropic),
            blocking_stores,
        })
    }

    /// Run `op` against the cache and limiter.
    ///
    /// File-backed stores read and write synchronously, so in that case `op`
    /// runs on tokio's blocking pool instead of an async worker.
    pub async fn with_stores<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&ResponseCache, &RateLimiter) -> T + Send + 'static,
        T: Send + 'static,
    {
        if !self.blocking_stores {
            return Ok(op(&*self.cache, &*self.rate_limiter));
        }

        let cache = self.cache.clone();
        let rate_limiter = self.rate_limiter.clone();
        tokio::task::spawn_blocking(move || op(&*cache, &*rate_limiter))
            .await
            .map_err(|e| ProxyError::Internal(format!("Store task failed: {}", e)))
    }

    pub fn ai_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();
    let (set_request_id, propagate_request_id) = request_id_layers();

    let mut app = Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/metrics", get(metrics_handler));

    // Local variant: serve the front-end next to the API
    if let Some(dir) = &config.server.static_dir {
        let index = Path::new(dir).join(&config.server.index_file);
        app = app
            .route_service("/", ServeFile::new(index))
            .fallback_service(ServeDir::new(dir));
    }

    let mut app = app.layer(from_fn(track_metrics));

    if config.server.cors {
        app = app.layer(from_fn(cors));
    }

    if config.performance.enable_compression {
        app = app.layer(CompressionLayer::new());
    }

    // Enforced by the body extractor; the handler turns the 413 into ProxyError
    app.layer(DefaultBodyLimit::max(config.server.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
