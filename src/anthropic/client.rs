// Anthropic Messages API client
// Author: kelexine (https://github.com/kelexine)

use super::MESSAGES_PATH;
use crate::config::{AnthropicConfig, PerformanceConfig};
use crate::error::{ProxyError, Result};
use crate::keys::ApiKey;
use crate::models::anthropic::{MessagesRequest, MessagesResponse};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Client for the Anthropic Messages API.
///
/// One blocking (non-streaming) call per request, bounded by the configured
/// timeout. Failures are returned as-is; nothing is retried.
pub struct AnthropicClient {
    http_client: Client,
    config: AnthropicConfig,
}

impl AnthropicClient {
    /// Build the pooled HTTP client. No network traffic happens here.
    pub fn new(config: &AnthropicConfig, performance: &PerformanceConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(performance.connection_pool_size)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls()
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client with connection pooling and keep-alive");

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Model sent with every request.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Full URL of the Messages endpoint.
    pub fn messages_url(&self) -> String {
        format!("{}{}", self.config.api_base_url.trim_end_matches('/'), MESSAGES_PATH)
    }

    /// Call `POST /v1/messages`.
    ///
    /// A non-2xx answer becomes [`ProxyError::UpstreamApi`] carrying the
    /// status and raw body, or an empty body if it could not be read.
    /// Transport errors and timeouts surface as [`ProxyError::Http`], an
    /// undecodable body as [`ProxyError::Json`].
    pub async fn create_message(
        &self,
        api_key: &ApiKey,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse> {
        let url = self.messages_url();
        debug!(
            "Calling Messages API: model={}, max_tokens={}",
            request.model, request.max_tokens
        );

        let start = Instant::now();
        let response = self
            .http_client
            .post(&url)
            .header("content-type", "application/json")
            .header("x-api-key", api_key.expose())
            .header("anthropic-version", &self.config.api_version)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                crate::metrics::record_upstream_call(None, start.elapsed().as_secs_f64());
                e
            })?;

        let status = response.status();
        let body = response.text().await;
        crate::metrics::record_upstream_call(Some(status.as_u16()), start.elapsed().as_secs_f64());
        let body = match body {
            Ok(body) => body,
            // The status alone still decides the outcome
            Err(e) if !status.is_success() => {
                warn!("Failed to read Anthropic error body (HTTP {}): {}", status, e);
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        if !status.is_success() {
            error!(
                "Anthropic API error: HTTP {} - Response body: {}",
                status,
                crate::utils::logging::sanitize(&body)
            );
            return Err(ProxyError::UpstreamApi {
                status: status.as_u16(),
                body,
            });
        }

        debug!(
            "Raw Anthropic response (first 500 chars): {}",
            body.chars().take(500).collect::<String>()
        );

        let parsed: MessagesResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Anthropic response: {}", e);
            e
        })?;

        Ok(parsed)
    }
}
