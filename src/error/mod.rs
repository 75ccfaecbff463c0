// Error types for prompt-proxy
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    /// Bad or missing client input.
    #[error("{0}")]
    InvalidRequest(String),

    /// No upstream credential configured. Deliberately not a 401: end users are never authenticated.
    #[error("API key not configured")]
    NotConfigured,

    #[error("Rate limit exceeded. Try again later.")]
    RateLimited,

    /// Request body above `server.max_body_bytes`.
    #[error("request body too large")]
    PayloadTooLarge,

    /// Non-2xx answer from the Anthropic API.
    #[error("Anthropic API error: {status} {body}")]
    UpstreamApi { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("{0}")]
    Internal(String),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ProxyError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ProxyError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::UpstreamApi { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Convert ProxyError to the `{"error": ...}` envelope for Axum
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", crate::utils::logging::sanitize(&message));
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("{}", message);
        }

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
