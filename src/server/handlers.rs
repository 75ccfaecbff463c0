// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::cache::fingerprint;
use crate::error::{ProxyError, Result};
use crate::models::anthropic::MessagesRequest;
use crate::models::api::{AnalyzeRequest, AnalyzeResponse, StatusResponse};
use crate::rate_limit::{client_identity, Admission};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{debug, info};

/// Answer used when the upstream reply carries no text.
pub const NO_RESPONSE_TEXT: &str = "No response generated.";

/// Handler for `GET /api/status`
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        ai_enabled: state.ai_enabled(),
    })
}

/// Handler for `POST /api/analyze`
///
/// Order matters: credential, body, cache, rate limit, upstream. Cached
/// answers never count against the client's allowance.
pub async fn analyze_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<AnalyzeResponse>> {
    let api_key = state.api_key.as_ref().ok_or(ProxyError::NotConfigured)?;

    let body = body.map_err(body_error)?;
    let request = AnalyzeRequest::parse(&body, state.config.anthropic.default_max_tokens)?;

    let key = fingerprint(&request.prompt);
    let lookup = key.clone();
    if let Some(text) = state.with_stores(move |cache, _| cache.get(&lookup)).await? {
        debug!("Serving cached response");
        return Ok(Json(AnalyzeResponse { text }));
    }

    let client = client_identity(&headers, &state.config.rate_limit.client_header);
    let counted = client.clone();
    let admission = state
        .with_stores(move |_, limiter| limiter.admit(&counted))
        .await?;
    if admission == Admission::Denied {
        return Err(ProxyError::RateLimited);
    }

    info!(
        "Forwarding prompt to Anthropic: client={}, chars={}, max_tokens={}",
        client,
        request.prompt.chars().count(),
        request.max_tokens
    );

    let upstream_request =
        MessagesRequest::single_prompt(state.anthropic.model(), request.max_tokens, request.prompt);
    let response = state
        .anthropic
        .create_message(api_key, &upstream_request)
        .await?;

    let text = response
        .first_text()
        .unwrap_or(NO_RESPONSE_TEXT)
        .to_string();
    let cached = text.clone();
    state
        .with_stores(move |cache, _| cache.put(&key, cached))
        .await?;

    Ok(Json(AnalyzeResponse { text }))
}

fn body_error(rejection: BytesRejection) -> ProxyError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ProxyError::PayloadTooLarge
    } else {
        ProxyError::InvalidRequest(rejection.body_text())
    }
}

/// Handler for `GET /metrics` (Prometheus text exposition)
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}
