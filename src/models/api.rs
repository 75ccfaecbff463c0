//! Browser-facing request and response bodies.

// Author: kelexine (https://github.com/kelexine)

use crate::error::{ProxyError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validated `/api/analyze` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub prompt: String,
    pub max_tokens: u32,
}

impl AnalyzeRequest {
    /// Validate a raw request body.
    ///
    /// Anything that is not a JSON object (invalid UTF-8 included) is read as
    /// `{}`, so a broken body reports the missing prompt rather than a parse
    /// error.
    pub fn parse(body: impl AsRef<[u8]>, default_max_tokens: u32) -> Result<Self> {
        let value: Value = serde_json::from_slice(body.as_ref()).unwrap_or(Value::Null);
        let fields = value.as_object();
        let field = |name: &str| fields.and_then(|map| map.get(name));

        let prompt = match field("prompt").and_then(Value::as_str) {
            Some(prompt) if !prompt.is_empty() => prompt.to_string(),
            _ => return Err(ProxyError::InvalidRequest("prompt is required".to_string())),
        };

        let max_tokens = match field("max_tokens") {
            None | Some(Value::Null) => default_max_tokens,
            Some(value) => value
                .as_u64()
                .filter(|n| *n > 0)
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| {
                    ProxyError::InvalidRequest("max_tokens must be a positive integer".to_string())
                })?,
        };

        Ok(Self { prompt, max_tokens })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub ai_enabled: bool,
}
