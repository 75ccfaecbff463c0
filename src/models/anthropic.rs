//! Anthropic Messages API type definitions.
//!
//! Only the subset this proxy sends and reads: a single user turn out, the
//! first text block back. Unknown response fields are ignored.

// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Anthropic Messages API request structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesRequest {
    /// The model that will complete your prompt.
    pub model: String,

    /// The maximum number of tokens to generate before stopping.
    pub max_tokens: u32,

    /// Input messages.
    pub messages: Vec<Message>,
}

impl MessagesRequest {
    /// A request carrying `prompt` as the only user message.
    pub fn single_prompt(model: impl Into<String>, max_tokens: u32, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.into(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Anthropic Messages API response, reduced to its content blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl MessagesResponse {
    /// Text of the first content block, if it has any.
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .first()
            .and_then(|item| item.text.as_deref())
            .filter(|text| !text.is_empty())
    }
}
