// Anthropic API client module
// Author: kelexine (https://github.com/kelexine)

mod client;

pub use client::AnthropicClient;

/// Path of the Messages endpoint under the configured base URL.
pub const MESSAGES_PATH: &str = "/v1/messages";
