//! Wire types.
//!
//! - `api`: the envelope browsers speak to this server (`/api/analyze`, `/api/status`).
//! - `anthropic`: the upstream Messages API request and response.

// Author: kelexine (https://github.com/kelexine)

pub mod anthropic;
pub mod api;

pub use anthropic::{ContentItem, Message, MessagesRequest, MessagesResponse};
pub use api::{AnalyzeRequest, AnalyzeResponse, StatusResponse};
