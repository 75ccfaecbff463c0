//! Axum-based HTTP server implementation for prompt-proxy.
//!
//! This module sets up the HTTP server, configures routes, and handles
//! browser requests, forwarding uncached prompts to the Anthropic API.
//!
//! # Components
//!
//! - `handlers`: The `/api/status`, `/api/analyze` and `/metrics` endpoints.
//! - `middleware`: Request ID tracking, CORS and request metrics.
//! - `routes`: Shared state and the router that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
