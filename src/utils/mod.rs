//! Utility functions and helpers for prompt-proxy.
//!
//! # Submodules
//!
//! - `clock`: Wall-clock abstraction so expiry logic can be driven by tests.
//! - `logging`: Tracing initialization and secret redaction.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod clock;
pub mod logging;
