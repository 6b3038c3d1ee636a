//! Shared utilities for finagent
//!
//! Logging setup and the application-level configuration shared by the
//! server and CLI binaries.

pub mod config;
pub mod logging;

pub use config::Config;
pub use logging::{init_tracing, init_tracing_with_default};
