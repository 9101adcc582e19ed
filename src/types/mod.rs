//! Core types shared across the crate.
//!
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Server, observability, and fetch configuration

mod config;
mod errors;

pub use config::{Config, FetchConfig, ObservabilityConfig, ServerConfig};
pub use errors::{jsonrpc_codes, Error, Result};
