//! # Secforge Core - Security Tool Registry & Command Synthesis
//!
//! Exposes a catalog of security tools to MCP clients. Nothing is executed:
//! - Each tool declares a typed parameter schema, validated on every call
//! - Valid calls are turned into an ordered, quoted command line
//! - Results come back as a text envelope `{content, isError}`
//! - One tool (`github-tags`) fetches a remote tag list over HTTP
//!
//! ## Architecture
//!
//! ```text
//!   stdin ─→ McpServer ─→ router ─→ Dispatcher ─→ ToolCatalog
//!                                       │            └─ ToolEntry (schema + builder)
//!                                       └─→ TagSource (HTTP)
//!   stdout ←─ JSON-RPC response ←─ ToolResponse
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod mcp;
pub mod tools;
pub mod types;

// Internal utilities
pub mod observability;

pub use types::{Config, Error, Result};
