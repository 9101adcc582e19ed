//! MCP transport over stdio.
//!
//! Newline-delimited JSON-RPC 2.0: `initialize`, `ping`, `tools/list` and
//! `tools/call`. Tool results are returned verbatim as response envelopes.

pub mod protocol;
pub mod router;
pub mod server;

pub use server::McpServer;
