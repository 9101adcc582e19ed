//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation. Tool-call
//! failures (unknown tool, validation, synthesis, fetch) never escape the
//! response boundary: the dispatcher turns them into error envelopes.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// JSON-RPC 2.0 error codes used by the MCP transport.
pub mod jsonrpc_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Main error enum for the command synthesis engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Requested tool name is not registered.
    #[error("Unknown tool: '{0}' is not registered")]
    UnknownTool(String),

    /// One or more parameters missing, malformed, or out of range.
    #[error("Invalid arguments for tool '{tool}': {}", .violations.join("; "))]
    Validation { tool: String, violations: Vec<String> },

    /// Schema-valid input that still cannot form a command.
    #[error("{0}")]
    Synthesis(String),

    /// Remote fetch collaborator failed (network, HTTP status, parse).
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Invalid configuration or tool registration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed transport-level request.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Transport-level method or resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Map to a JSON-RPC error code for transport-level failures.
    pub fn jsonrpc_code(&self) -> i64 {
        match self {
            Error::NotFound(_) => jsonrpc_codes::METHOD_NOT_FOUND,
            Error::Protocol(_) | Error::Validation { .. } | Error::UnknownTool(_) => {
                jsonrpc_codes::INVALID_PARAMS
            }
            Error::Serialization(_) => jsonrpc_codes::PARSE_ERROR,
            Error::Synthesis(_) | Error::Fetch(_) | Error::Config(_) | Error::Io(_) => {
                jsonrpc_codes::INTERNAL_ERROR
            }
        }
    }

    /// Whether this error belongs to a tool call and should be reported in
    /// an error envelope rather than as a JSON-RPC error.
    pub fn is_tool_failure(&self) -> bool {
        matches!(
            self,
            Error::UnknownTool(_) | Error::Validation { .. } | Error::Synthesis(_) | Error::Fetch(_)
        )
    }
}

// Convenience constructors
impl Error {
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    pub fn validation(tool: impl Into<String>, violations: Vec<String>) -> Self {
        Self::Validation {
            tool: tool.into(),
            violations,
        }
    }

    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis(msg.into())
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Fetch(format!("request timed out: {}", err))
        } else if let Some(status) = err.status() {
            Error::Fetch(format!("HTTP {}", status))
        } else {
            Error::Fetch(err.to_string())
        }
    }
}
