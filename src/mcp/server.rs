//! Stdio MCP server — line loop and per-message handling.

use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::mcp::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::mcp::router::route_request;
use crate::tools::Dispatcher;
use crate::types::{jsonrpc_codes, ServerConfig};

/// MCP server wrapping the dispatcher.
#[derive(Debug)]
pub struct McpServer {
    dispatcher: Arc<Dispatcher>,
    config: ServerConfig,
    cancel: CancellationToken,
}

impl McpServer {
    pub fn new(dispatcher: Arc<Dispatcher>, config: ServerConfig) -> Self {
        Self {
            dispatcher,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops [`serve`](Self::serve) when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Request graceful shutdown.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Serve on the process's stdin/stdout.
    pub async fn serve_stdio(&self) -> std::io::Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Run until EOF, cancellation, or a write error.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(
            "MCP server '{}' ready ({} tools)",
            self.config.name,
            self.dispatcher.catalog().len(),
        );
        let mut lines = reader.lines();

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!("MCP server shutting down");
                    break;
                }
                line = lines.next_line() => {
                    let line = match line? {
                        Some(line) => line,
                        None => break, // clean EOF
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    if let Some(response) = self.handle_line(&line).await {
                        let mut encoded = serde_json::to_vec(&response)?;
                        encoded.push(b'\n');
                        writer.write_all(&encoded).await?;
                        writer.flush().await?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Handle one raw JSON-RPC line. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(jsonrpc_codes::PARSE_ERROR, format!("Parse error: {}", e)),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::new(
                        jsonrpc_codes::INVALID_REQUEST,
                        format!("Invalid request: {}", e),
                    ),
                ));
            }
        };

        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification");
            return None;
        }

        tracing::debug!(method = %request.method, "request");
        let params = request.params.unwrap_or(Value::Null);
        let response = match route_request(&self.dispatcher, &self.config, &request.method, params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                tracing::warn!(method = %request.method, error = %e, "request failed");
                JsonRpcResponse::failure(id, JsonRpcError::from(&e))
            }
        };
        Some(response)
    }
}
