//! MCP method router — maps JSON-RPC methods onto the dispatcher.

use serde_json::{json, Value};

use crate::mcp::protocol::CallToolParams;
use crate::tools::Dispatcher;
use crate::types::{Error, Result, ServerConfig};

/// Route one MCP request to its handler.
pub async fn route_request(
    dispatcher: &Dispatcher,
    server: &ServerConfig,
    method: &str,
    params: Value,
) -> Result<Value> {
    match method {
        "initialize" => Ok(json!({
            "protocolVersion": server.protocol_version,
            "capabilities": {
                "tools": { "listChanged": false },
            },
            "serverInfo": {
                "name": server.name,
                "version": server.version,
            },
        })),

        "ping" => Ok(json!({})),

        "tools/list" => Ok(json!({
            "tools": dispatcher.catalog().descriptors(),
        })),

        "tools/call" => {
            let call: CallToolParams = serde_json::from_value(params)
                .map_err(|e| Error::protocol(format!("Invalid tools/call params: {}", e)))?;
            let response = dispatcher.call(&call.name, &call.arguments).await;
            Ok(serde_json::to_value(response)?)
        }

        _ => Err(Error::not_found(format!("Unknown method: {}", method))),
    }
}
