//! MCP server exposing the tool registry over newline-delimited JSON-RPC.
//!
//! Each inbound request is handled on its own task so independent tool
//! calls overlap; responses are funnelled through one channel into a
//! single writer. Notifications never produce output.

use anyhow::Result;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::tools::{ToolOutput, ToolRegistry};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

/// Identity reported in the `initialize` response.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl ServerInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

pub struct McpServer {
    registry: ToolRegistry,
    info: ServerInfo,
}

#[derive(Debug)]
struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: message.into(),
        }
    }
}

impl McpServer {
    pub fn new(registry: ToolRegistry, info: ServerInfo) -> Self {
        Self { registry, info }
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn run_stdio(self: Arc<Self>) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        info!(
            server = %self.info.name,
            tools = self.registry.len(),
            "MCP server listening on stdio"
        );
        self.serve(stdin, &mut stdout).await?;
        info!("stdin closed, MCP server stopped");
        Ok(())
    }

    /// Serve one connection. Returns once `reader` hits EOF and every
    /// in-flight request has been answered.
    pub async fn serve<R, W>(self: &Arc<Self>, reader: R, writer: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Value>();

        let read_loop = async move {
            let mut reader = reader;
            let mut buf = Vec::new();
            loop {
                buf.clear();
                if reader.read_until(b'\n', &mut buf).await? == 0 {
                    break;
                }
                // Raw bytes: a line that is not UTF-8 is answered, not fatal.
                let line = buf.trim_ascii().to_vec();
                if line.is_empty() {
                    continue;
                }
                let server = Arc::clone(self);
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Some(response) = server.handle_line(&line).await {
                        if tx.send(response).is_err() {
                            warn!("Response dropped, writer already closed");
                        }
                    }
                });
            }
            Ok::<(), anyhow::Error>(())
        };

        let write_loop = async {
            while let Some(response) = rx.recv().await {
                let mut payload = serde_json::to_string(&response)?;
                payload.push('\n');
                writer.write_all(payload.as_bytes()).await?;
                writer.flush().await?;
            }
            Ok::<(), anyhow::Error>(())
        };

        let (read_result, write_result) = tokio::join!(read_loop, write_loop);
        read_result?;
        write_result
    }

    /// Handle one raw line from the host.
    pub async fn handle_line(&self, line: &[u8]) -> Option<Value> {
        match serde_json::from_slice::<Value>(line) {
            Ok(message) => self.handle_message(message).await,
            Err(e) => {
                warn!(error = %e, "Unparseable JSON-RPC message");
                Some(error_response(&Value::Null, PARSE_ERROR, format!("Parse error: {e}")))
            }
        }
    }

    /// Dispatch one JSON-RPC message. Returns `None` for notifications.
    pub async fn handle_message(&self, message: Value) -> Option<Value> {
        let id = message.get("id").cloned();
        let Some(method) = message.get("method").and_then(Value::as_str) else {
            // Responses from the host to server requests carry no method; ignore them.
            let is_reply = message.get("result").is_some() || message.get("error").is_some();
            return id
                .filter(|_| !is_reply)
                .map(|id| error_response(&id, INVALID_REQUEST, "Missing method".into()));
        };
        debug!(method, "MCP message");

        let Some(id) = id else {
            // Notification: never answered.
            return None;
        };

        let params = message.get("params").cloned().unwrap_or_else(|| json!({}));
        let result = match method {
            "initialize" => Ok(self.initialize_result()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.registry.definitions() })),
            "tools/call" => self.call_tool(params).await,
            _ => Err(RpcError {
                code: METHOD_NOT_FOUND,
                message: format!("Method not found: {method}"),
            }),
        };

        Some(match result {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            Err(err) => error_response(&id, err.code, err.message),
        })
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {
                "name": self.info.name,
                "version": self.info.version,
            },
            "capabilities": {
                "tools": { "listChanged": false },
            },
            "instructions": format!(
                "Read-only football statistics. Tools: {}. Find ids with search_player \
                 before calling search_player_teams or search_player_statistics.",
                self.registry.names().join(", ")
            ),
        })
    }

    async fn call_tool(&self, params: Value) -> std::result::Result<Value, RpcError> {
        let params = params
            .as_object()
            .ok_or_else(|| RpcError::invalid_params("Invalid params for tools/call"))?;
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("Missing tool name"))?;

        if !self.registry.has(name) {
            return Err(RpcError::invalid_params(format!("Unknown tool: {name}")));
        }

        let arguments: HashMap<String, Value> = match params.get("arguments") {
            None | Some(Value::Null) => HashMap::new(),
            Some(Value::Object(map)) => object_to_args(map),
            Some(_) => return Err(RpcError::invalid_params("Tool arguments must be an object")),
        };

        let output = self.registry.execute(name, arguments).await;
        Ok(tool_result(&output))
    }
}

fn object_to_args(map: &Map<String, Value>) -> HashMap<String, Value> {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

/// MCP `tools/call` result for a tool output.
pub fn tool_result(output: &ToolOutput) -> Value {
    json!({
        "content": [{ "type": "text", "text": output.to_string() }],
        "isError": output.is_error(),
    })
}

fn error_response(id: &Value, code: i64, message: String) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message }
    })
}
