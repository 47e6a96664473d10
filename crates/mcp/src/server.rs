use serde_json::{json, Value};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::tools::{list_tools, Tool};
use crate::transport::{JsonRpcRequest, JsonRpcResponse};

const SERVER_NAME: &str = "sandbox-fs-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Stateless request dispatcher. Holds only the immutable startup config.
pub struct McpServer {
    config: ServerConfig,
}

impl McpServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Read requests line by line until EOF, answering each before the next.
    ///
    /// Lines are taken as raw bytes so undecodable input is answered with a
    /// parse error instead of ending the loop. Only stream I/O errors stop it.
    pub fn serve<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> anyhow::Result<()> {
        info!(root = %self.config.guard.root().display(), "serving");

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let response = self.handle_line(trim_line_ending(&buf));
            writeln!(writer, "{}", response)?;
            writer.flush()?;
        }

        info!("input closed, shutting down");
        Ok(())
    }

    /// Handle one input line and return the serialized response line.
    pub fn handle_request(&self, input: &str) -> String {
        self.handle_line(input.as_bytes())
    }

    fn handle_line(&self, input: &[u8]) -> String {
        debug!(request = %String::from_utf8_lossy(input), "received");

        let response = match serde_json::from_slice::<Value>(input) {
            Ok(value) => self.handle_value(value),
            Err(e) => {
                warn!(error = %e, "malformed request line");
                ServerError::Parse(e).into_response_without_id()
            }
        };

        let line = response.to_line();
        debug!(response = %line, "sending");
        line
    }

    pub fn handle_value(&self, value: Value) -> JsonRpcResponse {
        if !value.is_object() {
            return ServerError::Internal("request must be a JSON object".to_string())
                .into_response_without_id();
        }

        let id = value.get("id").cloned();
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "request is not a valid call");
                return ServerError::Internal(e.to_string()).into_response(id);
            }
        };

        let id = request.id.clone();
        match self.dispatch(&request) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                warn!(code = e.code(), error = %e, "request failed");
                e.into_response(id)
            }
        }
    }

    fn dispatch(&self, request: &JsonRpcRequest) -> Result<Value, ServerError> {
        let method = request.method.as_ref();
        match method.and_then(Value::as_str) {
            Some("initialize") => Ok(self.handle_initialize()),
            Some("tools/list") => Ok(json!({ "tools": list_tools() })),
            Some("tools/call") => self.handle_tools_call(request.params.as_ref()),
            _ => Err(ServerError::MethodNotFound(display_value(method))),
        }
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {
                    "listChanged": false
                },
                "resources": {
                    "subscribe": false,
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION
            }
        })
    }

    fn handle_tools_call(&self, params: Option<&Value>) -> Result<Value, ServerError> {
        let name = params.and_then(|p| p.get("name"));
        let tool = name
            .and_then(Value::as_str)
            .and_then(Tool::from_name)
            .ok_or_else(|| ServerError::ToolNotFound(display_value(name)))?;

        let arguments = params
            .and_then(|p| p.get("arguments"))
            .cloned()
            .unwrap_or_else(|| json!({}));

        debug!(tool = tool.name(), "calling tool");
        Ok(tool.call(&self.config.guard, arguments)?)
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
