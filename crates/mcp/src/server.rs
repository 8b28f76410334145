// MCP server: JSON-RPC 2.0 over newline-delimited stdio

use crate::protocol::*;
use crate::resources::ResourceRegistry;
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use bytes::BytesMut;
use futures_util::{SinkExt, StreamExt};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::io;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{Decoder, FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "jasper-ai-mcp";

/// Longest accepted message in bytes, not counting the newline.
pub const MAX_MESSAGE_BYTES: usize = 4 * 1024 * 1024;

const INSTRUCTIONS: &str = "Generate and restyle marketing content with Jasper AI. \
List style guides, brand voices and audiences first, then pass their ids to \
generate-content or apply-style.";

pub struct McpServer {
    tools: ToolRegistry,
    resources: ResourceRegistry,
    info: ServerInfo,
    instructions: Option<String>,
    max_message_bytes: usize,
}

impl McpServer {
    pub fn new(tools: ToolRegistry, resources: ResourceRegistry) -> Self {
        Self {
            tools,
            resources,
            info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            max_message_bytes: MAX_MESSAGE_BYTES,
        }
    }

    pub fn with_max_message_bytes(mut self, max_message_bytes: usize) -> Self {
        self.max_message_bytes = max_message_bytes;
        self
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    /// Serve on the process's stdin and stdout until stdin closes.
    pub async fn start(&self) -> Result<()> {
        info!(
            tools = self.tools.len(),
            resources = self.resources.len(),
            "Jasper AI MCP server running on stdio"
        );
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve one connection. Messages are handled strictly in arrival order.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut frames = FramedRead::new(reader, MessageCodec::new(self.max_message_bytes));
        let mut sink = FramedWrite::new(writer, LinesCodec::new());

        while let Some(frame) = frames.next().await {
            let response = match frame.context("Failed to read message")? {
                Frame::Message(line) if line.trim().is_empty() => continue,
                Frame::Message(line) => self.handle_message(&line).await,
                Frame::Malformed(reason) => {
                    warn!(reason, "Discarding malformed message");
                    Some(JsonRpcResponse::error(
                        Value::Null,
                        JsonRpcError::parse_error(),
                    ))
                }
            };

            if let Some(response) = response {
                let payload =
                    serde_json::to_string(&response).context("Failed to serialize response")?;
                sink.send(payload).await.context("Failed to write response")?;
            }
        }

        info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle one raw message. Returns `None` for notifications.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Unparsable message");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(),
                ));
            }
        };

        let raw_id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Message is not a JSON-RPC request");
                return Some(JsonRpcResponse::error(
                    raw_id,
                    JsonRpcError::invalid_request(),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                raw_id,
                JsonRpcError::invalid_request(),
            ));
        }

        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }

        let id = request.id.unwrap_or(Value::Null);
        debug!(method = %request.method, id = %id, "Request received");

        let response = match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => {
                debug!(method = %request.method, code = error.code, "Request failed");
                JsonRpcResponse::error(id, error)
            }
        };
        Some(response)
    }

    async fn dispatch(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> std::result::Result<Value, JsonRpcError> {
        match method {
            "initialize" => {
                let params: InitializeParams = optional_params(params)?;
                if let Some(client) = &params.client_info {
                    info!(client = %client.name, version = %client.version, "Client connected");
                }

                to_result(InitializeResult {
                    protocol_version: negotiate_protocol_version(
                        params.protocol_version.as_deref(),
                    )
                    .to_string(),
                    capabilities: ServerCapabilities {
                        tools: Some(ToolsCapability {
                            list_changed: false,
                        }),
                        resources: Some(ResourcesCapability {
                            subscribe: false,
                            list_changed: false,
                        }),
                    },
                    server_info: self.info.clone(),
                    instructions: self.instructions.clone(),
                })
            }
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => to_result(ListToolsResult {
                tools: self.tools.list_schemas(),
            }),
            "tools/call" => {
                let params: CallToolParams = required_params(params)?;
                let tool = self.tools.get(&params.name).ok_or_else(|| {
                    JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name))
                })?;

                info!(tool = %params.name, "Calling tool");
                let result = tool
                    .execute(params.arguments)
                    .await
                    .map_err(|e| JsonRpcError::invalid_params(format!("{:#}", e)))?;
                to_result(result)
            }
            "resources/list" => to_result(ListResourcesResult {
                resources: self.resources.list_schemas(),
            }),
            "resources/templates/list" => to_result(ListResourceTemplatesResult {
                resource_templates: self.resources.list_templates(),
            }),
            "resources/read" => {
                let params: ReadResourceParams = required_params(params)?;
                let resource = self
                    .resources
                    .find(&params.uri)
                    .ok_or_else(|| JsonRpcError::resource_not_found(&params.uri))?;

                info!(uri = %params.uri, "Reading resource");
                to_result(resource.read(&params.uri).await)
            }
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }
}

/// One newline-delimited unit of input.
#[derive(Debug, PartialEq)]
enum Frame {
    Message(String),
    /// Too long or not UTF-8. The rest of the stream is still usable.
    Malformed(&'static str),
}

/// Line framing that reports bad lines as frames instead of failing the
/// stream, so only I/O errors end a connection.
struct MessageCodec {
    lines: LinesCodec,
}

impl MessageCodec {
    fn new(max_length: usize) -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(max_length),
        }
    }

    fn classify(
        decoded: std::result::Result<Option<String>, LinesCodecError>,
    ) -> io::Result<Option<Frame>> {
        match decoded {
            Ok(line) => Ok(line.map(Frame::Message)),
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                Ok(Some(Frame::Malformed("message exceeds the maximum length")))
            }
            Err(LinesCodecError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                Ok(Some(Frame::Malformed("message is not valid UTF-8")))
            }
            Err(LinesCodecError::Io(e)) => Err(e),
        }
    }
}

impl Decoder for MessageCodec {
    type Item = Frame;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> io::Result<Option<Frame>> {
        Self::classify(self.lines.decode(src))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> io::Result<Option<Frame>> {
        Self::classify(self.lines.decode_eof(src))
    }
}

fn required_params<T: DeserializeOwned>(
    params: Option<Value>,
) -> std::result::Result<T, JsonRpcError> {
    let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
}

fn optional_params<T: DeserializeOwned + Default>(
    params: Option<Value>,
) -> std::result::Result<T, JsonRpcError> {
    match params {
        None | Some(Value::Null) => Ok(T::default()),
        Some(params) => serde_json::from_value(params)
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e))),
    }
}

fn to_result<T: Serialize>(value: T) -> std::result::Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
