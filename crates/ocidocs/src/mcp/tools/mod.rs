mod docs;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

pub const SERVER_NAME: &str = "oci-documentation-server";

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    pub instructions: String,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

impl CallToolResult {
    pub fn text(text: String) -> Result<serde_json::Value, JsonRpcError> {
        serde_json::to_value(Self {
            content: vec![Content::Text { text }],
            is_error: None,
        })
        .map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
    }
}

const INSTRUCTIONS: &str = "Use search_documentation to find relevant pages on the OCI documentation \
site, then read_documentation to fetch a page as Markdown. Long pages are returned in windows; \
call read_documentation again with the suggested start_index to continue.";

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        instructions: INSTRUCTIONS.to_string(),
    };

    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "search_documentation".to_string(),
            description: "Search OCI documentation. Runs a web search restricted to the OCI documentation site and returns a JSON list of results, each with title, url and description. On failure a single result is returned whose description carries the error.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "search_phrase": {
                        "type": "string",
                        "description": "Search phrase to use"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of results to return (default: 3)",
                        "default": ocidocs_core::search::DEFAULT_SEARCH_LIMIT,
                        "minimum": 1,
                        "maximum": ocidocs_core::error::MAX_SEARCH_LIMIT
                    }
                },
                "required": ["search_phrase"]
            }),
        },
        Tool {
            name: "read_documentation".to_string(),
            description: "Fetch an OCI documentation page and convert it to Markdown. Only .htm and .html pages on the OCI documentation site are accepted. Long pages are split into windows of max_length characters; when content is truncated, call again with the start_index given at the end of the response.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "URL of the OCI documentation page to read"
                    },
                    "max_length": {
                        "type": "integer",
                        "description": "Maximum number of characters to return (default: 5000)",
                        "default": ocidocs_core::fetch::DEFAULT_MAX_LENGTH,
                        "exclusiveMinimum": 0,
                        "exclusiveMaximum": ocidocs_core::error::MAX_LENGTH_LIMIT
                    },
                    "start_index": {
                        "type": "integer",
                        "description": "On return output starting at this character index, useful if a previous fetch was truncated and more content is required (default: 0)",
                        "default": 0,
                        "minimum": 0
                    }
                },
                "required": ["url"]
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {e}")))?;

    match params.name.as_str() {
        "search_documentation" => docs::handle_search_documentation(params.arguments, global).await,
        "read_documentation" => docs::handle_read_documentation(params.arguments, global).await,
        _ => Err(JsonRpcError::invalid_params(format!(
            "Unknown tool: {}",
            params.name
        ))),
    }
}
